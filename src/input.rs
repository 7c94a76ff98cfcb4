use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Reset,
    Play,
    Quit,
}

/// Arrow keys or WASD steer, R resets, Space/Enter play, Q/Esc/Ctrl+C quit.
pub fn map_key(ev: &KeyEvent) -> Option<Command> {
    if ev.kind != KeyEventKind::Press {
        return None;
    }

    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    let command = match ev.code {
        KeyCode::Up => Command::MoveUp,
        KeyCode::Down => Command::MoveDown,
        KeyCode::Left => Command::MoveLeft,
        KeyCode::Right => Command::MoveRight,
        KeyCode::Char(ch) => match ch.to_ascii_lowercase() {
            'w' => Command::MoveUp,
            's' => Command::MoveDown,
            'a' => Command::MoveLeft,
            'd' => Command::MoveRight,
            'r' => Command::Reset,
            'q' => Command::Quit,
            ' ' => Command::Play,
            _ => return unmapped(ev),
        },
        KeyCode::Enter => Command::Play,
        KeyCode::Esc => Command::Quit,
        _ => return unmapped(ev),
    };

    Some(command)
}

fn unmapped(ev: &KeyEvent) -> Option<Command> {
    debug!("Unexpected key {:?}", ev.code);
    None
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
