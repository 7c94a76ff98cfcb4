use crate::{Coords, GridInt, TermInt};
use crate::snake::Position;
use crate::view::{Cell, Snapshot};
use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{bail, Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

// Terminal characters are about twice as tall as wide
const CELL_WIDTH: TermInt = 2;

#[derive(Copy, Clone, PartialEq)]
struct Glyph {
    ch: char,
    color: Color,
}

const BLANK: Glyph = Glyph { ch: ' ', color: Color::Reset };

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<Glyph>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: Coords,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("Error reading terminal size")?;
        let stdout = stdout();
        let screen = vec![BLANK; width as usize * height as usize];
        Ok(TermManager { width, height, stdout, screen, current_msg: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error enabling raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking).context("Error hiding cursor")?;
        self.clear()
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("Error disabling raw mode")?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("Error leaving alt screen")?;
        Ok(())
    }

    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    /// Fails when a `grid_size` board plus its score bar cannot fit the terminal.
    pub fn check_fits(&self, grid_size: GridInt) -> Result<()> {
        let (need_w, need_h) = board_size(grid_size);
        if need_w > self.width || need_h + 1 > self.height {
            bail!(
                "Terminal is {}x{}, a {} cell grid needs at least {}x{}",
                self.width, self.height, grid_size, need_w, need_h + 1
            );
        }
        Ok(())
    }

    /// Draws the score bar, the borders and every cell of `snapshot`.
    pub fn draw(&mut self, snapshot: &Snapshot) -> Result<()> {
        let grid_size = snapshot.grid_size();
        let top_left = self.board_top_left(grid_size);

        let status = format!("Score {}  Best {}", snapshot.score(), snapshot.best_score());
        let (board_w, _) = board_size(grid_size);
        let status = format!("{status: <width$}", status = status, width = board_w as usize);
        for (x_diff, ch) in status.chars().take(board_w as usize).enumerate() {
            self.print_at((top_left.0 + x_diff as TermInt, top_left.1 - 1), Glyph { ch, color: Color::White })?;
        }

        self.draw_borders(top_left, grid_size)?;

        // Row y = grid_size is at the top
        for y in 1..=grid_size {
            let row = top_left.1 + 1 + (grid_size - y);
            for x in 1..=grid_size {
                let col = top_left.0 + 1 + (x - 1) * CELL_WIDTH;
                let glyphs = cell_glyphs(snapshot.cell(Position::new(x, y)));
                for (i, glyph) in glyphs.iter().enumerate() {
                    self.print_at((col + i as TermInt, row), *glyph)?;
                }
            }
        }

        Ok(())
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 4) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        // Print the top and bottom empty lines
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), BLANK)?;
            }
        }

        // Print the message lines
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), Glyph { ch, color: Color::White })?;
            }
        }

        self.current_msg = Some(Message::new(msg_width, msg_height, top_left));
        Ok(())
    }

    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };
        let top_left = msg.top_left();

        // Restore the content from the screen buffer
        for y_diff in 0..msg.height() {
            for x_diff in 0..msg.width() {
                let (x, y) = (top_left.0 + x_diff, top_left.1 + y_diff);
                if x >= self.width || y >= self.height {
                    continue;
                }
                let glyph = self.screen[self.width as usize * y as usize + x as usize];
                self.print_at_no_save((x, y), glyph)?;
            }
        }

        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing")?;
        self.screen = vec![BLANK; self.width as usize * self.height as usize];
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn board_top_left(&self, grid_size: GridInt) -> Coords {
        let (board_w, board_h) = board_size(grid_size);
        // One extra row above the board for the score bar
        let x = (self.width - board_w) / 2;
        let y = (self.height - board_h - 1) / 2 + 1;
        (x, y)
    }

    fn draw_borders(&mut self, top_left: Coords, grid_size: GridInt) -> Result<()> {
        let (width, height) = board_size(grid_size);
        let (x0, y0) = top_left;
        let border = |ch| Glyph { ch, color: Color::DarkGrey };

        for x in 0..width {
            let ch = if x == 0 || x == width - 1 {'+'} else {'-'};
            self.print_at((x0 + x, y0), border(ch))?;
            self.print_at((x0 + x, y0 + height - 1), border(ch))?;
        }

        for y in 1..height - 1 {
            self.print_at((x0, y0 + y), border('|'))?;
            self.print_at((x0 + width - 1, y0 + y), border('|'))?;
        }

        Ok(())
    }

    fn print_at(&mut self, pos: Coords, glyph: Glyph) -> Result<()> {
        let idx = self.width as usize * pos.1 as usize + pos.0 as usize;
        if self.screen[idx] == glyph {
            return Ok(());
        }
        self.screen[idx] = glyph;

        if self.covered_by_message(pos) {
            return Ok(());
        }
        self.print_at_no_save(pos, glyph)
    }

    fn print_at_no_save(&mut self, pos: Coords, glyph: Glyph) -> Result<()> {
        // To be used for printing messages, where we don't wanna overwrite our
        // local buffer to restore it when the message is hidden
        queue!(
            self.stdout,
            cursor::MoveTo(pos.0, pos.1),
            style::SetForegroundColor(glyph.color),
            style::Print(glyph.ch)
        )?;
        Ok(())
    }

    fn covered_by_message(&self, pos: Coords) -> bool {
        match &self.current_msg {
            Some(msg) => {
                let (x0, y0) = msg.top_left();
                pos.0 >= x0 && pos.0 < x0 + msg.width() && pos.1 >= y0 && pos.1 < y0 + msg.height()
            },
            None => false,
        }
    }
}

impl Message {
    pub fn new(width: TermInt, height: TermInt, top_left: Coords) -> Self {
        Message { width, height, top_left }
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn top_left(&self) -> Coords {
        self.top_left
    }
}

/// Border included.
fn board_size(grid_size: GridInt) -> Coords {
    (grid_size * CELL_WIDTH + 2, grid_size + 2)
}

fn cell_glyphs(cell: Cell) -> [Glyph; CELL_WIDTH as usize] {
    match cell {
        Cell::Head => [Glyph { ch: '█', color: Color::White }; 2],
        Cell::Body => [Glyph { ch: '▓', color: Color::Grey }; 2],
        Cell::Food => [Glyph { ch: '●', color: Color::Magenta }, BLANK],
        Cell::Empty => [Glyph { ch: '·', color: Color::DarkGrey }, BLANK],
    }
}
