use std::{thread::sleep, time::{Duration, Instant}};

use crate::input::{map_key, Command};
use crate::state::{GameState, TickOutcome};
use crate::term::TermManager;

use anyhow::Result;
use log::{debug, info};

const POLL_INTERVAL_MS: u64 = 5;

/// Owns the terminal and the game state. Single-threaded: key events and ticks
/// are handled in turn, then the board is redrawn from a fresh snapshot.
pub struct SnakeGame {
    term: TermManager,
    state: GameState,
    tick_period: Duration,
}

impl SnakeGame {
    pub fn new(state: GameState, tick_period: Duration) -> Result<Self> {
        Ok(SnakeGame { term: TermManager::new()?, state, tick_period })
    }

    /// Plays until quit. The terminal is restored even when setup or the loop fails.
    pub fn run(&mut self) -> Result<()> {
        self.term.check_fits(self.state.snapshot().grid_size())?;

        guarded(
            self,
            |game| game.term.setup(),
            SnakeGame::main_loop,
            |game| game.term.restore(),
        )
    }

    ///////////////////////////////////////////////////////////////////////////

    fn main_loop(&mut self) -> Result<()> {
        let mut last_tick = Instant::now();
        self.render()?;

        loop {
            sleep(Duration::from_millis(POLL_INTERVAL_MS));
            let mut dirty = false;

            for key_ev in self.term.read_key_events_queue()? {
                match map_key(&key_ev) {
                    Some(Command::Quit) => {
                        info!("Quitting with best score {}", self.state.best_score());
                        return Ok(());
                    },
                    Some(command) => {
                        if command == Command::Play && !self.state.running() {
                            // Start counting the first move from now
                            last_tick = Instant::now();
                        }
                        dirty |= self.state.apply(command);
                    },
                    None => {},
                }
            }

            if last_tick.elapsed() >= self.tick_period {
                last_tick = Instant::now();
                match self.state.tick() {
                    TickOutcome::Idle => {},
                    TickOutcome::Moved => dirty = true,
                    TickOutcome::Ate { score } | TickOutcome::Collided { score } => {
                        debug!("Score {} after tick, best {}", score, self.state.best_score());
                        dirty = true;
                    },
                }
            }

            if dirty {
                self.render()?;
            }
        }
    }

    fn render(&mut self) -> Result<()> {
        let snapshot = self.state.snapshot();

        self.term.hide_message()?;
        self.term.draw(&snapshot)?;

        if !snapshot.running() {
            let scores = format!("Score: {}   Best: {}", snapshot.score(), snapshot.best_score());
            self.term.show_message(&[
                "S N A K E",
                "",
                &*scores,
                "",
                "Space to play",
                "Arrow keys or WASD to steer",
                "R to reset, Q to quit",
            ])?;
        }

        self.term.flush()
    }
}

/// Runs `setup` then `body`, and always runs `restore` afterwards. The first
/// error wins.
fn guarded<T>(
    ctx: &mut T,
    setup: impl FnOnce(&mut T) -> Result<()>,
    body: impl FnOnce(&mut T) -> Result<()>,
    restore: impl FnOnce(&mut T) -> Result<()>,
) -> Result<()> {
    let res = setup(ctx).and_then(|_| body(ctx));
    let restored = restore(ctx);

    res.and(restored)
}
