mod config;
mod food;
mod game;
mod input;
mod snake;
mod state;
mod term;
mod view;

use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use simplelog::WriteLogger;

pub type TermInt = u16;
pub type GridInt = u16;
pub type Coords = (u16, u16);

fn main() -> Result<()> {
    let args = config::Args::parse();

    // The terminal is in raw mode while playing, so logs go to a file
    let log_file = File::create(&args.log_file)
        .with_context(|| format!("Error creating log file {}", args.log_file.display()))?;
    WriteLogger::init(args.log_level, simplelog::Config::default(), log_file)
        .context("Error initializing logger")?;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!("Starting with {:?}, tick every {:?}", args.settings(), args.tick_period());

    let state = state::GameState::new(args.settings(), rng);
    let mut game = game::SnakeGame::new(state, args.tick_period())?;
    game.run()?;

    info!("Exited cleanly");
    Ok(())
}
