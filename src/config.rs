use crate::GridInt;
use crate::state::Settings;
use std::{path::PathBuf, time::Duration};

use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "snake", version, about = "Snake on a wrapping grid, in the terminal")]
pub struct Args {
    /// Cells per side of the square grid
    #[arg(long, default_value_t = 17, value_parser = clap::value_parser!(u16).range(5..=40))]
    pub grid_size: GridInt,

    /// Milliseconds between two moves
    #[arg(long, default_value_t = 125, value_parser = clap::value_parser!(u64).range(20..))]
    pub tick_ms: u64,

    /// Seed for food placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Never place food on the snake
    #[arg(long)]
    pub food_avoids_snake: bool,

    /// File the log is written to, truncated on start
    #[arg(long, default_value = "snake.log")]
    pub log_file: PathBuf,

    /// Least severe level written to the log (off, error, warn, info, debug, trace)
    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

impl Args {
    pub fn settings(&self) -> Settings {
        Settings { grid_size: self.grid_size, food_avoids_snake: self.food_avoids_snake }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
