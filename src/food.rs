use crate::GridInt;
use crate::snake::{Position, Snake};

use rand::Rng;
use rand::seq::SliceRandom;

pub struct Food {
    position: Position,
}

impl Food {
    pub fn at(position: Position) -> Self {
        Food { position }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R, grid_size: GridInt) -> Self {
        let mut food = Food::at(Position::new(1, 1));
        food.respawn(rng, grid_size);
        food
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Uniform over the whole grid, the snake included.
    pub fn respawn<R: Rng + ?Sized>(&mut self, rng: &mut R, grid_size: GridInt) {
        self.position = Position::new(rng.gen_range(1..=grid_size), rng.gen_range(1..=grid_size));
    }

    /// Uniform over the cells the snake does not cover. Falls back to `respawn`
    /// when the snake fills the grid.
    pub fn respawn_avoiding<R: Rng + ?Sized>(&mut self, rng: &mut R, grid_size: GridInt, snake: &Snake) {
        let choices: Vec<Position> = (1..=grid_size)
            .flat_map(|y| (1..=grid_size).map(move |x| Position::new(x, y)))
            .filter(|pos| !snake.occupies(*pos))
            .collect();

        match choices.choose(rng) {
            Some(pos) => self.position = *pos,
            None => self.respawn(rng, grid_size),
        }
    }
}
