//! Read-only picture of the game handed to the presentation layer after each change.

use crate::GridInt;
use crate::food::Food;
use crate::snake::{Position, Snake};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Head,
    Body,
    Food,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    grid_size: GridInt,
    cells: Vec<Cell>,
    score: u32,
    best_score: u32,
    running: bool,
}

impl Snapshot {
    pub(crate) fn capture(
        snake: &Snake,
        food: &Food,
        grid_size: GridInt,
        best_score: u32,
        running: bool,
    ) -> Self {
        let side = grid_size as usize;
        let mut cells = vec![Cell::Empty; side * side];

        // Later writes win: head over food over body
        for pos in snake.body() {
            cells[index(side, *pos)] = Cell::Body;
        }
        cells[index(side, food.position())] = Cell::Food;
        cells[index(side, snake.head())] = Cell::Head;

        Snapshot { grid_size, cells, score: snake.score(), best_score, running }
    }

    pub fn grid_size(&self) -> GridInt {
        self.grid_size
    }

    /// Content of the 1-indexed cell `pos`.
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[index(self.grid_size as usize, pos)]
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn running(&self) -> bool {
        self.running
    }
}

fn index(side: usize, pos: Position) -> usize {
    (pos.y as usize - 1) * side + (pos.x as usize - 1)
}
