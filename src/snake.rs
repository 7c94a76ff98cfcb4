use std::collections::VecDeque;

use crate::GridInt;
use Direction::*;

/// Segments behind the head at score 0.
pub const BASE_LENGTH: usize = 3;

/// A 1-indexed grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: GridInt,
    pub y: GridInt,
}

impl Position {
    pub fn new(x: GridInt, y: GridInt) -> Self {
        Position { x, y }
    }

    /// One cell in `direction`, wrapping around the edges of a `grid_size` torus.
    pub fn step(self, direction: Direction, grid_size: GridInt) -> Self {
        let Position { x, y } = self;

        match direction {
            Up => Position::new(x, if y >= grid_size { 1 } else { y + 1 }),
            Down => Position::new(x, if y <= 1 { grid_size } else { y - 1 }),
            Left => Position::new(if x <= 1 { grid_size } else { x - 1 }, y),
            Right => Position::new(if x >= grid_size { 1 } else { x + 1 }, y),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

pub struct Snake {
    start: Position,
    head: Position,
    direction: Direction,
    // Direction of the last completed move, guards against reversing twice within one tick
    heading: Direction,
    score: u32,
    body: VecDeque<Position>,
}

impl Snake {
    pub fn new(start: Position) -> Self {
        let mut snake = Snake {
            start,
            head: start,
            direction: Right,
            heading: Right,
            score: 0,
            body: VecDeque::with_capacity(BASE_LENGTH + 1),
        };
        snake.respawn();
        snake
    }

    pub fn respawn(&mut self) {
        self.head = self.start;
        self.score = 0;
        self.direction = Right;
        self.heading = Right;
        self.body.clear();
        self.body.extend(std::iter::repeat(self.start).take(BASE_LENGTH));
    }

    pub fn head(&self) -> Position {
        self.head
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Trailing segments, most recent first. Does not include the current head.
    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.head == pos || self.body.contains(&pos)
    }

    /// Returns whether the new direction was accepted.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction == self.direction.opposite() || new_direction == self.heading.opposite() {
            return false;
        }

        self.direction = new_direction;
        true
    }

    /// Moves the head one cell, leaving the old head as the first body segment.
    /// Returns the tail cell trimmed off to keep the body at `score + BASE_LENGTH`.
    pub fn advance(&mut self, grid_size: GridInt) -> Option<Position> {
        self.body.push_front(self.head);
        let freed = if self.body.len() > self.target_len() {
            self.body.pop_back()
        } else {
            None
        };

        self.head = self.head.step(self.direction, grid_size);
        self.heading = self.direction;
        debug_assert_eq!(self.body.len(), self.target_len());

        freed
    }

    /// Scores one point and keeps the tail segment freed by the last `advance`.
    pub fn grow(&mut self, freed: Option<Position>) {
        self.score += 1;
        self.body.push_back(freed.unwrap_or(self.head));
        debug_assert_eq!(self.body.len(), self.target_len());
    }

    pub fn bites_itself(&self) -> bool {
        self.body.contains(&self.head)
    }

    fn target_len(&self) -> usize {
        self.score as usize + BASE_LENGTH
    }
}
