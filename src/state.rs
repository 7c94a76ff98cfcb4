use crate::GridInt;
use crate::food::Food;
use crate::input::Command;
use crate::snake::{Direction, Position, Snake};
use crate::view::Snapshot;

use log::{debug, info};
use rand::rngs::StdRng;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub grid_size: GridInt,
    pub food_avoids_snake: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings { grid_size: 17, food_avoids_snake: false }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Moved,
    Ate { score: u32 },
    Collided { score: u32 },
}

/// Everything the game loop mutates. Commands and ticks are the only writers.
pub struct GameState {
    settings: Settings,
    snake: Snake,
    food: Food,
    best_score: u32,
    running: bool,
    rng: StdRng,
}

impl GameState {
    pub fn new(settings: Settings, mut rng: StdRng) -> Self {
        let center = settings.grid_size / 2 + 1;
        let snake = Snake::new(Position::new(center, center));
        let food = Food::random(&mut rng, settings.grid_size);

        GameState { settings, snake, food, best_score: 0, running: false, rng }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn play(&mut self) {
        if !self.running {
            info!("Playing");
            self.running = true;
        }
    }

    pub fn reset(&mut self) {
        self.record_best();
        self.running = false;
        self.snake.respawn();
        self.respawn_food();
        info!("Reset, best score {}", self.best_score);
    }

    /// Applies a game command. Returns whether anything visible may have changed.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveUp => self.steer(Direction::Up),
            Command::MoveDown => self.steer(Direction::Down),
            Command::MoveLeft => self.steer(Direction::Left),
            Command::MoveRight => self.steer(Direction::Right),
            Command::Reset => {
                self.reset();
                true
            },
            Command::Play => {
                let was_running = self.running;
                self.play();
                !was_running
            },
            Command::Quit => false,
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }

        self.record_best();

        let freed = self.snake.advance(self.settings.grid_size);

        if self.snake.head() == self.food.position() {
            self.snake.grow(freed);
            self.respawn_food();
            let score = self.snake.score();
            info!("Food eaten, score {}", score);
            TickOutcome::Ate { score }
        } else if self.snake.bites_itself() {
            let score = self.snake.score();
            info!("Collided at {:?} with score {}", self.snake.head(), score);
            self.reset();
            TickOutcome::Collided { score }
        } else {
            TickOutcome::Moved
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(
            &self.snake,
            &self.food,
            self.settings.grid_size,
            self.best_score,
            self.running,
        )
    }

    ///////////////////////////////////////////////////////////////////////////

    fn steer(&mut self, direction: Direction) -> bool {
        if !self.snake.set_direction(direction) {
            debug!("Ignored turn to {:?} while heading {:?}", direction, self.snake.direction());
        }
        false
    }

    fn record_best(&mut self) {
        self.best_score = self.best_score.max(self.snake.score());
    }

    fn respawn_food(&mut self) {
        let grid_size = self.settings.grid_size;
        if self.settings.food_avoids_snake {
            self.food.respawn_avoiding(&mut self.rng, grid_size, &self.snake);
        } else {
            self.food.respawn(&mut self.rng, grid_size);
        }
        debug!("Food placed at {:?}", self.food.position());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::BASE_LENGTH;
    use crate::view::Cell;
    use rand::SeedableRng;

    fn playing(settings: Settings) -> GameState {
        let mut state = GameState::new(settings, StdRng::seed_from_u64(1));
        state.play();
        state
    }

    fn park_food(state: &mut GameState) {
        state.food = Food::at(Position::new(1, 1));
    }

    fn snake_shape(state: &GameState) -> (Position, Direction, u32, Vec<Position>) {
        let snake = &state.snake;
        (snake.head(), snake.direction(), snake.score(), snake.body().iter().copied().collect())
    }

    #[test]
    fn starts_idle_at_the_center() {
        let state = GameState::new(Settings::default(), StdRng::seed_from_u64(1));

        assert!(!state.running());
        assert_eq!(state.snake.head(), Position::new(9, 9));
        assert_eq!(state.snake.direction(), Direction::Right);
        assert_eq!(state.best_score(), 0);
    }

    #[test]
    fn idle_ticks_change_nothing() {
        let mut state = GameState::new(Settings::default(), StdRng::seed_from_u64(1));
        let before = state.snapshot();

        assert_eq!(state.tick(), TickOutcome::Idle);
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn eating_food_scores_and_grows() {
        let mut state = playing(Settings::default());
        state.food = Food::at(Position::new(10, 9));
        let len_before = state.snake.body().len();

        assert_eq!(state.tick(), TickOutcome::Ate { score: 1 });

        assert_eq!(state.snake.head(), Position::new(10, 9));
        assert_eq!(state.snake.score(), 1);
        assert_eq!(state.snake.body().len(), len_before + 1);
        let food = state.food.position();
        assert!((1..=17).contains(&food.x) && (1..=17).contains(&food.y));

        // Best score catches up on the next tick
        park_food(&mut state);
        state.tick();
        assert_eq!(state.best_score(), 1);
    }

    #[test]
    fn eaten_food_moves_off_the_snake_when_avoiding() {
        let mut state = playing(Settings { food_avoids_snake: true, ..Settings::default() });
        state.food = Food::at(Position::new(10, 9));

        state.tick();

        assert_ne!(state.food.position(), Position::new(10, 9));
        assert!(!state.snake.occupies(state.food.position()));
    }

    #[test]
    fn wraps_around_the_right_edge() {
        let mut state = playing(Settings::default());
        park_food(&mut state);

        for _ in 0..8 {
            assert_eq!(state.tick(), TickOutcome::Moved);
        }
        assert_eq!(state.snake.head(), Position::new(17, 9));

        assert_eq!(state.tick(), TickOutcome::Moved);
        assert_eq!(state.snake.head(), Position::new(1, 9));
        assert!(state.running());
    }

    #[test]
    fn wraps_around_the_bottom_edge() {
        let mut state = playing(Settings { grid_size: 5, ..Settings::default() });
        park_food(&mut state);
        state.apply(Command::MoveDown);

        // Start is (3, 3), three steps down reach y = 5 through the bottom edge
        state.tick();
        state.tick();
        assert_eq!(state.snake.head(), Position::new(3, 1));
        state.tick();
        assert_eq!(state.snake.head(), Position::new(3, 5));
    }

    #[test]
    fn biting_the_body_resets() {
        let mut state = playing(Settings::default());
        state.food = Food::at(Position::new(10, 9));
        assert_eq!(state.tick(), TickOutcome::Ate { score: 1 });
        park_food(&mut state);
        let parked = state.food.position();

        state.apply(Command::MoveUp);
        assert_eq!(state.tick(), TickOutcome::Moved);
        state.apply(Command::MoveLeft);
        assert_eq!(state.tick(), TickOutcome::Moved);
        state.apply(Command::MoveDown);
        assert_eq!(state.tick(), TickOutcome::Collided { score: 1 });

        assert!(!state.running());
        assert_eq!(state.snake.score(), 0);
        assert_eq!(state.snake.head(), Position::new(9, 9));
        assert_eq!(state.snake.body().len(), BASE_LENGTH);
        assert_eq!(state.best_score(), 1);
        assert_ne!(state.food.position(), parked);
    }

    #[test]
    fn reset_twice_gives_the_same_idle_start() {
        let mut state = playing(Settings::default());
        state.food = Food::at(Position::new(10, 9));
        state.tick();
        park_food(&mut state);
        state.apply(Command::MoveUp);
        state.tick();

        state.apply(Command::Reset);
        let first = snake_shape(&state);
        let best = state.best_score();
        assert!(!state.running());

        state.apply(Command::Reset);
        let second = snake_shape(&state);

        assert_eq!(first, second);
        assert_eq!(first.0, Position::new(9, 9));
        assert_eq!(first.3.len(), BASE_LENGTH);
        assert!(!state.running());
        assert_eq!(state.best_score(), best);
        let food = state.food.position();
        assert!((1..=17).contains(&food.x) && (1..=17).contains(&food.y));
    }

    #[test]
    fn short_snake_circles_without_colliding() {
        let mut state = playing(Settings::default());
        park_food(&mut state);

        for command in [Command::MoveUp, Command::MoveLeft, Command::MoveDown, Command::MoveRight] {
            state.apply(command);
            assert_eq!(state.tick(), TickOutcome::Moved);
        }
        assert!(state.running());
    }

    #[test]
    fn reset_keeps_a_score_reached_before_the_next_tick() {
        let mut state = playing(Settings::default());
        state.food = Food::at(Position::new(10, 9));
        state.tick();

        state.apply(Command::Reset);

        assert!(!state.running());
        assert_eq!(state.best_score(), 1);
        assert_eq!(state.snake.score(), 0);
    }

    #[test]
    fn best_score_never_decreases() {
        let mut state = playing(Settings { grid_size: 5, ..Settings::default() });
        let mut best = 0;

        for round in 0..400 {
            match round % 7 {
                0 => { state.apply(Command::MoveUp); },
                2 => { state.apply(Command::MoveLeft); },
                4 => { state.apply(Command::MoveDown); },
                6 => { state.apply(Command::MoveRight); },
                _ => {},
            }
            if round % 97 == 0 {
                state.apply(Command::Reset);
            }
            state.play();
            state.tick();

            assert!(state.best_score() >= best);
            best = state.best_score();
            assert_eq!(state.snake.body().len(), state.snake.score() as usize + BASE_LENGTH);
        }
    }

    #[test]
    fn play_is_reported_once() {
        let mut state = GameState::new(Settings::default(), StdRng::seed_from_u64(1));

        assert!(state.apply(Command::Play));
        assert!(!state.apply(Command::Play));
        assert!(state.running());
    }

    #[test]
    fn snapshot_reflects_the_state() {
        let mut state = playing(Settings::default());
        state.food = Food::at(Position::new(2, 2));
        state.tick();

        let snapshot = state.snapshot();
        assert_eq!(snapshot.grid_size(), 17);
        assert_eq!(snapshot.cell(Position::new(10, 9)), Cell::Head);
        assert_eq!(snapshot.cell(Position::new(9, 9)), Cell::Body);
        assert_eq!(snapshot.cell(Position::new(2, 2)), Cell::Food);
        assert!(snapshot.running());
    }
}
