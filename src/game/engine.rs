use rand::Rng;
use tracing::{debug, info, warn};

use super::{
    config::GameConfig,
    state::{GameOver, GameState, Phase, Position, Snake},
};
use crate::store::HighScoreStore;

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Set on the tick that ended the run
    pub game_over: Option<GameOver>,
    /// Whether this tick raised the high score
    pub new_high_score: bool,
}

/// Drives the snake simulation.
///
/// The random source and the high-score store are injected so tests can run
/// with a seeded rng and an in-memory store.
pub struct GameEngine<R, S> {
    config: GameConfig,
    rng: R,
    store: S,
    stored_high_score: u32,
}

impl<R: Rng, S: HighScoreStore> GameEngine<R, S> {
    /// Create an engine, reading the stored high score once
    pub fn new(config: GameConfig, rng: R, store: S) -> Self {
        let stored_high_score = match store.load() {
            Ok(score) => score,
            Err(err) => {
                warn!(error = %err, "could not read high score, starting from 0");
                0
            }
        };

        Self {
            config,
            rng,
            store,
            stored_high_score,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fresh run carrying the stored high score
    pub fn start(&mut self) -> GameState {
        let mut state = self.initial_state();
        state.high_score = self.stored_high_score;
        state
    }

    /// Start a new run in place. The high score is kept.
    pub fn reset(&mut self, state: &mut GameState) {
        let high_score = state.high_score;
        *state = self.initial_state();
        state.high_score = high_score;
        debug!(high_score, "run reset");
    }

    fn initial_state(&mut self) -> GameState {
        let centre = (self.config.grid_size / 2) as i32;
        let snake = Snake::new(
            Position::new(centre, centre),
            self.config.initial_direction,
            self.config.initial_snake_length,
        );

        // A fresh snake never fills a validated grid.
        let food = self
            .spawn_food(&snake, self.config.grid_size)
            .unwrap_or(Position::new(0, 0));

        GameState::new(
            snake,
            food,
            self.config.initial_direction,
            self.config.grid_size,
        )
    }

    /// Advance the run by one tick
    pub fn tick(&mut self, state: &mut GameState) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if state.is_over() {
            return outcome;
        }

        let direction = state.steering.latch();
        let new_head = state.snake.head().step(direction);

        if let Some(reason) = self.check_collision(state, new_head) {
            self.finish(state, reason);
            outcome.game_over = Some(reason);
            return outcome;
        }

        let ate_food = new_head == state.food;
        state.snake.advance(new_head, ate_food);
        outcome.ate_food = ate_food;

        if ate_food {
            state.score += self.config.food_reward;
            match self.spawn_food(&state.snake, state.grid_size()) {
                Some(food) => state.food = food,
                None => {
                    self.finish(state, GameOver::BoardFull);
                    outcome.game_over = Some(GameOver::BoardFull);
                }
            }
        }

        outcome.new_high_score = self.record_high_score(state);
        outcome
    }

    fn check_collision(&self, state: &GameState, head: Position) -> Option<GameOver> {
        if !state.is_in_bounds(head) {
            return Some(GameOver::Wall);
        }

        // Checked against the whole body, including the tail cell that is
        // about to move away.
        if state.snake.contains(head) {
            return Some(GameOver::SelfCollision);
        }

        None
    }

    fn finish(&mut self, state: &mut GameState, reason: GameOver) {
        state.phase = Phase::Over(reason);
        info!(score = state.score, high_score = state.high_score, %reason, "game over");
    }

    fn record_high_score(&mut self, state: &mut GameState) -> bool {
        if state.score <= state.high_score {
            return false;
        }

        state.high_score = state.score;
        if state.high_score > self.stored_high_score {
            match self.store.save(state.high_score) {
                Ok(()) => self.stored_high_score = state.high_score,
                Err(err) => warn!(error = %err, "failed to persist high score"),
            }
        }
        debug!(high_score = state.high_score, "new high score");
        true
    }

    /// Pick a random free cell for food.
    ///
    /// Uses rejection sampling, then falls back to a uniform pick over the
    /// free cells so a crowded board still terminates. `None` means the
    /// snake covers the whole `grid_size` x `grid_size` grid.
    pub fn spawn_food(&mut self, snake: &Snake, grid_size: usize) -> Option<Position> {
        let size = grid_size;
        let cells = size * size;
        if snake.len() >= cells {
            return None;
        }

        for _ in 0..cells * 4 {
            let pos = Position::new(
                self.rng.gen_range(0..size) as i32,
                self.rng.gen_range(0..size) as i32,
            );
            if !snake.contains(pos) {
                return Some(pos);
            }
        }

        let free: Vec<Position> = (0..size as i32)
            .flat_map(|y| (0..size as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !snake.contains(*pos))
            .collect();

        if free.is_empty() {
            None
        } else {
            Some(free[self.rng.gen_range(0..free.len())])
        }
    }
}
