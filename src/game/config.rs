use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// Largest grid the desk can lay out
pub const MAX_GRID_SIZE: usize = 100;

/// Configuration for the grid simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width and height of the square grid
    pub grid_size: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Heading of a fresh run
    pub initial_direction: Direction,
    /// Milliseconds between ticks
    pub tick_interval_ms: u64,
    /// Score awarded per food item
    pub food_reward: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_snake_length: 3,
            initial_direction: Direction::Up,
            tick_interval_ms: 120,
            food_reward: 10,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.grid_size < 4 {
            return Err(format!("grid_size must be at least 4, got {}", self.grid_size));
        }

        if self.grid_size > MAX_GRID_SIZE {
            return Err(format!(
                "grid_size must be at most {MAX_GRID_SIZE}, got {}",
                self.grid_size
            ));
        }

        if self.initial_snake_length == 0 {
            return Err("initial_snake_length must be at least 1".to_string());
        }

        // The initial body trails from the centre towards one edge.
        let room = self.grid_size / 2;
        if self.initial_snake_length > room {
            return Err(format!(
                "initial_snake_length ({}) does not fit a {}x{} grid",
                self.initial_snake_length, self.grid_size, self.grid_size
            ));
        }

        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be positive".to_string());
        }

        Ok(())
    }
}
