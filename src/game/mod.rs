//! Grid simulator for the snake game.
//!
//! Pure game logic without I/O or rendering. The engine takes its random
//! source and high-score store as parameters.

pub mod config;
pub mod direction;
pub mod engine;
pub mod state;
pub mod steering;

pub use config::{GameConfig, MAX_GRID_SIZE};
pub use direction::Direction;
pub use engine::{GameEngine, TickOutcome};
pub use state::{GameOver, GameState, Phase, Position, Snake};
pub use steering::Steering;
