//! Neon Snake - A tick-driven grid arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, food, effects)
//! - `driver`: Variable-interval tick scheduling
//! - `input`: Single-slot direction latch and key mapping
//! - `engine`: Host-facing facade tying the pieces together
//! - `persistence`: Injected key-value storage
//! - `tuning`: Data-driven game balance

pub mod driver;
pub mod engine;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use driver::{DriverState, TickDriver};
pub use engine::Engine;
pub use highscores::HighScore;
pub use input::InputLatch;
pub use persistence::{KeyValueStore, MemoryStore, StoreError};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Cells per side of the square board
    pub const GRID_SIZE: i32 = 20;

    /// Tick interval without a speed effect
    pub const BASE_SPEED: Duration = Duration::from_millis(150);
    /// Tick interval while a speed effect is active
    pub const FAST_SPEED: Duration = Duration::from_millis(80);

    /// Lifetime of a power-up effect
    pub const EFFECT_DURATION_TICKS: u32 = 100;

    /// Points per food
    pub const FOOD_POINTS: u64 = 10;
    /// Points per food while double score is active
    pub const DOUBLE_FOOD_POINTS: u64 = 20;

    /// Spawn roll above this yields a speed food
    pub const SPEED_FOOD_THRESHOLD: f64 = 0.80;
    /// Spawn roll above this yields a double-score food
    pub const DOUBLE_SCORE_FOOD_THRESHOLD: f64 = 0.90;

    /// Initial snake length
    pub const INITIAL_SNAKE_LENGTH: usize = 3;

    /// Maximum steps run per host update to prevent spiral of death
    pub const MAX_STEPS_PER_UPDATE: u32 = 8;

    /// Storage key for the persisted high score
    pub const HIGH_SCORE_KEY: &str = "snakeHighScore";
}
