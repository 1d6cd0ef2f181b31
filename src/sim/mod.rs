//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per call, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod effects;
pub mod food;
pub mod grid;
pub mod state;
pub mod tick;

pub use effects::{ActiveEffect, EffectKind, EffectLedger};
pub use food::generate_food;
pub use grid::{Direction, Position};
pub use state::{Cell, DeathCause, Food, FoodKind, GameEvent, GamePhase, GameState, Snapshot};
pub use tick::{step, tick};
