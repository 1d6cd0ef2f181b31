//! Platform abstraction layer
//!
//! Browser glue lives in `web` (wasm32 only): it wires LocalStorage and
//! keyboard input into the engine. Native hosts use [`crate::Engine`]
//! directly.

#[cfg(target_arch = "wasm32")]
pub mod web;
