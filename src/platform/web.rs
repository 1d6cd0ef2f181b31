//! wasm-bindgen surface for a browser presenter
//!
//! The page owns the timer and the DOM. Each frame it calls `update` with the
//! elapsed milliseconds and redraws from `snapshotJson`.

use wasm_bindgen::prelude::*;

use crate::driver::elapsed_from_ms;
use crate::engine::Engine;
use crate::persistence::LocalStorageStore;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // Ignore double init when the module is loaded twice
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Neon Snake (wasm) loaded");
}

/// Engine handle exported to JavaScript
#[wasm_bindgen]
pub struct WebEngine {
    engine: Engine<LocalStorageStore>,
}

#[wasm_bindgen]
impl WebEngine {
    /// Create an engine, optionally from a JSON tuning document
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> Result<WebEngine, JsValue> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Tuning::default(),
        };
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64 ^ js_sys::Date::now() as u64;
        let engine = Engine::new(tuning, seed, LocalStorageStore::new())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { engine })
    }

    pub fn start(&mut self) {
        self.engine.start();
    }

    pub fn stop(&mut self) {
        self.engine.stop();
    }

    pub fn resume(&mut self) {
        self.engine.resume();
    }

    /// Forward a `KeyboardEvent.key`. Returns true if it was a direction key
    /// and the game accepted it (so the page can `preventDefault`).
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&self, key: &str) -> bool {
        self.engine.press_key(key)
    }

    /// Advance by `elapsed_ms`; returns the tick's events as JSON
    pub fn update(&mut self, elapsed_ms: f64) -> String {
        let events = self.engine.update(elapsed_from_ms(elapsed_ms));
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    /// Full drawable state as JSON
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.engine.state().snapshot()).unwrap_or_default()
    }

    /// Milliseconds until the next step, undefined while stopped
    #[wasm_bindgen(js_name = nextTickMs)]
    pub fn next_tick_ms(&self) -> Option<f64> {
        self.engine
            .driver()
            .time_until_next()
            .map(|d| d.as_secs_f64() * 1000.0)
    }

    #[wasm_bindgen(js_name = highScore)]
    pub fn high_score(&self) -> f64 {
        self.engine.high_score() as f64
    }
}
