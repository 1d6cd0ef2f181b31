//! Host-facing game engine
//!
//! Owns the game state, the input latch, the tick driver and the high-score
//! store. A host calls [`Engine::update`] from whatever loop it has (timer,
//! frame callback, test harness) with the time elapsed since the last call.

use std::time::Duration;

use crate::consts::MAX_STEPS_PER_UPDATE;
use crate::driver::{TickDriver, interval_for};
use crate::highscores::HighScore;
use crate::input::{InputLatch, direction_for_key};
use crate::persistence::KeyValueStore;
use crate::sim::{Direction, GameEvent, GameState, tick};
use crate::tuning::{Tuning, TuningError};

pub struct Engine<S: KeyValueStore> {
    state: GameState,
    latch: InputLatch,
    driver: TickDriver,
    store: S,
}

impl<S: KeyValueStore> Engine<S> {
    /// Create an idle engine, reading the persisted high score once.
    /// Rejects a tuning that fails [`Tuning::validate`].
    pub fn new(tuning: Tuning, seed: u64, store: S) -> Result<Self, TuningError> {
        let high_score = HighScore::load(&store);
        Ok(Self {
            state: GameState::new(tuning, seed)?.with_high_score(high_score.value),
            latch: InputLatch::new(Direction::Up),
            driver: TickDriver::new(),
            store,
        })
    }

    /// Start a new run (also used to restart after game over)
    pub fn start(&mut self) {
        self.state.reset();
        self.latch.reset(self.state.direction);
        self.latch.set_accepting(true);
        self.driver.start(interval_for(&self.state));
        log::info!(
            "Game started (seed {}, high score {})",
            self.state.seed,
            self.state.high_score
        );
    }

    /// Cancel stepping. Idempotent; the run itself is left as is.
    pub fn stop(&mut self) {
        self.driver.stop();
    }

    /// Restart stepping after [`Engine::stop`] if the run is still live
    pub fn resume(&mut self) {
        if self.state.is_playing() && !self.driver.is_running() {
            self.driver.start(interval_for(&self.state));
        }
    }

    /// Queue a direction for the next step. Ignored unless playing.
    pub fn request_direction(&self, direction: Direction) -> bool {
        self.state.is_playing() && self.latch.submit(direction)
    }

    /// Map a key name and queue it. Returns false for unmapped keys or
    /// when not playing.
    pub fn press_key(&self, key: &str) -> bool {
        direction_for_key(key).is_some_and(|dir| self.request_direction(dir))
    }

    /// Feed elapsed host time and run every step that came due
    pub fn update(&mut self, elapsed: Duration) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.driver.advance(elapsed);

        let mut steps = 0;
        while self.driver.take_due() {
            events.extend(self.run_step());
            steps += 1;
            if steps >= MAX_STEPS_PER_UPDATE {
                self.driver.discard_backlog();
                break;
            }
        }
        events
    }

    /// Run one step immediately, bypassing the driver's timing
    pub fn step_now(&mut self) -> Vec<GameEvent> {
        if !self.state.is_playing() {
            return Vec::new();
        }
        self.run_step()
    }

    fn run_step(&mut self) -> Vec<GameEvent> {
        let events = tick(&mut self.state, self.latch.current());

        for event in &events {
            match event {
                GameEvent::EffectGained(kind) => log::debug!("Effect {:?} gained", kind),
                GameEvent::FoodEaten { kind, points, .. } => {
                    log::debug!("Ate {:?} food (+{})", kind, points)
                }
                _ => {}
            }
        }

        if let Some(terminal) = events.iter().find(|e| e.is_terminal()) {
            self.finish_run(terminal);
        } else {
            // Speed may have changed on pickup or expiry
            self.driver.reschedule(interval_for(&self.state));
        }
        events
    }

    fn finish_run(&mut self, event: &GameEvent) {
        self.driver.stop();
        self.latch.set_accepting(false);
        // The step already folded the score into the state's high score
        HighScore::new(self.state.high_score).save(&mut self.store);

        match event {
            GameEvent::GameOver { cause, score, .. } => {
                log::info!("Game over ({:?}) with score {}", cause, score)
            }
            GameEvent::BoardCleared { score, .. } => {
                log::info!("Board cleared with score {}", score)
            }
            _ => {}
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn driver(&self) -> &TickDriver {
        &self.driver
    }

    /// Shared handle to the input latch (for input threads)
    pub fn latch(&self) -> InputLatch {
        self.latch.clone()
    }

    pub fn high_score(&self) -> u64 {
        self.state.high_score
    }

    /// Interval the next step will fire at (None while stopped)
    pub fn current_speed(&self) -> Option<Duration> {
        self.driver.interval()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
