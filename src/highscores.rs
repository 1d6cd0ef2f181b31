//! Persistent high score
//!
//! A single non-negative integer stored as decimal text under
//! [`HIGH_SCORE_KEY`]. Read once at start-up, written once per finished run.

use crate::consts::HIGH_SCORE_KEY;
use crate::persistence::KeyValueStore;

/// Best score across runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    pub value: u64,
}

impl HighScore {
    pub fn new(value: u64) -> Self {
        Self { value }
    }

    /// Parse stored text; None if it is not a non-negative integer
    pub fn parse(text: &str) -> Option<u64> {
        text.trim().parse::<u64>().ok()
    }

    /// Load from the store. Absent or malformed data reads as 0.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match store.get(HIGH_SCORE_KEY) {
            Some(text) => match Self::parse(&text) {
                Some(value) => {
                    log::info!("Loaded high score {}", value);
                    Self::new(value)
                }
                None => {
                    log::debug!("Ignoring malformed high score {:?}", text);
                    Self::default()
                }
            },
            None => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
        }
    }

    /// Write to the store. Failures are logged and dropped.
    /// Returns whether the write went through.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> bool {
        match store.set(HIGH_SCORE_KEY, &self.value.to_string()) {
            Ok(()) => {
                log::info!("High score saved ({})", self.value);
                true
            }
            Err(err) => {
                log::warn!("High score not saved: {}", err);
                false
            }
        }
    }

    /// Check if a score would beat the record
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.value
    }

    /// Fold a finished run's score in. Returns true on a new record.
    pub fn record(&mut self, score: u64) -> bool {
        let beaten = self.qualifies(score);
        self.value = self.value.max(score);
        beaten
    }
}
