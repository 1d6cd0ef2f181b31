//! Data-driven game balance
//!
//! Defaults mirror [`crate::consts`]. A tuning file only needs to name the
//! fields it overrides.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Smallest board that still fits the initial snake and food
pub const MIN_GRID_SIZE: i32 = 5;

/// Largest board accepted from a tuning file
pub const MAX_GRID_SIZE: i32 = 200;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("cannot read tuning file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("tuning is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("grid_size {0} must be between {min} and {max}", min = MIN_GRID_SIZE, max = MAX_GRID_SIZE)]
    GridSize(i32),
    #[error("{field} must be non-zero")]
    ZeroSpeed { field: &'static str },
    #[error("spawn thresholds must satisfy 0 <= speed ({speed}) <= double_score ({double_score}) <= 1")]
    Thresholds { speed: f64, double_score: f64 },
}

/// Balance knobs for a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Cells per side of the board
    pub grid_size: i32,
    /// Tick interval without a speed effect (ms)
    pub base_speed_ms: u64,
    /// Tick interval while a speed effect is active (ms)
    pub fast_speed_ms: u64,
    /// Lifetime of a power-up effect
    pub effect_duration_ticks: u32,
    /// Points per food
    pub food_points: u64,
    /// Points per food while double score is active
    pub double_food_points: u64,
    /// Spawn roll above this yields a speed food
    pub speed_food_threshold: f64,
    /// Spawn roll above this yields a double-score food
    pub double_score_food_threshold: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            base_speed_ms: BASE_SPEED.as_millis() as u64,
            fast_speed_ms: FAST_SPEED.as_millis() as u64,
            effect_duration_ticks: EFFECT_DURATION_TICKS,
            food_points: FOOD_POINTS,
            double_food_points: DOUBLE_FOOD_POINTS,
            speed_food_threshold: SPEED_FOOD_THRESHOLD,
            double_score_food_threshold: DOUBLE_SCORE_FOOD_THRESHOLD,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a JSON tuning file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> String {
        // Plain scalars only
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(TuningError::GridSize(self.grid_size));
        }
        if self.base_speed_ms == 0 {
            return Err(TuningError::ZeroSpeed {
                field: "base_speed_ms",
            });
        }
        if self.fast_speed_ms == 0 {
            return Err(TuningError::ZeroSpeed {
                field: "fast_speed_ms",
            });
        }
        let speed = self.speed_food_threshold;
        let double_score = self.double_score_food_threshold;
        if !(0.0..=1.0).contains(&speed)
            || !(0.0..=1.0).contains(&double_score)
            || speed > double_score
        {
            return Err(TuningError::Thresholds {
                speed,
                double_score,
            });
        }
        Ok(())
    }

    pub fn base_speed(&self) -> Duration {
        Duration::from_millis(self.base_speed_ms)
    }

    pub fn fast_speed(&self) -> Duration {
        Duration::from_millis(self.fast_speed_ms)
    }

    /// Total number of cells on the board
    pub fn cell_count(&self) -> usize {
        let side = usize::try_from(self.grid_size).unwrap_or(0);
        side.saturating_mul(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.grid_size, 20);
        assert_eq!(tuning.base_speed(), Duration::from_millis(150));
        assert_eq!(tuning.fast_speed(), Duration::from_millis(80));
        assert_eq!(tuning.cell_count(), 400);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "grid_size": 12, "fast_speed_ms": 60 }"#).unwrap();
        assert_eq!(tuning.grid_size, 12);
        assert_eq!(tuning.fast_speed_ms, 60);
        assert_eq!(tuning.base_speed_ms, 150);
        assert_eq!(tuning.effect_duration_ticks, 100);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "grid_size": 3 }"#),
            Err(TuningError::GridSize(3))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "base_speed_ms": 0 }"#),
            Err(TuningError::ZeroSpeed { .. })
        ));
        assert!(matches!(
            Tuning::from_json(
                r#"{ "speed_food_threshold": 0.95, "double_score_food_threshold": 0.9 }"#
            ),
            Err(TuningError::Thresholds { .. })
        ));
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = Tuning::from_path("/nonexistent/neon-snake/tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/neon-snake/tuning.json"));
    }

    #[test]
    fn test_negative_grid_has_no_cells() {
        let tuning = Tuning {
            grid_size: -3,
            ..Default::default()
        };
        assert_eq!(tuning.cell_count(), 0);
        assert!(matches!(tuning.validate(), Err(TuningError::GridSize(-3))));
    }

    #[test]
    fn test_json_roundtrip() {
        let tuning = Tuning {
            grid_size: 8,
            ..Default::default()
        };
        assert_eq!(Tuning::from_json(&tuning.to_json()).unwrap(), tuning);
    }
}
