//! Timed power-up effects
//!
//! Each effect kind is either absent or present exactly once with a positive
//! tick budget. Picking up the same kind again refreshes the budget.

use serde::{Deserialize, Serialize};

/// Power-up effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Shortens the tick interval
    Speed,
    /// Doubles points per food
    DoubleScore,
}

/// An effect currently influencing play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: EffectKind,
    /// Ticks left, always > 0 while stored
    pub remaining_ticks: u32,
}

/// Active power-up effects, in acquisition order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectLedger {
    effects: Vec<ActiveEffect>,
}

impl EffectLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) an effect. Replaces any existing effect of the same kind.
    pub fn grant(&mut self, kind: EffectKind, ticks: u32) {
        self.effects.retain(|e| e.kind != kind);
        if ticks > 0 {
            self.effects.push(ActiveEffect {
                kind,
                remaining_ticks: ticks,
            });
        }
    }

    /// Advance every effect by one tick, returning the kinds that expired
    pub fn tick_down(&mut self) -> Vec<EffectKind> {
        let mut expired = Vec::new();
        self.effects.retain_mut(|e| {
            e.remaining_ticks = e.remaining_ticks.saturating_sub(1);
            if e.remaining_ticks == 0 {
                expired.push(e.kind);
                false
            } else {
                true
            }
        });
        expired
    }

    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Consumed by the tick driver to pick the interval
    pub fn is_speed_active(&self) -> bool {
        self.is_active(EffectKind::Speed)
    }

    /// Consumed by the step function to pick the food value
    pub fn is_double_score_active(&self) -> bool {
        self.is_active(EffectKind::DoubleScore)
    }

    /// Ticks left for `kind`, if active
    pub fn remaining(&self, kind: EffectKind) -> Option<u32> {
        self.effects
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.remaining_ticks)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}
