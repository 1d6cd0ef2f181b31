//! Variable-interval tick scheduling
//!
//! The driver does not own a clock. The host feeds elapsed time with
//! [`TickDriver::advance`] and pulls due steps one at a time with
//! [`TickDriver::take_due`], so the interval can change between any two steps.

use std::time::Duration;

use crate::sim::GameState;

/// Shortest interval the driver will run at
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
    #[default]
    Stopped,
    Running {
        /// Time between steps
        interval: Duration,
        /// Time fed in since the last step fired
        elapsed: Duration,
    },
}

/// Periodic step scheduler
#[derive(Debug, Clone, Default)]
pub struct TickDriver {
    state: DriverState,
}

impl TickDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin (or restart) periodic stepping from zero elapsed time
    pub fn start(&mut self, interval: Duration) {
        let interval = interval.max(MIN_INTERVAL);
        log::debug!("Tick driver started at {:?}", interval);
        self.state = DriverState::Running {
            interval,
            elapsed: Duration::ZERO,
        };
    }

    /// Cancel stepping. Idempotent; pending time is discarded so nothing
    /// fires after this returns.
    pub fn stop(&mut self) {
        if self.is_running() {
            log::debug!("Tick driver stopped");
        }
        self.state = DriverState::Stopped;
    }

    /// Swap the interval in one cancel+rearm. Time already elapsed since the
    /// last step counts toward the new interval. Returns true if it changed.
    pub fn reschedule(&mut self, new_interval: Duration) -> bool {
        let new_interval = new_interval.max(MIN_INTERVAL);
        match &mut self.state {
            DriverState::Running { interval, .. } if *interval != new_interval => {
                log::debug!("Tick interval {:?} -> {:?}", interval, new_interval);
                *interval = new_interval;
                true
            }
            _ => false,
        }
    }

    /// Feed host time (ignored while stopped)
    pub fn advance(&mut self, dt: Duration) {
        if let DriverState::Running { elapsed, .. } = &mut self.state {
            *elapsed = elapsed.saturating_add(dt);
        }
    }

    /// Consume one due step if enough time has accumulated
    pub fn take_due(&mut self) -> bool {
        match &mut self.state {
            DriverState::Running { interval, elapsed } if *elapsed >= *interval => {
                *elapsed -= *interval;
                true
            }
            _ => false,
        }
    }

    /// Drop accumulated backlog beyond the current partial interval
    pub fn discard_backlog(&mut self) {
        if let DriverState::Running { interval, elapsed } = &mut self.state {
            if *elapsed >= *interval {
                *elapsed = Duration::from_nanos((elapsed.as_nanos() % interval.as_nanos()) as u64);
            }
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, DriverState::Running { .. })
    }

    /// Current interval, None while stopped
    pub fn interval(&self) -> Option<Duration> {
        match self.state {
            DriverState::Running { interval, .. } => Some(interval),
            DriverState::Stopped => None,
        }
    }

    /// Time left before the next step fires, None while stopped
    pub fn time_until_next(&self) -> Option<Duration> {
        match self.state {
            DriverState::Running { interval, elapsed } => Some(interval.saturating_sub(elapsed)),
            DriverState::Stopped => None,
        }
    }
}

/// Convert host milliseconds to a duration. Negative, NaN and
/// out-of-range values count as no time passing.
pub fn elapsed_from_ms(ms: f64) -> Duration {
    Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::ZERO)
}

/// Step interval the game state calls for right now
pub fn interval_for(state: &GameState) -> Duration {
    if state.effects.is_speed_active() {
        state.tuning.fast_speed()
    } else {
        state.tuning.base_speed()
    }
}
