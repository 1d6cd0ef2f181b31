//! Direction input
//!
//! Key and button events write into a single-slot latch; each step reads the
//! latest value. Events between two steps collapse to the last one written.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::sim::Direction;

#[derive(Debug)]
struct Slot {
    pending: AtomicU8,
    accepting: AtomicBool,
}

/// Single-slot direction mailbox.
///
/// Clones share the same slot, so an input thread and the game loop can each
/// hold a handle.
#[derive(Debug, Clone)]
pub struct InputLatch {
    slot: Arc<Slot>,
}

impl Default for InputLatch {
    fn default() -> Self {
        Self::new(Direction::Up)
    }
}

impl InputLatch {
    /// Create a closed latch holding `initial`
    pub fn new(initial: Direction) -> Self {
        Self {
            slot: Arc::new(Slot {
                pending: AtomicU8::new(initial.to_bits()),
                accepting: AtomicBool::new(false),
            }),
        }
    }

    /// Overwrite the pending direction. Returns false (and drops the input)
    /// while the latch is closed.
    pub fn submit(&self, direction: Direction) -> bool {
        if !self.is_accepting() {
            return false;
        }
        self.slot
            .pending
            .store(direction.to_bits(), Ordering::Release);
        true
    }

    /// Latest direction; reading does not clear it
    pub fn current(&self) -> Direction {
        Direction::from_bits(self.slot.pending.load(Ordering::Acquire))
    }

    /// Force the pending direction (new run)
    pub fn reset(&self, direction: Direction) {
        self.slot
            .pending
            .store(direction.to_bits(), Ordering::Release);
    }

    /// Open or close the latch to new input
    pub fn set_accepting(&self, accepting: bool) {
        self.slot.accepting.store(accepting, Ordering::Release);
    }

    pub fn is_accepting(&self) -> bool {
        self.slot.accepting.load(Ordering::Acquire)
    }
}

/// Map a key name (DOM `KeyboardEvent.key` style) to a direction
pub fn direction_for_key(key: &str) -> Option<Direction> {
    match key.to_ascii_lowercase().as_str() {
        "w" | "arrowup" => Some(Direction::Up),
        "s" | "arrowdown" => Some(Direction::Down),
        "a" | "arrowleft" => Some(Direction::Left),
        "d" | "arrowright" => Some(Direction::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_latch_drops_input() {
        let latch = InputLatch::new(Direction::Up);
        assert!(!latch.submit(Direction::Left));
        assert_eq!(latch.current(), Direction::Up);
    }

    #[test]
    fn test_last_write_wins() {
        let latch = InputLatch::new(Direction::Up);
        latch.set_accepting(true);
        latch.submit(Direction::Left);
        latch.submit(Direction::Down);
        latch.submit(Direction::Right);
        assert_eq!(latch.current(), Direction::Right);
        // Reading does not consume
        assert_eq!(latch.current(), Direction::Right);
    }

    #[test]
    fn test_clones_share_slot() {
        let latch = InputLatch::default();
        latch.set_accepting(true);
        let handle = latch.clone();
        let writer = std::thread::spawn(move || {
            handle.submit(Direction::Left);
        });
        writer.join().unwrap();
        assert_eq!(latch.current(), Direction::Left);
    }

    #[test]
    fn test_reset_ignores_gate() {
        let latch = InputLatch::new(Direction::Left);
        latch.reset(Direction::Up);
        assert_eq!(latch.current(), Direction::Up);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(direction_for_key("w"), Some(Direction::Up));
        assert_eq!(direction_for_key("W"), Some(Direction::Up));
        assert_eq!(direction_for_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(direction_for_key("s"), Some(Direction::Down));
        assert_eq!(direction_for_key("ArrowDown"), Some(Direction::Down));
        assert_eq!(direction_for_key("a"), Some(Direction::Left));
        assert_eq!(direction_for_key("arrowleft"), Some(Direction::Left));
        assert_eq!(direction_for_key("D"), Some(Direction::Right));
        assert_eq!(direction_for_key("ArrowRight"), Some(Direction::Right));
        assert_eq!(direction_for_key("q"), None);
        assert_eq!(direction_for_key(" "), None);
    }
}
