//! Food placement
//!
//! Rejection-samples a random cell (and a weighted kind) until it lands off
//! the snake. After [`MAX_SAMPLE_ATTEMPTS`] misses it picks directly among
//! the free cells; placement stays uniform over free cells either way.

use std::collections::{HashSet, VecDeque};

use rand::Rng;

use super::grid::Position;
use super::state::{Food, FoodKind};
use crate::tuning::Tuning;

/// Rejection samples tried before enumerating free cells
pub const MAX_SAMPLE_ATTEMPTS: u32 = 64;

/// Map a uniform roll in [0, 1) to a food kind
pub fn roll_kind(roll: f64, tuning: &Tuning) -> FoodKind {
    if roll > tuning.double_score_food_threshold {
        FoodKind::DoubleScore
    } else if roll > tuning.speed_food_threshold {
        FoodKind::Speed
    } else {
        FoodKind::Normal
    }
}

/// Place a new food off the snake. Returns None when the board is full.
pub fn generate_food<R: Rng>(
    snake: &VecDeque<Position>,
    tuning: &Tuning,
    rng: &mut R,
) -> Option<Food> {
    let grid = tuning.grid_size;
    if snake.len() >= tuning.cell_count() {
        return None;
    }

    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let pos = Position::new(rng.random_range(0..grid), rng.random_range(0..grid));
        let kind = roll_kind(rng.random::<f64>(), tuning);
        if !snake.contains(&pos) {
            return Some(Food { pos, kind });
        }
    }

    // Crowded board: choose uniformly among what's left
    let occupied: HashSet<Position> = snake.iter().copied().collect();
    let free: Vec<Position> = (0..grid)
        .flat_map(|y| (0..grid).map(move |x| Position::new(x, y)))
        .filter(|p| !occupied.contains(p))
        .collect();
    if free.is_empty() {
        return None;
    }
    let pos = free[rng.random_range(0..free.len())];
    let kind = roll_kind(rng.random::<f64>(), tuning);
    Some(Food { pos, kind })
}
