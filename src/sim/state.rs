//! Game state and core simulation types
//!
//! Everything the step function reads or writes lives here.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::{EffectKind, EffectLedger};
use super::food::generate_food;
use super::grid::{Direction, Position};
use crate::consts::INITIAL_SNAKE_LENGTH;
use crate::highscores::HighScore;
use crate::tuning::{Tuning, TuningError};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start command
    #[default]
    Ready,
    /// Active gameplay
    Playing,
    /// Run ended on a collision
    GameOver,
    /// Snake filled the whole board
    BoardCleared,
}

/// Food types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FoodKind {
    #[default]
    Normal,
    Speed,
    DoubleScore,
}

impl FoodKind {
    /// Effect granted when eaten (None for plain food)
    pub fn effect(self) -> Option<EffectKind> {
        match self {
            FoodKind::Normal => None,
            FoodKind::Speed => Some(EffectKind::Speed),
            FoodKind::DoubleScore => Some(EffectKind::DoubleScore),
        }
    }
}

/// A food item on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub pos: Position,
    pub kind: FoodKind,
}

/// What killed the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Wall,
    SelfCollision,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    FoodEaten {
        kind: FoodKind,
        points: u64,
        at: Position,
    },
    EffectGained(EffectKind),
    EffectExpired(EffectKind),
    GameOver {
        cause: DeathCause,
        score: u64,
        high_score: u64,
        new_record: bool,
    },
    BoardCleared {
        score: u64,
        high_score: u64,
        new_record: bool,
    },
}

impl GameEvent {
    /// True for the events that end a run
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GameEvent::GameOver { .. } | GameEvent::BoardCleared { .. }
        )
    }
}

/// What a presenter should draw in a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Head,
    Body,
    Food(FoodKind),
}

/// Read-only view handed to presentation
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub grid_size: i32,
    pub snake: &'a VecDeque<Position>,
    pub food: Food,
    pub direction: Direction,
    pub effects: &'a EffectLedger,
    pub score: u64,
    pub high_score: u64,
    pub is_playing: bool,
    pub game_over: bool,
    pub won: bool,
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Balance knobs for this run
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Snake body, head first
    pub snake: VecDeque<Position>,
    /// Direction applied on the last step
    pub direction: Direction,
    pub food: Food,
    pub effects: EffectLedger,
    pub score: u64,
    /// Best score seen, never decreases
    pub high_score: u64,
    pub phase: GamePhase,
    /// Steps taken this run
    pub time_ticks: u64,
    /// Food placement RNG (not persisted)
    #[serde(skip, default = "default_rng")]
    rng: Pcg32,
}

impl GameState {
    /// Create an idle game state with the given seed.
    /// Fails if `tuning` does not describe a playable board.
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        let grid = tuning.grid_size;
        let quarter = grid / 4;
        Ok(Self {
            tuning,
            seed,
            snake: Self::initial_snake(grid),
            direction: Direction::Up,
            food: Food {
                pos: Position::new(quarter, quarter),
                kind: FoodKind::Normal,
            },
            effects: EffectLedger::new(),
            score: 0,
            high_score: 0,
            phase: GamePhase::Ready,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    /// Builder-style high score seed (from persisted storage)
    pub fn with_high_score(mut self, high_score: u64) -> Self {
        self.high_score = self.high_score.max(high_score);
        self
    }

    /// Vertical three-cell snake in the centre column, head up
    fn initial_snake(grid: i32) -> VecDeque<Position> {
        let center = grid / 2;
        (0..INITIAL_SNAKE_LENGTH as i32)
            .map(|i| Position::new(center, center + i))
            .collect()
    }

    /// Begin a fresh run, keeping the high score
    pub fn reset(&mut self) {
        self.snake = Self::initial_snake(self.tuning.grid_size);
        self.direction = Direction::Up;
        self.effects.clear();
        self.score = 0;
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
        // The board is never full right after a reset
        self.respawn_food();
    }

    pub fn head(&self) -> Position {
        // Snake is never empty
        self.snake.front().copied().unwrap_or_default()
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// True after any terminal transition (collision or cleared board)
    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver | GamePhase::BoardCleared)
    }

    pub fn is_won(&self) -> bool {
        self.phase == GamePhase::BoardCleared
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.snake.contains(&pos)
    }

    /// Project a board cell for drawing
    pub fn cell_at(&self, pos: Position) -> Cell {
        if self.snake.front() == Some(&pos) {
            Cell::Head
        } else if self.snake.contains(&pos) {
            Cell::Body
        } else if self.food.pos == pos && !self.is_won() {
            Cell::Food(self.food.kind)
        } else {
            Cell::Empty
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid_size: self.tuning.grid_size,
            snake: &self.snake,
            food: self.food,
            direction: self.direction,
            effects: &self.effects,
            score: self.score,
            high_score: self.high_score,
            is_playing: self.is_playing(),
            game_over: self.is_game_over(),
            won: self.is_won(),
        }
    }

    /// End the run, folding the score into the high score.
    /// Returns whether the high score was beaten.
    pub(crate) fn finish(&mut self, phase: GamePhase) -> bool {
        let mut best = HighScore::new(self.high_score);
        let new_record = best.record(self.score);
        self.high_score = best.value;
        self.phase = phase;
        new_record
    }

    /// Place a fresh food off the snake. False when no cell is free.
    pub(crate) fn respawn_food(&mut self) -> bool {
        match generate_food(&self.snake, &self.tuning, &mut self.rng) {
            Some(food) => {
                self.food = food;
                true
            }
            None => false,
        }
    }
}
