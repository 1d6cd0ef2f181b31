//! Neon Snake entry point
//!
//! The browser build is driven from JavaScript through `platform::web`.
//! Natively this runs a headless game with a simple autopilot on a simulated
//! clock and prints the final board.
//!
//! Usage: `neon-snake [tuning.json]` (seed from `NEON_SNAKE_SEED`)

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Snake (native) starting...");

    if let Err(err) = native::run() {
        log::error!("{}", err);
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use neon_snake::sim::{Cell, Direction, FoodKind, GameEvent, GameState, Position};
    use neon_snake::{Engine, MemoryStore, Tuning, TuningError};

    /// Give up after this many steps if the autopilot never dies
    const MAX_DEMO_STEPS: u64 = 20_000;

    pub fn run() -> Result<(), TuningError> {
        let tuning = match std::env::args().nth(1) {
            Some(path) => {
                let tuning = Tuning::from_path(&path)?;
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            None => Tuning::default(),
        };
        let seed = std::env::var("NEON_SNAKE_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        let mut engine = Engine::new(tuning, seed, MemoryStore::new())?;
        engine.start();

        let mut simulated = Duration::ZERO;
        while engine.state().is_playing() && engine.state().time_ticks < MAX_DEMO_STEPS {
            engine.request_direction(autopilot(engine.state()));
            let wait = engine.driver().time_until_next().unwrap_or(Duration::ZERO);
            simulated += wait;
            for event in engine.update(wait) {
                match event {
                    GameEvent::EffectGained(kind) => log::info!("Picked up {:?}", kind),
                    GameEvent::EffectExpired(kind) => log::info!("{:?} wore off", kind),
                    _ => {}
                }
            }
        }

        let state = engine.state();
        println!("{}", render(state));
        println!(
            "score {}  high {}  length {}  steps {}  time {:.1}s{}",
            state.score,
            state.high_score,
            state.snake.len(),
            state.time_ticks,
            simulated.as_secs_f64(),
            if state.is_won() { "  BOARD CLEARED" } else { "" }
        );
        Ok(())
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    /// Greedy chase: head toward the food, never into a wall or body cell
    fn autopilot(state: &GameState) -> Direction {
        let head = state.head();
        let food = state.food.pos;
        let grid = state.tuning.grid_size;
        let safe = |dir: Direction| {
            let next = head.step(dir);
            next.in_bounds(grid) && !state.occupies(next)
        };

        let mut preferred = Vec::with_capacity(4);
        if food.x < head.x {
            preferred.push(Direction::Left);
        } else if food.x > head.x {
            preferred.push(Direction::Right);
        }
        if food.y < head.y {
            preferred.push(Direction::Up);
        } else if food.y > head.y {
            preferred.push(Direction::Down);
        }
        preferred.extend(Direction::ALL);

        preferred
            .into_iter()
            .filter(|dir| !dir.is_opposite(state.direction))
            .find(|dir| safe(*dir))
            .unwrap_or(state.direction)
    }

    fn render(state: &GameState) -> String {
        let grid = state.tuning.grid_size;
        let mut out = String::with_capacity(((grid + 3) * (grid + 2)) as usize);
        out.push_str(&"#".repeat(grid as usize + 2));
        out.push('\n');
        for y in 0..grid {
            out.push('#');
            for x in 0..grid {
                out.push(match state.cell_at(Position::new(x, y)) {
                    Cell::Head => '@',
                    Cell::Body => 'o',
                    Cell::Food(kind) => match kind {
                        FoodKind::Normal => '*',
                        FoodKind::Speed => '>',
                        FoodKind::DoubleScore => '$',
                    },
                    Cell::Empty => ' ',
                });
            }
            out.push_str("#\n");
        }
        out.push_str(&"#".repeat(grid as usize + 2));
        out
    }
}
