//! Single simulation step
//!
//! Core game rule: move the snake one cell, resolve collisions, tick effects
//! down, then handle food. One call is one atomic step.

use super::grid::Direction;
use super::state::{DeathCause, GameEvent, GamePhase, GameState};

/// Advance the game state by one step, in place.
///
/// `pending` is the latest direction from the input latch. A reversal of the
/// current direction is ignored. Does nothing unless the game is playing.
pub fn tick(state: &mut GameState, pending: Direction) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.is_playing() {
        return events;
    }

    let direction = if pending.is_opposite(state.direction) {
        state.direction
    } else {
        pending
    };
    let head = state.head().step(direction);

    if !head.in_bounds(state.tuning.grid_size) {
        events.push(game_over(state, DeathCause::Wall));
        return events;
    }
    // Includes the tail cell, which has not moved yet
    if state.occupies(head) {
        events.push(game_over(state, DeathCause::SelfCollision));
        return events;
    }

    state.snake.push_front(head);
    state.direction = direction;
    state.time_ticks += 1;

    // Expire before scoring so a lapsing double score does not apply
    for kind in state.effects.tick_down() {
        log::debug!("Effect {:?} expired at tick {}", kind, state.time_ticks);
        events.push(GameEvent::EffectExpired(kind));
    }

    if head == state.food.pos {
        let eaten = state.food;
        let points = if state.effects.is_double_score_active() {
            state.tuning.double_food_points
        } else {
            state.tuning.food_points
        };
        state.score += points;
        events.push(GameEvent::FoodEaten {
            kind: eaten.kind,
            points,
            at: eaten.pos,
        });

        if let Some(effect) = eaten.kind.effect() {
            state
                .effects
                .grant(effect, state.tuning.effect_duration_ticks);
            events.push(GameEvent::EffectGained(effect));
        }

        // Snake keeps its tail this step (growth)
        if !state.respawn_food() {
            let new_record = state.finish(GamePhase::BoardCleared);
            events.push(GameEvent::BoardCleared {
                score: state.score,
                high_score: state.high_score,
                new_record,
            });
        }
    } else {
        state.snake.pop_back();
    }

    events
}

/// Pure form of [`tick`]: returns the next state, leaving `state` untouched
pub fn step(state: &GameState, pending: Direction) -> GameState {
    let mut next = state.clone();
    tick(&mut next, pending);
    next
}

fn game_over(state: &mut GameState, cause: DeathCause) -> GameEvent {
    let new_record = state.finish(GamePhase::GameOver);
    GameEvent::GameOver {
        cause,
        score: state.score,
        high_score: state.high_score,
        new_record,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::sim::effects::EffectKind;
    use crate::sim::grid::Position;
    use crate::sim::state::{Food, FoodKind};
    use crate::tuning::Tuning;

    /// Default board, playing, food parked in a far corner
    fn playing_state() -> GameState {
        let mut state = GameState::new(Tuning::default(), 12345).unwrap();
        state.phase = GamePhase::Playing;
        state.food = Food {
            pos: Position::new(0, 19),
            kind: FoodKind::Normal,
        };
        state
    }

    fn place_food(state: &mut GameState, x: i32, y: i32, kind: FoodKind) {
        state.food = Food {
            pos: Position::new(x, y),
            kind,
        };
    }

    fn body(state: &GameState) -> Vec<(i32, i32)> {
        state.snake.iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn test_tick_moves_without_growth() {
        let mut state = playing_state();
        let events = tick(&mut state, Direction::Up);
        assert!(events.is_empty());
        assert_eq!(body(&state), vec![(10, 9), (10, 10), (10, 11)]);
        assert_eq!(state.direction, Direction::Up);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_tick_noop_when_not_playing() {
        let mut state = GameState::new(Tuning::default(), 1).unwrap();
        let before = body(&state);
        assert!(tick(&mut state, Direction::Left).is_empty());
        assert_eq!(body(&state), before);

        state.phase = GamePhase::GameOver;
        assert!(tick(&mut state, Direction::Left).is_empty());
        assert_eq!(body(&state), before);
    }

    #[test]
    fn test_normal_food_grows_and_scores() {
        let mut state = playing_state();
        place_food(&mut state, 10, 9, FoodKind::Normal);

        let events = tick(&mut state, Direction::Up);
        assert_eq!(state.score, 10);
        assert_eq!(body(&state), vec![(10, 9), (10, 10), (10, 11), (10, 12)]);
        assert!(!state.occupies(state.food.pos));
        assert!(state.effects.is_empty());
        assert_eq!(
            events,
            vec![GameEvent::FoodEaten {
                kind: FoodKind::Normal,
                points: 10,
                at: Position::new(10, 9),
            }]
        );
    }

    #[test]
    fn test_double_score_applies_from_next_food() {
        let mut state = playing_state();
        place_food(&mut state, 10, 9, FoodKind::DoubleScore);

        tick(&mut state, Direction::Up);
        assert_eq!(state.score, 10);
        assert_eq!(state.effects.remaining(EffectKind::DoubleScore), Some(100));

        place_food(&mut state, 10, 8, FoodKind::Normal);
        tick(&mut state, Direction::Up);
        assert_eq!(state.score, 30);
        assert_eq!(state.effects.remaining(EffectKind::DoubleScore), Some(99));
    }

    #[test]
    fn test_expiring_double_score_does_not_apply() {
        let mut state = playing_state();
        state.effects.grant(EffectKind::DoubleScore, 1);
        place_food(&mut state, 10, 9, FoodKind::Normal);

        let events = tick(&mut state, Direction::Up);
        assert_eq!(state.score, 10);
        assert!(state.effects.is_empty());
        assert_eq!(events[0], GameEvent::EffectExpired(EffectKind::DoubleScore));
    }

    #[test]
    fn test_reacquired_effect_refreshes() {
        let mut state = playing_state();
        state.effects.grant(EffectKind::Speed, 5);
        place_food(&mut state, 10, 9, FoodKind::Speed);

        tick(&mut state, Direction::Up);
        assert_eq!(state.effects.len(), 1);
        assert_eq!(state.effects.remaining(EffectKind::Speed), Some(100));
    }

    #[test]
    fn test_wall_collision_ends_game() {
        let mut state = playing_state().with_high_score(40);
        state.snake = VecDeque::from(vec![
            Position::new(4, 0),
            Position::new(4, 1),
            Position::new(4, 2),
        ]);
        state.score = 70;

        let events = tick(&mut state, Direction::Up);
        assert!(state.is_game_over());
        assert!(!state.is_playing());
        assert_eq!(state.high_score, 70);
        assert_eq!(
            events,
            vec![GameEvent::GameOver {
                cause: DeathCause::Wall,
                score: 70,
                high_score: 70,
                new_record: true,
            }]
        );
        // Board is frozen as it was
        assert_eq!(body(&state), vec![(4, 0), (4, 1), (4, 2)]);
    }

    #[test]
    fn test_wall_collision_keeps_higher_record() {
        let mut state = playing_state().with_high_score(500);
        state.snake = VecDeque::from(vec![Position::new(19, 5), Position::new(18, 5)]);
        state.direction = Direction::Right;
        state.score = 20;

        tick(&mut state, Direction::Right);
        assert!(state.is_game_over());
        assert_eq!(state.high_score, 500);
    }

    #[test]
    fn test_self_collision_ends_game() {
        let mut state = playing_state();
        // Hook shape: head at (5,5) heading left, body wraps below
        state.snake = VecDeque::from(vec![
            Position::new(5, 5),
            Position::new(6, 5),
            Position::new(6, 6),
            Position::new(5, 6),
            Position::new(4, 6),
        ]);
        state.direction = Direction::Left;

        let events = tick(&mut state, Direction::Down);
        assert!(state.is_game_over());
        assert!(matches!(
            events[0],
            GameEvent::GameOver {
                cause: DeathCause::SelfCollision,
                ..
            }
        ));
    }

    #[test]
    fn test_reverse_direction_is_ignored() {
        let mut state = playing_state();
        state.snake = VecDeque::from(vec![
            Position::new(5, 5),
            Position::new(4, 5),
            Position::new(3, 5),
        ]);
        state.direction = Direction::Right;

        tick(&mut state, Direction::Left);
        assert!(state.is_playing());
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(body(&state), vec![(6, 5), (5, 5), (4, 5)]);
    }

    #[test]
    fn test_turn_is_applied() {
        let mut state = playing_state();
        tick(&mut state, Direction::Left);
        assert_eq!(state.direction, Direction::Left);
        assert_eq!(state.head(), Position::new(9, 10));
    }

    #[test]
    fn test_filling_board_clears_it() {
        let tuning = Tuning {
            grid_size: 5,
            ..Default::default()
        };
        let mut state = GameState::new(tuning, 5).unwrap();
        state.phase = GamePhase::Playing;

        // Serpentine path over the 5x5 board; snake covers all but the last cell
        let path: Vec<Position> = (0..5)
            .flat_map(|y| {
                let row: Vec<i32> = if y % 2 == 0 {
                    (0..5).collect()
                } else {
                    (0..5).rev().collect()
                };
                row.into_iter().map(move |x| Position::new(x, y))
            })
            .collect();
        state.snake = path[..24].iter().rev().copied().collect();
        state.direction = Direction::Right;
        state.food = Food {
            pos: path[24],
            kind: FoodKind::Normal,
        };
        state.score = 230;

        let events = tick(&mut state, Direction::Right);
        assert!(state.is_won());
        assert!(state.is_game_over());
        assert_eq!(state.snake.len(), 25);
        assert_eq!(state.score, 240);
        assert!(matches!(
            events.last(),
            Some(GameEvent::BoardCleared { score: 240, .. })
        ));
    }

    #[test]
    fn test_step_is_pure() {
        let state = playing_state();
        let next = step(&state, Direction::Right);
        assert_eq!(state.head(), Position::new(10, 10));
        assert_eq!(next.head(), Position::new(11, 10));
        assert_eq!(next.direction, Direction::Right);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(Tuning::default(), 99999).unwrap();
        let mut b = GameState::new(Tuning::default(), 99999).unwrap();
        a.reset();
        b.reset();
        assert_eq!(a.food, b.food);

        let inputs = [Direction::Up, Direction::Left, Direction::Left, Direction::Down];
        for dir in inputs.iter().cycle().take(40) {
            tick(&mut a, *dir);
            tick(&mut b, *dir);
        }
        assert_eq!(a.snake, b.snake);
        assert_eq!(a.food, b.food);
        assert_eq!(a.score, b.score);
        assert_eq!(a.phase, b.phase);
    }
}
