//! Fixed timestep simulation tick
//!
//! Advances one session by exactly one logical tick: bird physics first,
//! then pillar motion, scoring, and collision, all against the bird
//! position computed this same tick.

use super::collision::{bird_hits_pillar, passed_scoring_line};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Advance the game state by one fixed tick. No-op unless running.
pub fn tick(state: &mut GameState) {
    if state.phase != GamePhase::Running {
        return;
    }
    state.time_ticks += 1;

    tick_physics(state);

    // A floor hit ends the run mid-tick; the pillar row stays frozen.
    if state.phase == GamePhase::Running {
        tick_pillars(state);
    }
}

/// Gravity, integration, and the floor/ceiling clamp pair.
/// The floor is fatal; the ceiling only stops upward motion.
fn tick_physics(state: &mut GameState) {
    let bird = &mut state.bird;
    bird.vel += GRAVITY;
    let candidate = bird.y + bird.vel;

    let floor = FIELD_HEIGHT - BIRD_HEIGHT;
    if candidate >= floor {
        bird.y = floor;
        state.end_game();
    } else {
        bird.y = candidate.max(0.0);
    }
}

/// Scroll, recycle, score, and collide every pillar in sequence order.
/// All pillars are evaluated even if one of them ends the run; end_game
/// is idempotent for that case.
fn tick_pillars(state: &mut GameState) {
    for i in 0..state.pillars.len() {
        let new_x = state.pillars[i].x - PILLAR_SPEED;

        if new_x + PILLAR_WIDTH < 0.0 {
            // Fully off the left edge: respawn on the right with a fresh
            // gap. No scoring or collision for this pillar this tick.
            let gap_top = state.next_gap_top();
            let pillar = &mut state.pillars[i];
            pillar.x = PILLAR_SPAWN_X;
            pillar.gap_top = gap_top;
            pillar.scored = false;
            continue;
        }

        state.pillars[i].x = new_x;

        if !state.pillars[i].scored && passed_scoring_line(&state.pillars[i]) {
            state.pillars[i].scored = true;
            state.score += SCORE_PER_PILLAR;
            let total = state.score;
            state.push_event(GameEvent::Scored { total });
        }

        if bird_hits_pillar(&state.bird, &state.pillars[i], state.gap) {
            state.end_game();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state.take_events();
        state
    }

    #[test]
    fn test_gravity_accumulates_per_tick() {
        let mut state = running_state(7);
        state.bird.y = 300.0;
        state.bird.vel = 0.0;

        tick(&mut state);
        assert!((state.bird.vel - 0.8).abs() < 1e-4);
        assert!((state.bird.y - 300.8).abs() < 1e-4);

        tick(&mut state);
        assert!((state.bird.vel - 1.6).abs() < 1e-4);
        assert!((state.bird.y - 302.4).abs() < 1e-4);
    }

    #[test]
    fn test_jump_then_tick() {
        let mut state = running_state(7);
        state.bird.y = 300.0;
        state.bird.vel = 0.0;

        state.jump();
        tick(&mut state);
        assert!((state.bird.vel - (JUMP_IMPULSE + GRAVITY)).abs() < 1e-4);
        assert!((state.bird.y - 288.8).abs() < 1e-4);
    }

    #[test]
    fn test_floor_hit_is_fatal_same_tick() {
        let mut state = running_state(3);
        state.bird.y = 570.0;
        state.bird.vel = 10.0;

        tick(&mut state);
        assert_eq!(state.bird.y, FIELD_HEIGHT - BIRD_HEIGHT);
        assert_eq!(state.phase, GamePhase::GameOver);
        // The pillar row did not move on the death tick
        assert_eq!(state.pillars[0].x, PILLAR_SPAWN_X);
        assert_eq!(state.pillars[1].x, PILLAR_SPAWN_X + PILLAR_SPACING);
        assert_eq!(state.take_events(), vec![GameEvent::GameOver { score: 0.0 }]);
    }

    #[test]
    fn test_ceiling_clamp_is_silent() {
        let mut state = running_state(3);
        state.bird.y = 5.0;
        state.bird.vel = -20.0;

        tick(&mut state);
        assert_eq!(state.bird.y, 0.0);
        assert_eq!(state.phase, GamePhase::Running);
        // Velocity is untouched by the clamp; gravity will reclaim it
        assert!((state.bird.vel - (-19.2)).abs() < 1e-4);
    }

    #[test]
    fn test_pillars_scroll_left() {
        let mut state = running_state(5);
        tick(&mut state);
        assert_eq!(state.pillars[0].x, PILLAR_SPAWN_X - PILLAR_SPEED);
        assert_eq!(state.pillars[1].x, PILLAR_SPAWN_X + PILLAR_SPACING - PILLAR_SPEED);
    }

    #[test]
    fn test_recycle_resets_pillar() {
        let mut state = running_state(11);
        state.pillars[0].x = -50.0;
        state.pillars[0].scored = true;

        tick(&mut state);
        let p = state.pillars[0];
        assert_eq!(p.x, PILLAR_SPAWN_X);
        assert!(!p.scored);
        assert!(p.gap_top >= GAP_TOP_MIN as f32 && p.gap_top < GAP_TOP_MAX as f32);
        // Identity is preserved across the recycle
        assert_eq!(p.id, 1);
        // A recycled pillar is not evaluated for scoring on its reset tick
        assert_eq!(state.score, 0.0);
    }

    #[test]
    fn test_recycle_threshold_is_strict() {
        let mut state = running_state(11);
        // new_x + width == 0 exactly: still on the field, no recycle yet
        state.pillars[0].x = -PILLAR_WIDTH + PILLAR_SPEED;
        state.pillars[0].scored = true;

        tick(&mut state);
        assert_eq!(state.pillars[0].x, -PILLAR_WIDTH);

        tick(&mut state);
        assert_eq!(state.pillars[0].x, PILLAR_SPAWN_X);
    }

    #[test]
    fn test_scoring_fires_exactly_once() {
        let mut state = running_state(13);
        // Center will cross the anchor this tick: (76 - 5) + 26 = 97 < 100
        state.pillars[0].x = 76.0;
        state.pillars[0].gap_top = 200.0;
        state.bird.y = 300.0;
        state.bird.vel = 0.0;

        tick(&mut state);
        assert_eq!(state.score, SCORE_PER_PILLAR);
        assert!(state.pillars[0].scored);
        assert_eq!(
            state.take_events(),
            vec![GameEvent::Scored {
                total: SCORE_PER_PILLAR
            }]
        );

        // Center still left of the anchor, but the latch holds
        tick(&mut state);
        assert_eq!(state.score, SCORE_PER_PILLAR);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_score_and_fatal_hit_same_tick() {
        let mut state = running_state(17);
        // Crosses the scoring line and overlaps the bird outside the gap
        state.pillars[0].x = 76.0;
        state.pillars[0].gap_top = 200.0;
        state.bird.y = 50.0;
        state.bird.vel = 0.0;

        tick(&mut state);
        assert_eq!(state.score, SCORE_PER_PILLAR);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            state.take_events(),
            vec![
                GameEvent::Scored {
                    total: SCORE_PER_PILLAR
                },
                GameEvent::GameOver {
                    score: SCORE_PER_PILLAR
                },
            ]
        );
    }

    #[test]
    fn test_collision_outside_gap_ends_game() {
        let mut state = running_state(19);
        state.pillars[0].x = 105.0;
        state.pillars[0].gap_top = 200.0;
        // Above the passage
        state.bird.y = 100.0;
        state.bird.vel = 0.0;

        tick(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_no_collision_inside_gap() {
        let mut state = running_state(19);
        state.pillars[0].x = 105.0;
        state.pillars[0].gap_top = 200.0;
        // Mid-passage
        state.bird.y = 260.0;
        state.bird.vel = 0.0;

        tick(&mut state);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_collision_uses_same_tick_bird_position() {
        let mut state = running_state(23);
        state.pillars[0].x = 100.0;
        state.pillars[0].gap_top = 300.0;
        // Safe where it is, but this tick's fall carries it below the gap
        state.bird.y = 432.0;
        state.bird.vel = 20.0;

        tick(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_double_hit_emits_one_game_over() {
        let mut state = running_state(29);
        // Both pillars overlap the bird's column, bird above both gaps
        state.pillars[0].x = 95.0;
        state.pillars[1].x = 110.0;
        state.pillars[0].gap_top = 200.0;
        state.pillars[1].gap_top = 250.0;
        state.bird.y = 0.0;
        state.bird.vel = 0.0;

        tick(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        let game_overs = state
            .take_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_tick_is_noop_outside_running() {
        let mut idle = GameState::new(31);
        let before = idle.clone();
        tick(&mut idle);
        assert_eq!(idle, before);

        let mut over = running_state(31);
        over.end_game();
        over.take_events();
        let before = over.clone();
        tick(&mut over);
        assert_eq!(over, before);
    }

    #[test]
    fn test_tick_counter_counts_running_ticks_only() {
        let mut state = GameState::new(37);
        tick(&mut state);
        assert_eq!(state.time_ticks, 0);

        state.start();
        tick(&mut state);
        tick(&mut state);
        assert_eq!(state.time_ticks, 2);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and the same script stay identical
        let mut a = running_state(99_999);
        let mut b = running_state(99_999);

        for i in 0..120 {
            if i % 9 == 0 {
                a.jump();
                b.jump();
            }
            tick(&mut a);
            tick(&mut b);
        }
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_bird_stays_clamped(seed in 0u64..1_000, script in prop::collection::vec(0u8..5, 1..300)) {
            let mut state = running_state(seed);
            for action in script {
                if action == 0 {
                    state.jump();
                } else {
                    tick(&mut state);
                }
                prop_assert!(state.bird.y >= 0.0);
                prop_assert!(state.bird.y <= FIELD_HEIGHT - BIRD_HEIGHT);
            }
        }

        #[test]
        fn prop_score_never_decreases(seed in 0u64..1_000, script in prop::collection::vec(0u8..5, 1..300)) {
            let mut state = running_state(seed);
            let mut prev = state.score;
            for action in script {
                if action == 0 {
                    state.jump();
                } else {
                    tick(&mut state);
                }
                prop_assert!(state.score >= prev);
                prev = state.score;
            }
        }

        #[test]
        fn prop_jump_while_running_is_exact_impulse(vel in -60.0f32..60.0) {
            let mut state = running_state(1);
            state.bird.vel = vel;
            state.jump();
            prop_assert_eq!(state.bird.vel, JUMP_IMPULSE);
        }
    }
}
