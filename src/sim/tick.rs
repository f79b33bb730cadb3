//! Fixed timestep simulation tick
//!
//! Two entry points, both no-ops unless the session is Playing:
//! - [`tick`]: one display frame (spawn, move, fight, collect, decay)
//! - [`tick_second`]: one second of the demo countdown
//!
//! Stopping a session means the driver stops calling these; there are no
//! timers to cancel.

use super::combat::{
    collect_coins, collect_power_ups, resolve_enemy_contacts, tick_invincibility, update_attack,
};
use super::effects::decay_particles;
use super::input::TickInput;
use super::physics::{animate_player, drift_entities, step_player};
use super::session::end_session;
use super::spawn::{spawn_coins, spawn_enemies};
use super::state::{EndReason, GamePhase, GameState};

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    spawn_enemies(state);
    spawn_coins(state);

    let moved = step_player(&mut state.player, input, &state.tuning);
    update_attack(state, input);
    tick_invincibility(state);
    animate_player(&mut state.player, moved);

    drift_entities(state);
    resolve_enemy_contacts(state);
    if state.phase != GamePhase::Playing {
        // Knocked out this frame
        return;
    }

    collect_coins(state);
    collect_power_ups(state);

    decay_particles(&mut state.particles);
}

/// Advance the demo countdown by one second
pub fn tick_second(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_remaining = state.time_remaining.saturating_sub(1);
    if state.time_remaining == 0 {
        end_session(state, EndReason::DemoExpired);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::session::{pause, restart, resume, start};
    use crate::sim::state::{Coin, Enemy, EnemyKind, GameEvent};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn quiet_tuning() -> Tuning {
        Tuning {
            enemy_spawn_base_chance: 0.0,
            enemy_spawn_chance_per_level: 0.0,
            coin_spawn_chance: 0.0,
            power_up_drop_chance: 0.0,
            ..Tuning::default()
        }
    }

    fn count_ended(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::SessionEnded { .. }))
            .count()
    }

    #[test]
    fn test_tick_does_nothing_on_start_screen() {
        let mut state = GameState::new(12345);
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        tick_second(&mut state);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.time_remaining, 180);
        assert_eq!(state.player.pos.x, PLAYER_START_X);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = GameState::new(12345);
        start(&mut state);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 1);

        pause(&mut state);
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &right);
            tick_second(&mut state);
        }
        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.time_remaining, 180);
        assert_eq!(state.player.pos.x, PLAYER_START_X);

        resume(&mut state);
        tick(&mut state, &right);
        tick_second(&mut state);
        assert_eq!(state.time_ticks, 2);
        assert_eq!(state.time_remaining, 179);
    }

    #[test]
    fn test_countdown_expires_once() {
        let mut state = GameState::new(5);
        start(&mut state);
        for n in 1..180 {
            tick_second(&mut state);
            assert_eq!(state.time_remaining, 180 - n);
            assert_eq!(state.phase, GamePhase::Playing);
        }
        tick_second(&mut state);
        assert_eq!(state.phase, GamePhase::DemoExpired);
        assert_eq!(state.time_remaining, 0);

        for _ in 0..5 {
            tick_second(&mut state);
        }
        assert_eq!(state.time_remaining, 0);
        assert_eq!(count_ended(&state.drain_events()), 1);
    }

    #[test]
    fn test_frame_ordering_contact_after_drift() {
        // Enemy one step away from touching: drift happens before the contact check
        let mut state = GameState::with_tuning(1, quiet_tuning());
        start(&mut state);
        let x = state.player.pos.x + state.player.size.x + 1.0;
        state.enemies.push(Enemy::new(99, EnemyKind::Pepe, x, -2.0));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.health, 85);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_no_collection_after_knockout() {
        let mut state = GameState::with_tuning(1, quiet_tuning());
        start(&mut state);
        state.player.health = 5;
        let x = state.player.pos.x + 10.0;
        state.enemies.push(Enemy::new(99, EnemyKind::Pepe, x, 0.0));
        let pos = state.player.center();
        state.coins.push(Coin {
            id: 100,
            pos: pos + Vec2::new(3.0, 0.0),
            value: 10,
            vel_x: 3.0,
        });
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.coin_total, 0);

        // Torn down: further ticks change nothing
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_coin_collected_through_tick() {
        let mut state = GameState::with_tuning(1, quiet_tuning());
        start(&mut state);
        let pos = state.player.center() + Vec2::new(13.0, 0.0);
        state.coins.push(Coin {
            id: 100,
            pos,
            value: 10,
            vel_x: -3.0,
        });
        tick(&mut state, &TickInput::default());
        assert_eq!(state.coin_total, 10);
        assert_eq!(state.score, 25);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        start(&mut state1);
        start(&mut state2);

        let inputs = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                attack_pressed: true,
                attack_held: true,
                ..Default::default()
            },
            TickInput {
                up: true,
                left: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for frame in 0..2000 {
            let input = &inputs[frame % inputs.len()];
            tick(&mut state1, input);
            tick(&mut state2, input);
            if frame % 60 == 59 {
                tick_second(&mut state1);
                tick_second(&mut state2);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(state1.coins.len(), state2.coins.len());
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.drain_events(), state2.drain_events());
    }

    #[test]
    fn test_restart_after_game_over_is_clean() {
        let mut state = GameState::new(77);
        start(&mut state);
        for _ in 0..600 {
            tick(&mut state, &TickInput::default());
        }
        state.player.health = 1;
        state.player.invincible = false;
        let x = state.player.pos.x;
        state.enemies.push(Enemy::new(500, EnemyKind::Wojak, x, 0.0));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        restart(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.enemies.is_empty());
        assert!(state.coins.is_empty());
        assert!(state.power_ups.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.player.pos, Vec2::new(100.0, GROUND_LEVEL - PLAYER_HEIGHT));
        assert_eq!(state.score, 0);
        assert_eq!(state.coin_total, 0);
        assert_eq!(state.player.health, 100);
        assert_eq!(state.time_remaining, 180);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_input() -> impl Strategy<Value = TickInput> {
            (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
                |(left, right, up, attack)| TickInput {
                    left,
                    right,
                    up,
                    attack_held: attack,
                    attack_pressed: attack,
                    ..Default::default()
                },
            )
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn health_in_range_and_single_ending(
                seed in 0u64..10_000,
                inputs in proptest::collection::vec(arb_input(), 100..1500)
            ) {
                // Crowded island so the player actually gets hurt
                let tuning = Tuning {
                    enemy_spawn_base_chance: 0.2,
                    ..Tuning::default()
                };
                let mut state = GameState::with_tuning(seed, tuning);
                start(&mut state);
                let mut ended = 0;
                for (frame, input) in inputs.iter().enumerate() {
                    tick(&mut state, input);
                    if frame % 60 == 59 {
                        tick_second(&mut state);
                    }
                    prop_assert!(state.player.health <= state.player.max_health);
                    prop_assert!(state.player.pos.y <= GROUND_LEVEL - PLAYER_HEIGHT);
                    prop_assert!(state.enemies.iter().all(|e| e.health > 0));
                    prop_assert!(state.enemies.len() <= state.tuning.enemy_cap(state.level));
                    ended += count_ended(&state.drain_events());
                }
                prop_assert!(ended <= 1);
                prop_assert_eq!(ended == 1, state.phase.is_terminal());
                if state.phase == GamePhase::GameOver {
                    prop_assert_eq!(state.player.health, 0);
                }
            }

            #[test]
            fn score_matches_defeats_and_coins(
                seed in 0u64..10_000,
                inputs in proptest::collection::vec(arb_input(), 100..1500)
            ) {
                let tuning = Tuning {
                    enemy_spawn_base_chance: 0.05,
                    coin_spawn_chance: 0.05,
                    ..Tuning::default()
                };
                let mut state = GameState::with_tuning(seed, tuning);
                start(&mut state);
                let mut expected = 0u64;
                for input in &inputs {
                    tick(&mut state, input);
                    for event in state.drain_events() {
                        match event {
                            GameEvent::EnemyDefeated { points, .. } => expected += points,
                            GameEvent::CoinCollected { .. } => expected += 25,
                            _ => {}
                        }
                    }
                }
                prop_assert_eq!(state.score, expected);
            }
        }
    }
}
