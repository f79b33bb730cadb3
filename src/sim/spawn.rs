//! Probabilistic spawning
//!
//! One uniform roll per frame per pool approximates a Poisson arrival
//! process; the level is the only difficulty knob.

use glam::Vec2;
use rand::Rng;

use super::state::{Coin, Enemy, EnemyKind, GameState, PowerUp, PowerUpKind};
use crate::consts::*;

/// Enemies enter this far past the right edge
pub const ENEMY_SPAWN_OFFSET: f32 = 50.0;
/// Coins enter this far past the right edge
pub const COIN_SPAWN_OFFSET: f32 = 20.0;

/// Maybe add an enemy just off the right edge
pub fn spawn_enemies(state: &mut GameState) {
    let level = state.level;
    let chance = state.tuning.enemy_spawn_chance(level);
    let roll = state.rng.random::<f32>();
    if roll >= chance || state.enemies.len() >= state.tuning.enemy_cap(level) {
        return;
    }

    let kind = EnemyKind::ALL[state.rng.random_range(0..EnemyKind::ALL.len())];
    let speed = kind.template().speed + level as f32 * state.tuning.enemy_speed_per_level;
    let id = state.next_entity_id();
    state
        .enemies
        .push(Enemy::new(id, kind, CANVAS_WIDTH + ENEMY_SPAWN_OFFSET, -speed));
    log::debug!("Spawned {:?} #{} (speed {:.1})", kind, id, speed);
}

/// Maybe add a coin at a random height above the ground
pub fn spawn_coins(state: &mut GameState) {
    if state.rng.random::<f32>() >= state.tuning.coin_spawn_chance {
        return;
    }
    let y = GROUND_LEVEL - 50.0 - state.rng.random::<f32>() * 100.0;
    let id = state.next_entity_id();
    state.coins.push(Coin {
        id,
        pos: Vec2::new(CANVAS_WIDTH + COIN_SPAWN_OFFSET, y),
        value: state.tuning.coin_value,
        vel_x: -state.tuning.coin_speed,
    });
}

/// Roll the drop chance for a defeated enemy at `pos`
pub fn roll_power_up_drop(state: &mut GameState, pos: Vec2) -> Option<PowerUpKind> {
    if state.rng.random::<f32>() >= state.tuning.power_up_drop_chance {
        return None;
    }
    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    let id = state.next_entity_id();
    state.power_ups.push(PowerUp {
        id,
        kind,
        pos,
        vel_x: -state.tuning.power_up_speed,
    });
    log::debug!("Dropped {:?} at ({:.0}, {:.0})", kind, pos.x, pos.y);
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn always_spawn() -> Tuning {
        Tuning {
            enemy_spawn_base_chance: 1.0,
            coin_spawn_chance: 1.0,
            power_up_drop_chance: 1.0,
            ..Tuning::default()
        }
    }

    #[test]
    fn test_enemy_spawn_respects_cap() {
        let mut state = GameState::with_tuning(3, always_spawn());
        for _ in 0..20 {
            spawn_enemies(&mut state);
        }
        assert_eq!(state.enemies.len(), 4); // 3 + level 1
        for enemy in &state.enemies {
            assert_eq!(enemy.pos.x, CANVAS_WIDTH + ENEMY_SPAWN_OFFSET);
            let expected = -(enemy.kind.template().speed + 0.5);
            assert!((enemy.vel_x - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn test_cap_and_speed_scale_with_level() {
        let mut state = GameState::with_tuning(3, always_spawn());
        state.level = 4;
        for _ in 0..20 {
            spawn_enemies(&mut state);
        }
        assert_eq!(state.enemies.len(), 7);
        let enemy = &state.enemies[0];
        assert!((enemy.vel_x + enemy.kind.template().speed + 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_chance_never_spawns() {
        let tuning = Tuning {
            enemy_spawn_base_chance: 0.0,
            enemy_spawn_chance_per_level: 0.0,
            coin_spawn_chance: 0.0,
            power_up_drop_chance: 0.0,
            ..Tuning::default()
        };
        let mut state = GameState::with_tuning(9, tuning);
        for _ in 0..1000 {
            spawn_enemies(&mut state);
            spawn_coins(&mut state);
        }
        assert!(state.enemies.is_empty());
        assert!(state.coins.is_empty());
        assert_eq!(roll_power_up_drop(&mut state, Vec2::ZERO), None);
    }

    #[test]
    fn test_coin_spawn_height() {
        let mut state = GameState::with_tuning(11, always_spawn());
        for _ in 0..50 {
            spawn_coins(&mut state);
        }
        assert_eq!(state.coins.len(), 50);
        for coin in &state.coins {
            assert!(coin.pos.y <= GROUND_LEVEL - 50.0);
            assert!(coin.pos.y > GROUND_LEVEL - 150.0);
            assert_eq!(coin.value, 10);
            assert_eq!(coin.vel_x, -3.0);
        }
    }

    #[test]
    fn test_drop_lands_at_enemy_position() {
        let mut state = GameState::with_tuning(5, always_spawn());
        let at = Vec2::new(420.0, 440.0);
        assert!(roll_power_up_drop(&mut state, at).is_some());
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.power_ups[0].pos, at);
        assert_eq!(state.power_ups[0].vel_x, -2.0);
    }

    #[test]
    fn test_default_spawn_rate_is_roughly_right() {
        let mut state = GameState::new(1234);
        for _ in 0..10_000 {
            spawn_coins(&mut state);
        }
        // 1% per frame
        assert!(state.coins.len() > 50 && state.coins.len() < 160);
    }
}
