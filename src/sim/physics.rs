//! Per-frame movement
//!
//! The player walks, jumps and falls under gravity; everything else drifts
//! left at a constant speed. All units are pixels and frames.

use super::input::TickInput;
use super::state::{AnimState, ENEMY_ANIM_PERIOD, Facing, GameState, PLAYER_ANIM_PERIOD, Player};
use crate::consts::*;
use crate::tuning::Tuning;

/// Advance the player one frame. Returns true if the player walked.
pub fn step_player(player: &mut Player, input: &TickInput, tuning: &Tuning) -> bool {
    let mut moved = false;
    if input.left {
        player.pos.x -= tuning.player_speed;
        player.facing = Facing::Left;
        moved = true;
    }
    if input.right {
        player.pos.x += tuning.player_speed;
        player.facing = Facing::Right;
        moved = true;
    }

    if input.up && player.grounded {
        player.vel_y = tuning.jump_velocity;
        player.jumping = true;
        player.grounded = false;
    }

    player.vel_y += tuning.gravity;
    player.pos.y += player.vel_y;

    // Ground clamp
    if player.pos.y + player.size.y >= GROUND_LEVEL {
        player.pos.y = GROUND_LEVEL - player.size.y;
        player.vel_y = 0.0;
        player.jumping = false;
        player.grounded = true;
    }

    player.pos.x = player.pos.x.clamp(0.0, CANVAS_WIDTH - player.size.x);

    moved
}

/// Pick the player's clip from its flags and advance it
pub fn animate_player(player: &mut Player, moved: bool) {
    let clip = if player.jumping {
        AnimState::Jump
    } else if player.attacking {
        AnimState::Attack
    } else if moved {
        AnimState::Walk
    } else {
        AnimState::Idle
    };
    player.anim.advance(clip, PLAYER_ANIM_PERIOD);
}

/// Move enemies, coins and power-ups, then cull whatever left the screen
pub fn drift_entities(state: &mut GameState) {
    for enemy in &mut state.enemies {
        enemy.pos.x += enemy.vel_x;
        enemy.anim.advance(AnimState::Walk, ENEMY_ANIM_PERIOD);
    }
    for coin in &mut state.coins {
        coin.pos.x += coin.vel_x;
    }
    for power_up in &mut state.power_ups {
        power_up.pos.x += power_up.vel_x;
    }

    let before = state.enemies.len();
    state.enemies.retain(|e| !e.is_off_screen());
    if state.enemies.len() != before {
        log::debug!("{} enemies walked off screen", before - state.enemies.len());
    }
    state.coins.retain(|c| !c.is_off_screen());
    state.power_ups.retain(|p| !p.is_off_screen());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Coin, Enemy, EnemyKind, PowerUp, PowerUpKind};
    use glam::Vec2;

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_standing_player_stays_grounded() {
        let tuning = Tuning::default();
        let mut player = Player::new(100);
        for _ in 0..30 {
            step_player(&mut player, &idle(), &tuning);
            assert!(player.grounded);
            assert_eq!(player.vel_y, 0.0);
            assert_eq!(player.pos.y, GROUND_LEVEL - PLAYER_HEIGHT);
        }
    }

    #[test]
    fn test_jump_arc_lands() {
        let tuning = Tuning::default();
        let mut player = Player::new(100);
        let jump = TickInput {
            up: true,
            ..Default::default()
        };
        step_player(&mut player, &jump, &tuning);
        assert!(!player.grounded);
        assert!(player.jumping);
        // -15 + 0.8 applied on the launch frame
        assert!((player.vel_y + 14.2).abs() < 1e-4);
        let floor = GROUND_LEVEL - PLAYER_HEIGHT;
        assert!(player.pos.y < floor);

        let mut frames = 1;
        while !player.grounded {
            step_player(&mut player, &idle(), &tuning);
            frames += 1;
            assert!(frames < 100, "never landed");
        }
        assert_eq!(player.pos.y, floor);
        assert_eq!(player.vel_y, 0.0);
        assert!(!player.jumping);
    }

    #[test]
    fn test_no_double_jump() {
        let tuning = Tuning::default();
        let mut player = Player::new(100);
        let jump = TickInput {
            up: true,
            ..Default::default()
        };
        step_player(&mut player, &jump, &tuning);
        let vel_after_launch = player.vel_y;
        step_player(&mut player, &jump, &tuning);
        assert!((player.vel_y - (vel_after_launch + tuning.gravity)).abs() < 1e-4);
    }

    #[test]
    fn test_horizontal_bounds_and_facing() {
        let tuning = Tuning::default();
        let mut player = Player::new(100);
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..100 {
            step_player(&mut player, &left, &tuning);
        }
        assert_eq!(player.pos.x, 0.0);
        assert_eq!(player.facing, Facing::Left);

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..400 {
            step_player(&mut player, &right, &tuning);
        }
        assert_eq!(player.pos.x, CANVAS_WIDTH - PLAYER_WIDTH);
        assert_eq!(player.facing, Facing::Right);
    }

    #[test]
    fn test_both_directions_cancel_but_face_right() {
        let tuning = Tuning::default();
        let mut player = Player::new(100);
        let both = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        let x = player.pos.x;
        assert!(step_player(&mut player, &both, &tuning));
        assert_eq!(player.pos.x, x);
        assert_eq!(player.facing, Facing::Right);
    }

    #[test]
    fn test_animation_clip_selection() {
        let mut player = Player::new(100);
        animate_player(&mut player, true);
        assert_eq!(player.anim.state, AnimState::Walk);
        player.attacking = true;
        animate_player(&mut player, true);
        assert_eq!(player.anim.state, AnimState::Attack);
        player.jumping = true;
        animate_player(&mut player, false);
        assert_eq!(player.anim.state, AnimState::Jump);
    }

    #[test]
    fn test_drift_and_cull() {
        let mut state = GameState::new(1);
        // Wojak is 60 wide: one more step puts its right edge past x = 0
        state.enemies.push(Enemy::new(1, EnemyKind::Wojak, -58.0, -3.0));
        state.enemies.push(Enemy::new(2, EnemyKind::Pepe, 600.0, -2.0));
        state.coins.push(Coin {
            id: 3,
            pos: Vec2::new(-18.0, 300.0),
            value: 10,
            vel_x: -3.0,
        });
        // Power-ups are 30 across: gone once x < -30
        for (id, x) in [(4, -29.0), (5, -27.0)] {
            state.power_ups.push(PowerUp {
                id,
                kind: PowerUpKind::Heal,
                pos: Vec2::new(x, 300.0),
                vel_x: -2.0,
            });
        }

        drift_entities(&mut state);

        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].id, 2);
        assert_eq!(state.enemies[0].pos.x, 598.0);
        assert!(state.coins.is_empty());
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.power_ups[0].id, 5);
        assert_eq!(state.power_ups[0].pos.x, -29.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_input() -> impl Strategy<Value = TickInput> {
            (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(left, right, up)| TickInput {
                left,
                right,
                up,
                ..Default::default()
            })
        }

        proptest! {
            #[test]
            fn player_never_below_ground(inputs in proptest::collection::vec(arb_input(), 1..300)) {
                let tuning = Tuning::default();
                let mut player = Player::new(100);
                let floor = GROUND_LEVEL - PLAYER_HEIGHT;
                for input in &inputs {
                    let was_grounded = player.grounded;
                    step_player(&mut player, input, &tuning);
                    prop_assert!(player.pos.y <= floor);
                    prop_assert!(player.pos.x >= 0.0);
                    prop_assert!(player.pos.x <= CANVAS_WIDTH - PLAYER_WIDTH);
                    if player.grounded {
                        prop_assert_eq!(player.vel_y, 0.0);
                        prop_assert_eq!(player.pos.y, floor);
                    }
                    if !was_grounded && player.grounded {
                        prop_assert!(!player.jumping);
                    }
                }
            }
        }
    }
}
