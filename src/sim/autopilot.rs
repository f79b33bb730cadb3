//! Idle/demo mode - AI plays the game
//!
//! Produces the same [`TickInput`] a human would, so autopiloted runs go
//! through exactly the same simulation path.

use super::input::TickInput;
use super::state::{Facing, GamePhase, GameState};
use crate::consts::{CANVAS_WIDTH, PLAYER_START_X};

/// Engage enemies whose body is closer than this (horizontal gap)
const ENGAGE_GAP: f32 = 150.0;
/// Back away from enemies closer than this while the swing recovers
const RETREAT_GAP: f32 = 30.0;

pub fn autopilot_input(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    if state.phase != GamePhase::Playing {
        return input;
    }

    let player = &state.player;
    let center = player.center();

    // Closest enemy by horizontal distance
    let threat = state.enemies.iter().min_by(|a, b| {
        let da = (a.center().x - center.x).abs();
        let db = (b.center().x - center.x).abs();
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    });

    if let Some(enemy) = threat {
        let dx = enemy.center().x - center.x;
        let gap = dx.abs() - (enemy.size.x + player.size.x) / 2.0;
        if gap < ENGAGE_GAP {
            if player.attack_cooldown == 0 {
                let facing_it = (dx >= 0.0) == (player.facing == Facing::Right);
                let reach = player.reach_box(state.tuning.attack_range);
                if !facing_it {
                    input.left = dx < 0.0;
                    input.right = dx >= 0.0;
                } else if reach.overlaps(&enemy.bounds()) {
                    input.attack_pressed = true;
                    input.attack_held = true;
                }
            } else if gap < RETREAT_GAP && !player.invincible {
                // Back off while the swing recovers; hop if pinned to a wall
                let pinned = if dx >= 0.0 {
                    player.pos.x <= 0.0
                } else {
                    player.pos.x >= CANVAS_WIDTH - player.size.x
                };
                if pinned {
                    input.up = true;
                } else {
                    input.left = dx >= 0.0;
                    input.right = dx < 0.0;
                }
            }
            return input;
        }
    }

    // Nothing to fight: go for the nearest pickup
    let target = state
        .power_ups
        .iter()
        .map(|p| p.pos)
        .chain(state.coins.iter().map(|c| c.pos))
        .min_by(|a, b| {
            a.distance_squared(center)
                .partial_cmp(&b.distance_squared(center))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let goal_x = match target {
        Some(pos) => {
            if pos.y < player.pos.y && (pos.x - center.x).abs() < 60.0 {
                input.up = true;
            }
            pos.x
        }
        // Drift back toward home so the next wave meets us with room behind
        None => PLAYER_START_X + player.size.x,
    };

    let speed = state.tuning.player_speed;
    if goal_x < center.x - speed {
        input.left = true;
    } else if goal_x > center.x + speed {
        input.right = true;
    }

    input
}
