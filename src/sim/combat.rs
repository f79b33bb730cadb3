//! Melee, contact damage and pickups
//!
//! Removals are done with `retain`/`remove` after the scan, so the result
//! doesn't depend on iteration tricks.

use super::collision::within_radius;
use super::effects::spawn_burst;
use super::input::TickInput;
use super::session::end_session;
use super::spawn::roll_power_up_drop;
use super::state::{
    EndReason, Enemy, GameEvent, GameState, ParticleColor, PowerUpEffect, PowerUpKind,
};

/// Start a swing on a fresh press, damage whatever is in reach, run the
/// cooldown down.
///
/// Each enemy takes damage at most once per swing, even if it stays inside
/// the reach box for the whole attack.
pub fn update_attack(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    if input.attack_pressed && player.attack_cooldown == 0 {
        player.attacking = true;
        player.attack_cooldown = state.tuning.attack_duration;
        player.swing_hits.clear();
    }

    if state.player.attacking {
        resolve_attack_hits(state);
    }

    let player = &mut state.player;
    if player.attack_cooldown > 0 {
        player.attack_cooldown -= 1;
        if player.attack_cooldown == 0 {
            player.attacking = false;
        }
    }
}

fn resolve_attack_hits(state: &mut GameState) {
    let reach = state.player.reach_box(state.tuning.attack_range);
    let damage = state.tuning.attack_damage;

    let mut hits = Vec::new();
    for enemy in &mut state.enemies {
        if state.player.swing_hits.contains(&enemy.id) || !reach.overlaps(&enemy.bounds()) {
            continue;
        }
        state.player.swing_hits.push(enemy.id);
        enemy.health = enemy.health.saturating_sub(damage);
        hits.push((enemy.id, enemy.health, enemy.center()));
    }

    for (id, remaining, center) in hits {
        spawn_burst(state, center, ParticleColor::Hit);
        state.emit(GameEvent::EnemyHit { id, remaining });
    }

    let mut defeated: Vec<Enemy> = Vec::new();
    state.enemies.retain(|e| {
        if e.health == 0 {
            defeated.push(e.clone());
            false
        } else {
            true
        }
    });

    for enemy in defeated {
        let points = enemy.points();
        state.score += points;
        log::debug!("Defeated {:?} #{} (+{})", enemy.kind, enemy.id, points);
        state.emit(GameEvent::EnemyDefeated {
            id: enemy.id,
            kind: enemy.kind,
            points,
        });
        roll_power_up_drop(state, enemy.pos);
    }
}

/// Count down the invincibility window
pub fn tick_invincibility(state: &mut GameState) {
    let player = &mut state.player;
    if player.invincible_ticks > 0 {
        player.invincible_ticks -= 1;
        if player.invincible_ticks == 0 {
            player.invincible = false;
        }
    }
}

/// Body contact: the first overlapping enemy (in pool order) trades itself
/// for a hit on the player. The invincibility it grants shields the player
/// from every other enemy this frame.
pub fn resolve_enemy_contacts(state: &mut GameState) {
    if state.player.invincible {
        return;
    }
    let body = state.player.bounds();
    let Some(idx) = state.enemies.iter().position(|e| body.overlaps(&e.bounds())) else {
        return;
    };

    let enemy = state.enemies.remove(idx);
    let damage = enemy.damage();
    let health = state.player.take_damage(damage);
    state
        .player
        .grant_invincibility(state.tuning.hit_invincibility_ticks);
    let center = state.player.center();
    spawn_burst(state, center, ParticleColor::Hit);
    state.emit(GameEvent::PlayerHit { damage, health });
    log::debug!("Player hit by {:?} for {} ({} left)", enemy.kind, damage, health);

    if health == 0 {
        end_session(state, EndReason::HealthDepleted);
    }
}

/// Pick up coins within reach of the player's center
pub fn collect_coins(state: &mut GameState) {
    let center = state.player.center();
    let radius = state.tuning.coin_pickup_radius;

    let mut collected = Vec::new();
    state.coins.retain(|c| {
        if within_radius(c.pos, center, radius) {
            collected.push((c.value, c.pos));
            false
        } else {
            true
        }
    });

    for (value, pos) in collected {
        state.coin_total += u64::from(value);
        state.score += state.tuning.coin_score_bonus;
        spawn_burst(state, pos, ParticleColor::Gold);
        state.emit(GameEvent::CoinCollected { value });
    }
}

/// Pick up power-ups within reach of the player's center and apply them
pub fn collect_power_ups(state: &mut GameState) {
    let center = state.player.center();
    let radius = state.tuning.power_up_pickup_radius;

    let mut collected = Vec::new();
    state.power_ups.retain(|p| {
        if within_radius(p.pos, center, radius) {
            collected.push(p.kind);
            false
        } else {
            true
        }
    });

    for kind in collected {
        apply_power_up(state, kind);
    }
}

pub fn apply_power_up(state: &mut GameState, kind: PowerUpKind) {
    let center = state.player.center();
    match kind.effect(&state.tuning) {
        PowerUpEffect::Heal { amount } => {
            state.player.heal(amount);
            spawn_burst(state, center, ParticleColor::Heal);
        }
        PowerUpEffect::Invincible { ticks } => {
            state.player.grant_invincibility(ticks);
            spawn_burst(state, center, ParticleColor::Shield);
        }
    }
    state.emit(GameEvent::PowerUpCollected { kind });
}
