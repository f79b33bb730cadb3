//! Data-driven game balance
//!
//! Every number a designer might want to tweak lives here. Missing JSON
//! fields fall back to the shipped defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub max_health: u32,
    /// Horizontal pixels per frame
    pub player_speed: f32,
    /// Downward acceleration (pixels/frame²)
    pub gravity: f32,
    /// Initial vertical velocity of a jump (negative is up)
    pub jump_velocity: f32,

    // === Combat ===
    pub attack_range: f32,
    pub attack_damage: u32,
    /// Frames an attack stays active (and the cooldown before the next one)
    pub attack_duration: u32,
    /// Invincibility after being hit by an enemy
    pub hit_invincibility_ticks: u32,

    // === Spawning ===
    pub enemy_spawn_base_chance: f32,
    pub enemy_spawn_chance_per_level: f32,
    pub enemy_cap_base: usize,
    pub enemy_speed_per_level: f32,
    pub coin_spawn_chance: f32,
    pub power_up_drop_chance: f32,

    // === Collectibles ===
    pub coin_value: u32,
    pub coin_speed: f32,
    pub coin_score_bonus: u64,
    pub coin_pickup_radius: f32,
    pub power_up_speed: f32,
    pub power_up_pickup_radius: f32,
    pub heal_amount: u32,
    pub invincibility_power_up_ticks: u32,

    // === Effects ===
    pub particle_life: u32,
    /// Particle velocity per axis is uniform in ±spread/2
    pub particle_spread: f32,

    // === Session ===
    pub demo_seconds: u32,
    pub start_level: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_health: 100,
            player_speed: 5.0,
            gravity: 0.8,
            jump_velocity: -15.0,

            attack_range: 80.0,
            attack_damage: 20,
            attack_duration: 15,
            hit_invincibility_ticks: 60,

            enemy_spawn_base_chance: 0.005,
            enemy_spawn_chance_per_level: 0.001,
            enemy_cap_base: 3,
            enemy_speed_per_level: 0.5,
            coin_spawn_chance: 0.01,
            power_up_drop_chance: 0.3,

            coin_value: 10,
            coin_speed: 3.0,
            coin_score_bonus: 25,
            coin_pickup_radius: 50.0,
            power_up_speed: 2.0,
            power_up_pickup_radius: 40.0,
            heal_amount: 25,
            invincibility_power_up_ticks: 5 * 60,

            particle_life: 40,
            particle_spread: 7.0,

            demo_seconds: 180,
            start_level: 1,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning table from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Enemy spawn probability per frame at the given level
    pub fn enemy_spawn_chance(&self, level: u32) -> f32 {
        (self.enemy_spawn_base_chance + level as f32 * self.enemy_spawn_chance_per_level)
            .clamp(0.0, 1.0)
    }

    /// Maximum live enemies at the given level
    pub fn enemy_cap(&self, level: u32) -> usize {
        self.enemy_cap_base + level as usize
    }

    /// Clamp values that would break simulation invariants
    pub fn sanitized(mut self) -> Self {
        for (name, p) in [
            ("enemy_spawn_base_chance", &mut self.enemy_spawn_base_chance),
            ("enemy_spawn_chance_per_level", &mut self.enemy_spawn_chance_per_level),
            ("coin_spawn_chance", &mut self.coin_spawn_chance),
            ("power_up_drop_chance", &mut self.power_up_drop_chance),
        ] {
            if !(0.0..=1.0).contains(&*p) {
                log::warn!("Tuning: {} = {} out of range, clamping", name, p);
                *p = p.clamp(0.0, 1.0);
            }
        }
        if self.max_health == 0 {
            log::warn!("Tuning: max_health must be positive, using 1");
            self.max_health = 1;
        }
        if self.attack_duration == 0 {
            log::warn!("Tuning: attack_duration must be positive, using 1");
            self.attack_duration = 1;
        }
        if self.jump_velocity > 0.0 {
            log::warn!("Tuning: jump_velocity points down, flipping sign");
            self.jump_velocity = -self.jump_velocity;
        }
        self
    }
}
