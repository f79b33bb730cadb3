//! Particle bursts
//!
//! Purely visual; nothing in gameplay reads particles back.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Particle, ParticleColor};
use crate::consts::{BURST_SIZE, MAX_PARTICLES};

/// Spawn a burst of particles at `pos` flying off in random directions
pub fn spawn_burst(state: &mut GameState, pos: Vec2, color: ParticleColor) {
    let spread = state.tuning.particle_spread;
    let life = state.tuning.particle_life;
    for _ in 0..BURST_SIZE {
        if state.particles.len() >= MAX_PARTICLES {
            // Remove oldest particles to make room
            state.particles.remove(0);
        }
        let vel = Vec2::new(
            (state.rng.random::<f32>() - 0.5) * spread,
            (state.rng.random::<f32>() - 0.5) * spread,
        );
        state.particles.push(Particle {
            pos,
            vel,
            color,
            life,
        });
    }
}

/// Move every particle and drop the expired ones
pub fn decay_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life = particle.life.saturating_sub(1);
    }
    particles.retain(|p| p.life > 0);
}
