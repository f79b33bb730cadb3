//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed frame step only
//! - Seeded RNG only
//! - Pools iterated in spawn order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod combat;
pub mod effects;
pub mod input;
pub mod physics;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::{Aabb, within_radius};
pub use input::{Action, InputState, TickInput};
pub use session::{dismiss, end_session, pause, restart, resume, start, toggle_pause};
pub use state::{
    AnimState, Coin, EndReason, Enemy, EnemyKind, EnemyTemplate, Facing, GameEvent, GamePhase,
    GameState, Particle, ParticleColor, Player, PowerUp, PowerUpEffect, PowerUpKind, Weapon,
};
pub use tick::{tick, tick_second};
