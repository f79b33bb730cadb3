//! Island Brawl - A side-scrolling island brawler
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, combat, session state)
//! - `platform`: Browser/native platform abstraction (keys, frame clock)
//! - `tuning`: Data-driven game balance
//! - `ui`: Read-only views for the presentation layer

pub mod platform;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use tuning::Tuning;
pub use ui::{HudView, Overlay};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one display frame at 60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Frame ticks per countdown second
    pub const FRAMES_PER_SECOND: u32 = 60;
    /// Maximum substeps per update to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Wall-clock deltas above this are treated as a stall, not as game time
    pub const MAX_FRAME_DELTA: f32 = 0.25;

    /// Play field dimensions
    pub const CANVAS_WIDTH: f32 = 1200.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;
    /// Feet line for the player and enemies
    pub const GROUND_LEVEL: f32 = CANVAS_HEIGHT - 80.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 100.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    pub const PLAYER_START_X: f32 = 100.0;

    /// Particles per burst
    pub const BURST_SIZE: usize = 10;
    /// Hard cap on live particles
    pub const MAX_PARTICLES: usize = 512;
}
