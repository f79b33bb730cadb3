//! Presentation surface
//!
//! Read-only views over [`GameState`] for whatever draws the game: HUD
//! numbers, which overlay to show, and a JSON export for hosts that render
//! outside Rust.

use serde::Serialize;

use crate::sim::state::{GamePhase, GameState};

/// Overlay shown on top of the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Overlay {
    None,
    Start,
    Paused,
    GameOver,
    DemoExpired,
}

impl Overlay {
    pub fn for_phase(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Start => Overlay::Start,
            GamePhase::Playing => Overlay::None,
            GamePhase::Paused => Overlay::Paused,
            GamePhase::GameOver => Overlay::GameOver,
            GamePhase::DemoExpired => Overlay::DemoExpired,
        }
    }

    pub fn title(self) -> Option<&'static str> {
        match self {
            Overlay::None => None,
            Overlay::Start => Some("Island Brawl"),
            Overlay::Paused => Some("Paused"),
            Overlay::GameOver => Some("Game Over"),
            Overlay::DemoExpired => Some("Demo Over"),
        }
    }

    /// Terminal overlays show the final score and coin totals
    pub fn shows_totals(self) -> bool {
        matches!(self, Overlay::GameOver | Overlay::DemoExpired)
    }
}

/// HUD values for one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HudView {
    pub health: u32,
    pub max_health: u32,
    pub coins: u64,
    pub score: u64,
    pub level: u32,
    pub time_remaining: u32,
    /// Countdown as `MM:SS`
    pub time_text: String,
    pub overlay: Overlay,
}

impl HudView {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            health: state.player.health,
            max_health: state.player.max_health,
            coins: state.coin_total,
            score: state.score,
            level: state.level,
            time_remaining: state.time_remaining,
            time_text: format_clock(state.time_remaining),
            overlay: Overlay::for_phase(state.phase),
        }
    }

    /// Health bar fill in [0, 1]
    pub fn health_fraction(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Format whole seconds as `MM:SS`
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
