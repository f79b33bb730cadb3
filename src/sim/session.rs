//! Session control actions
//!
//! ```text
//! Start ──start──▶ Playing ⇄ Paused
//!                   │  health 0 ──▶ GameOver ────┐
//!                   │  countdown 0 ─▶ DemoExpired┤
//!                   ◀──────── restart ───────────┤
//! Start ◀──────────────── dismiss ───────────────┘
//! ```
//!
//! Every action returns whether it changed anything; actions that make no
//! sense in the current phase are ignored.

use super::state::{EndReason, GameEvent, GamePhase, GameState};

fn set_phase(state: &mut GameState, to: GamePhase) {
    let from = state.phase;
    state.phase = to;
    state.emit(GameEvent::PhaseChanged { from, to });
    log::info!("Phase {:?} -> {:?}", from, to);
}

/// Reset pools, player and counters and begin playing
pub fn start(state: &mut GameState) {
    state.reset_session();
    set_phase(state, GamePhase::Playing);
    log::info!(
        "Session started (level {}, {}s demo)",
        state.level,
        state.time_remaining
    );
}

/// Start over from any phase, including mid-game and the terminal screens
pub fn restart(state: &mut GameState) {
    start(state);
}

/// Terminate a live session. Only the first call counts: later calls (and
/// calls outside Playing/Paused) are ignored.
pub fn end_session(state: &mut GameState, reason: EndReason) -> bool {
    if !matches!(state.phase, GamePhase::Playing | GamePhase::Paused) {
        log::debug!("end_session({:?}) ignored in {:?}", reason, state.phase);
        return false;
    }
    set_phase(state, reason.phase());
    state.emit(GameEvent::SessionEnded {
        reason,
        score: state.score,
        coins: state.coin_total,
    });
    log::info!(
        "Session ended ({:?}): score {}, coins {}",
        reason,
        state.score,
        state.coin_total
    );
    true
}

pub fn pause(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    set_phase(state, GamePhase::Paused);
    true
}

pub fn resume(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Paused {
        return false;
    }
    set_phase(state, GamePhase::Playing);
    true
}

pub fn toggle_pause(state: &mut GameState) -> bool {
    match state.phase {
        GamePhase::Playing => pause(state),
        GamePhase::Paused => resume(state),
        _ => false,
    }
}

/// Close a terminal overlay and return to the start screen. Final totals
/// stay readable until the next start.
pub fn dismiss(state: &mut GameState) -> bool {
    if !state.phase.is_terminal() {
        return false;
    }
    set_phase(state, GamePhase::Start);
    true
}
