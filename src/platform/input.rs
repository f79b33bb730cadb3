//! Physical key mapping
//!
//! Both WASD and the arrow keys drive the same logical actions; space attacks.
//! Key names follow `KeyboardEvent.key`.

use crate::sim::input::{Action, InputState};

/// Map a key name to its action. Letter keys are case-insensitive so a held
/// shift or caps lock doesn't drop input.
pub fn action_for_key(key: &str) -> Option<Action> {
    match key {
        " " | "Spacebar" => return Some(Action::Attack),
        "ArrowUp" => return Some(Action::Up),
        "ArrowDown" => return Some(Action::Down),
        "ArrowLeft" => return Some(Action::Left),
        "ArrowRight" => return Some(Action::Right),
        _ => {}
    }
    match key.to_ascii_lowercase().as_str() {
        "w" => Some(Action::Up),
        "s" => Some(Action::Down),
        "a" => Some(Action::Left),
        "d" => Some(Action::Right),
        _ => None,
    }
}

/// Feed a key-down event. Returns false for keys the game ignores.
pub fn key_down(input: &mut InputState, key: &str) -> bool {
    match action_for_key(key) {
        Some(action) => {
            input.press(action);
            true
        }
        None => false,
    }
}

/// Feed a key-up event. Returns false for keys the game ignores.
pub fn key_up(input: &mut InputState, key: &str) -> bool {
    match action_for_key(key) {
        Some(action) => {
            input.release(action);
            true
        }
        None => false,
    }
}
