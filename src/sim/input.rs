//! Logical input state
//!
//! Tracks which actions are held and which were freshly pressed since the
//! last frame. The frame step only ever sees the [`TickInput`] snapshot.

use serde::{Deserialize, Serialize};

/// Logical actions, independent of the physical key layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Attack,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Attack,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump while grounded
    pub up: bool,
    /// Tracked but unused by gameplay
    pub down: bool,
    pub attack_held: bool,
    /// Attack went down since the previous tick
    pub attack_pressed: bool,
}

const ACTION_COUNT: usize = Action::ALL.len();

/// Held keys plus one-shot press edges
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: [bool; ACTION_COUNT],
    pressed: [bool; ACTION_COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down. Auto-repeat while held does not count as a new press.
    pub fn press(&mut self, action: Action) {
        let i = action.index();
        if !self.held[i] {
            self.pressed[i] = true;
        }
        self.held[i] = true;
    }

    pub fn release(&mut self, action: Action) {
        self.held[action.index()] = false;
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held[action.index()]
    }

    /// Drop everything (focus lost, session restarted)
    pub fn clear(&mut self) {
        self.held = [false; ACTION_COUNT];
        self.pressed = [false; ACTION_COUNT];
    }

    /// Snapshot for the next tick; consumes the press edges
    pub fn frame_input(&mut self) -> TickInput {
        let input = TickInput {
            left: self.is_held(Action::Left),
            right: self.is_held(Action::Right),
            up: self.is_held(Action::Up),
            down: self.is_held(Action::Down),
            attack_held: self.is_held(Action::Attack),
            attack_pressed: self.pressed[Action::Attack.index()],
        };
        self.pressed = [false; ACTION_COUNT];
        input
    }
}
