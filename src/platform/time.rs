//! Wall clock to simulation ticks
//!
//! The host calls [`FrameClock::drive`] once per display refresh with the
//! elapsed wall time. The clock turns that into fixed frame ticks (60 Hz,
//! bounded substeps) and whole-second countdown ticks. Whenever the session
//! is not Playing the clock drops its backlog and drives nothing.

use crate::consts::*;
use crate::sim::input::{InputState, TickInput};
use crate::sim::state::{GamePhase, GameState};
use crate::sim::tick::{tick, tick_second};

/// Ticks produced by one clock update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockTicks {
    pub frames: u32,
    pub seconds: u32,
}

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    frame_accumulator: f32,
    second_accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget any partially elapsed frame or second
    pub fn reset(&mut self) {
        self.frame_accumulator = 0.0;
        self.second_accumulator = 0.0;
    }

    /// Convert a wall-clock delta (seconds) into ticks
    pub fn advance(&mut self, dt: f32) -> ClockTicks {
        let dt = dt.clamp(0.0, MAX_FRAME_DELTA);
        self.frame_accumulator += dt;
        self.second_accumulator += dt;

        let mut frames = 0;
        while self.frame_accumulator >= FRAME_DT && frames < MAX_SUBSTEPS {
            self.frame_accumulator -= FRAME_DT;
            frames += 1;
        }
        if frames == MAX_SUBSTEPS {
            // Too far behind to catch up; keep only the partial frame
            self.frame_accumulator %= FRAME_DT;
        }

        let mut seconds = 0;
        while self.second_accumulator >= 1.0 {
            self.second_accumulator -= 1.0;
            seconds += 1;
        }

        ClockTicks { frames, seconds }
    }

    /// Advance the clock and run the resulting ticks against `state`,
    /// reading one input snapshot per frame
    pub fn drive(&mut self, state: &mut GameState, input: &mut InputState, dt: f32) -> ClockTicks {
        self.drive_with(state, dt, |_| input.frame_input())
    }

    /// Like [`FrameClock::drive`], with frame input supplied by a callback
    /// (the autopilot reads the state it is about to steer)
    pub fn drive_with<F>(&mut self, state: &mut GameState, dt: f32, mut next_input: F) -> ClockTicks
    where
        F: FnMut(&GameState) -> TickInput,
    {
        if state.phase != GamePhase::Playing {
            self.reset();
            return ClockTicks::default();
        }

        let ticks = self.advance(dt);
        for _ in 0..ticks.frames {
            let frame_input = next_input(state);
            tick(state, &frame_input);
            if state.phase != GamePhase::Playing {
                self.reset();
                return ticks;
            }
        }
        for _ in 0..ticks.seconds {
            tick_second(state);
        }
        if state.phase != GamePhase::Playing {
            self.reset();
        }
        ticks
    }
}
