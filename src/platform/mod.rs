//! Platform abstraction layer
//!
//! Host-facing glue shared by the browser and native drivers:
//! - Key names to logical actions
//! - Wall clock to frame and second ticks

pub mod input;
pub mod time;

pub use input::{action_for_key, key_down, key_up};
pub use time::{ClockTicks, FrameClock};
