//! Rail Grind - An endless rail-grind balance game
//!
//! Core modules:
//! - `sim`: Deterministic balance simulation (state, tick rule, events)
//! - `tuning`: Data-driven game balance
//! - `platform`: Input adapters (device tilt, keyboard, demo)
//! - `session`: Frame driver that enforces the fall pause

pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use sim::{BalanceSimulator, SharedSimulator, SimError, SimEvent};
pub use tuning::{InputPolicy, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Tilt beyond which the rider falls
    pub const FALL_THRESHOLD: f32 = 0.7;
    /// Tilt beyond which the rider leans left/right
    pub const POSTURE_THRESHOLD: f32 = 0.2;
    /// Rail scroll per tick (background scrolls at half this)
    pub const FORWARD_SPEED: f32 = 8.0;
    /// Lateral drift per tick while leaning
    pub const LATERAL_STEP: f32 = 4.0;
    /// Distance from track center to either edge
    pub const TRACK_HALF_WIDTH: f32 = 300.0;
    /// Pause between a fall and the automatic reset (seconds)
    pub const FALL_PAUSE_SECS: f32 = 2.0;

    /// Distance ticks per score point
    pub const DISTANCE_PER_POINT: u64 = 10;

    /// Largest frame delta the driver will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Clamp a raw tilt into the balance domain [-1, 1]
#[inline]
pub fn clamp_unit(value: f32) -> f32 {
    value.clamp(-1.0, 1.0)
}
