//! Device tilt and keyboard input
//!
//! Sampling rate and smoothing belong here, not in the simulator.

use glam::Vec3;

use crate::clamp_unit;

/// Lateral acceleration (m/s²) that maps to a full-scale tilt
pub const ACCEL_FULL_SCALE: f32 = 10.0;

/// Tilt reported while a cursor key is held
pub const KEY_TILT: f32 = 0.6;

/// Convert acceleration including gravity into a balance sample
///
/// Only the device's x axis matters; holding the phone flat reads as centered.
pub fn tilt_from_acceleration(accel: Vec3) -> f32 {
    clamp_unit(accel.x / ACCEL_FULL_SCALE)
}

/// Cursor-key fallback for devices without motion sensors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardTilt {
    pub left: bool,
    pub right: bool,
}

impl KeyboardTilt {
    pub fn new(left: bool, right: bool) -> Self {
        Self { left, right }
    }

    /// Sample for this frame, `None` when no key is held
    ///
    /// Right wins when both are held.
    pub fn sample(&self) -> Option<f32> {
        if self.right {
            Some(KEY_TILT)
        } else if self.left {
            Some(-KEY_TILT)
        } else {
            None
        }
    }
}
