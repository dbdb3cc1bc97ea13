//! Platform abstraction layer
//!
//! Turns host input into balance samples for the simulator:
//! - Device motion (accelerometer including gravity)
//! - Cursor-key fallback
//! - Seeded demo rider for headless runs

pub mod demo;
pub mod input;

pub use demo::DemoInput;
pub use input::{KeyboardTilt, tilt_from_acceleration};
