//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per rendered frame, no internal clock
//! - Input samples only change `balance`; everything else moves in `tick`
//! - No rendering or platform dependencies

pub mod error;
pub mod simulator;
pub mod state;
pub mod tick;

pub use error::SimError;
pub use simulator::{BalanceSimulator, SharedSimulator};
pub use state::{BalanceState, Posture, RunPhase, SimEvent};
pub use tick::{apply_input, reset, tick, validate_sample};
