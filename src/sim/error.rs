//! Caller-contract violations
//!
//! Nothing in the simulation does I/O, so none of these are retryable.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SimError {
    #[error("reset requested while the rider is still running")]
    InvalidState,
    #[error("input {value} outside the accepted range ±{limit}")]
    OutOfRangeInput { value: f32, limit: f32 },
    #[error("input sample is NaN")]
    NonFiniteInput,
    #[error("session has ended")]
    SessionEnded,
}
