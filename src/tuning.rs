//! Data-driven game balance
//!
//! Loaded from JSON; any field left out falls back to the defaults in `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// How `set_input` treats samples outside [-1, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum InputPolicy {
    /// Clamp into range (matches the motion handler's behavior)
    #[default]
    Clamp,
    /// Reject samples whose magnitude exceeds `limit`, clamp the rest
    Reject { limit: f32 },
}

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Simulator and driver tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub fall_threshold: f32,
    pub posture_threshold: f32,
    /// Rail scroll per running tick
    pub forward_speed: f32,
    /// Lateral drift per tick while leaning
    pub lateral_step: f32,
    /// Track bounds are `[-track_half_width, track_half_width]`
    pub track_half_width: f32,
    /// Enforced by the driver, never by the simulator
    pub fall_pause_secs: f32,
    pub input_policy: InputPolicy,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fall_threshold: FALL_THRESHOLD,
            posture_threshold: POSTURE_THRESHOLD,
            forward_speed: FORWARD_SPEED,
            lateral_step: LATERAL_STEP,
            track_half_width: TRACK_HALF_WIDTH,
            fall_pause_secs: FALL_PAUSE_SECS,
            input_policy: InputPolicy::Clamp,
        }
    }
}

impl Tuning {
    /// Left track edge
    #[inline]
    pub fn track_min_x(&self) -> f32 {
        -self.track_half_width
    }

    /// Right track edge
    #[inline]
    pub fn track_max_x(&self) -> f32 {
        self.track_half_width
    }

    /// Parse and validate tuning from a JSON string
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Check that the values describe a playable game
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("fall_threshold", self.fall_threshold),
            ("posture_threshold", self.posture_threshold),
            ("forward_speed", self.forward_speed),
            ("lateral_step", self.lateral_step),
            ("track_half_width", self.track_half_width),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::Invalid(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        if !self.fall_pause_secs.is_finite() || self.fall_pause_secs < 0.0 {
            return Err(TuningError::Invalid(format!(
                "fall_pause_secs must be finite and non-negative, got {}",
                self.fall_pause_secs
            )));
        }
        if self.fall_threshold > 1.0 {
            return Err(TuningError::Invalid(format!(
                "fall_threshold {} is unreachable (balance is within [-1, 1])",
                self.fall_threshold
            )));
        }
        if self.posture_threshold > self.fall_threshold {
            return Err(TuningError::Invalid(format!(
                "posture_threshold {} exceeds fall_threshold {}",
                self.posture_threshold, self.fall_threshold
            )));
        }
        if let InputPolicy::Reject { limit } = self.input_policy {
            if !limit.is_finite() || limit < 1.0 {
                return Err(TuningError::Invalid(format!(
                    "reject limit must be at least 1.0, got {limit}"
                )));
            }
        }
        Ok(())
    }
}
