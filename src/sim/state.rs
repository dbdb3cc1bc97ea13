//! Balance state and core simulation types
//!
//! Everything a frame needs to render lives here; nothing here touches the renderer.

use serde::{Deserialize, Serialize};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// Rider upright and sliding
    #[default]
    Running,
    /// Rider fell; frozen until reset
    Fallen,
}

/// Discrete lean shown by the rider sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Posture {
    Left,
    #[default]
    Center,
    Right,
}

impl Posture {
    /// Classify a balance value (no hysteresis)
    pub fn from_balance(balance: f32, threshold: f32) -> Self {
        if balance < -threshold {
            Posture::Left
        } else if balance > threshold {
            Posture::Right
        } else {
            Posture::Center
        }
    }

    /// Direction of lateral drift: -1, 0 or 1
    pub fn drift_sign(&self) -> f32 {
        match self {
            Posture::Left => -1.0,
            Posture::Center => 0.0,
            Posture::Right => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Posture::Left => "left",
            Posture::Center => "center",
            Posture::Right => "right",
        }
    }
}

/// Emitted once per running tick, and on reset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Rider still upright: update pose, camera and score display
    Progressed {
        posture: Posture,
        lateral_offset: f32,
        score: u64,
    },
    /// Rider fell: show the fall alert with the final score
    Fallen { final_score: u64 },
    /// Round restarted: restore centered visuals
    Reset,
}

/// Complete round state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceState {
    /// Signed tilt in [-1, 1]
    pub balance: f32,
    /// Lean classification from the last tick
    pub posture: Posture,
    /// Ticks survived this round
    pub distance: u64,
    /// `distance / DISTANCE_PER_POINT`
    pub score: u64,
    pub phase: RunPhase,
    /// Rider drift from the track center
    pub lateral_offset: f32,
    /// Forward scroll of the rail (background scrolls at half rate)
    pub rail_scroll: f64,
}

impl Default for BalanceState {
    fn default() -> Self {
        Self::new()
    }
}

impl BalanceState {
    /// Fresh round: centered, zeroed, running
    pub fn new() -> Self {
        Self {
            balance: 0.0,
            posture: Posture::Center,
            distance: 0,
            score: 0,
            phase: RunPhase::Running,
            lateral_offset: 0.0,
            rail_scroll: 0.0,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    /// Background parallax scroll
    #[inline]
    pub fn background_scroll(&self) -> f64 {
        self.rail_scroll * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posture_thresholds() {
        assert_eq!(Posture::from_balance(-0.21, 0.2), Posture::Left);
        assert_eq!(Posture::from_balance(-0.2, 0.2), Posture::Center);
        assert_eq!(Posture::from_balance(0.0, 0.2), Posture::Center);
        assert_eq!(Posture::from_balance(0.2, 0.2), Posture::Center);
        assert_eq!(Posture::from_balance(0.21, 0.2), Posture::Right);
    }

    #[test]
    fn test_new_state_is_centered() {
        let state = BalanceState::new();
        assert!(state.is_running());
        assert_eq!(state.posture, Posture::Center);
        assert_eq!(state.distance, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.lateral_offset, 0.0);
    }

    #[test]
    fn test_background_scrolls_at_half_speed() {
        let mut state = BalanceState::new();
        state.rail_scroll = 200.0;
        assert_eq!(state.background_scroll(), state.rail_scroll * 0.5);
    }

    #[test]
    fn test_state_snapshot_json() {
        let mut state = BalanceState::new();
        state.balance = -0.5;
        state.distance = 42;
        let json = serde_json::to_string(&state).unwrap();
        let restored: BalanceState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }
}
