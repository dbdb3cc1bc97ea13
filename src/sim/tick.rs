//! Per-frame simulation step
//!
//! Pure functions over `BalanceState`; the caller owns timing.

use super::error::SimError;
use super::state::{BalanceState, Posture, RunPhase, SimEvent};
use crate::clamp_unit;
use crate::consts::DISTANCE_PER_POINT;
use crate::tuning::{InputPolicy, Tuning};

/// Store a tilt sample as the new balance
///
/// Ignored while fallen so queued samples can't leak into the next round.
/// Posture is left alone until the next tick.
pub fn apply_input(state: &mut BalanceState, value: f32, tuning: &Tuning) -> Result<(), SimError> {
    validate_sample(value, tuning.input_policy)?;
    if !state.is_running() {
        return Ok(());
    }
    state.balance = clamp_unit(value);
    Ok(())
}

/// Check a raw sample against the input policy
///
/// Runs regardless of phase, so a bad sample is reported even during the fall pause.
pub fn validate_sample(value: f32, policy: InputPolicy) -> Result<(), SimError> {
    if value.is_nan() {
        log::warn!("Rejected NaN tilt sample");
        return Err(SimError::NonFiniteInput);
    }
    if let InputPolicy::Reject { limit } = policy {
        if value.abs() > limit {
            log::warn!("Rejected tilt sample {} (limit ±{})", value, limit);
            return Err(SimError::OutOfRangeInput { value, limit });
        }
    }
    Ok(())
}

/// Advance the round by one frame
///
/// Returns `None` while fallen (paused), otherwise exactly one of
/// `Progressed` or `Fallen`.
pub fn tick(state: &mut BalanceState, tuning: &Tuning) -> Option<SimEvent> {
    if !state.is_running() {
        return None;
    }

    let posture = Posture::from_balance(state.balance, tuning.posture_threshold);
    if posture != state.posture {
        log::debug!("Posture {} -> {}", state.posture.as_str(), posture.as_str());
    }
    state.posture = posture;

    let (min_x, max_x) = (tuning.track_min_x(), tuning.track_max_x());
    state.lateral_offset =
        (state.lateral_offset + posture.drift_sign() * tuning.lateral_step).clamp(min_x, max_x);

    state.distance += 1;
    state.score = state.distance / DISTANCE_PER_POINT;
    state.rail_scroll += f64::from(tuning.forward_speed);

    let over_tilted = state.balance.abs() > tuning.fall_threshold;
    let off_track = state.lateral_offset <= min_x || state.lateral_offset >= max_x;
    if over_tilted || off_track {
        state.phase = RunPhase::Fallen;
        log::debug!(
            "Fell at distance {} (balance {:.2}, offset {:.1})",
            state.distance,
            state.balance,
            state.lateral_offset
        );
        return Some(SimEvent::Fallen {
            final_score: state.score,
        });
    }

    Some(SimEvent::Progressed {
        posture,
        lateral_offset: state.lateral_offset,
        score: state.score,
    })
}

/// Start a new round after a fall
pub fn reset(state: &mut BalanceState) -> Result<SimEvent, SimError> {
    if state.is_running() {
        return Err(SimError::InvalidState);
    }
    *state = BalanceState::new();
    log::debug!("Round reset");
    Ok(SimEvent::Reset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_with(balance: f32) -> (BalanceState, Tuning) {
        let tuning = Tuning::default();
        let mut state = BalanceState::new();
        apply_input(&mut state, balance, &tuning).unwrap();
        (state, tuning)
    }

    #[test]
    fn test_centered_ride_scores() {
        let (mut state, tuning) = running_with(0.0);
        for _ in 0..25 {
            let event = tick(&mut state, &tuning);
            assert!(matches!(event, Some(SimEvent::Progressed { .. })));
        }
        assert_eq!(state.distance, 25);
        assert_eq!(state.score, 2);
        assert_eq!(state.posture, Posture::Center);
        assert_eq!(state.rail_scroll, 25.0 * f64::from(tuning.forward_speed));
        assert!(state.is_running());
    }

    #[test]
    fn test_over_tilt_falls() {
        let (mut state, tuning) = running_with(0.9);
        let event = tick(&mut state, &tuning);
        assert_eq!(event, Some(SimEvent::Fallen { final_score: 0 }));
        assert_eq!(state.phase, RunPhase::Fallen);
    }

    #[test]
    fn test_lean_left_drifts() {
        let (mut state, tuning) = running_with(-0.3);
        let event = tick(&mut state, &tuning);
        assert_eq!(
            event,
            Some(SimEvent::Progressed {
                posture: Posture::Left,
                lateral_offset: -tuning.lateral_step,
                score: 0,
            })
        );
        assert!(state.is_running());
    }

    #[test]
    fn test_track_edge_falls() {
        let (mut state, tuning) = running_with(0.5);
        let ticks_to_edge = (tuning.track_half_width / tuning.lateral_step) as u64;
        for _ in 1..ticks_to_edge {
            assert!(matches!(
                tick(&mut state, &tuning),
                Some(SimEvent::Progressed { .. })
            ));
        }
        let event = tick(&mut state, &tuning);
        assert_eq!(
            event,
            Some(SimEvent::Fallen {
                final_score: ticks_to_edge / DISTANCE_PER_POINT
            })
        );
        assert_eq!(state.lateral_offset, tuning.track_max_x());
    }

    #[test]
    fn test_fallen_tick_is_noop() {
        let (mut state, tuning) = running_with(0.9);
        tick(&mut state, &tuning);
        let frozen = state.clone();
        for _ in 0..5 {
            assert_eq!(tick(&mut state, &tuning), None);
        }
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_input_ignored_while_fallen() {
        let (mut state, tuning) = running_with(0.9);
        tick(&mut state, &tuning);
        apply_input(&mut state, 0.0, &tuning).unwrap();
        assert_eq!(state.balance, 0.9);
    }

    #[test]
    fn test_input_does_not_touch_posture() {
        let (mut state, _tuning) = running_with(-0.5);
        assert_eq!(state.posture, Posture::Center);
        assert_eq!(state.balance, -0.5);
    }

    #[test]
    fn test_reject_policy() {
        let tuning = Tuning {
            input_policy: InputPolicy::Reject { limit: 2.0 },
            ..Default::default()
        };
        let mut state = BalanceState::new();
        let err = apply_input(&mut state, 5.0, &tuning).unwrap_err();
        assert_eq!(err, SimError::OutOfRangeInput { value: 5.0, limit: 2.0 });
        assert_eq!(state.balance, 0.0);

        apply_input(&mut state, 1.5, &tuning).unwrap();
        assert_eq!(state.balance, 1.0);
    }

    #[test]
    fn test_rejected_sample_while_fallen_keeps_state() {
        let tuning = Tuning {
            input_policy: InputPolicy::Reject { limit: 2.0 },
            ..Default::default()
        };
        let mut state = BalanceState::new();
        apply_input(&mut state, 0.9, &tuning).unwrap();
        tick(&mut state, &tuning);
        let frozen = state.clone();

        assert_eq!(
            apply_input(&mut state, 5.0, &tuning),
            Err(SimError::OutOfRangeInput { value: 5.0, limit: 2.0 })
        );
        assert_eq!(
            apply_input(&mut state, f32::NAN, &tuning),
            Err(SimError::NonFiniteInput)
        );
        assert_eq!(apply_input(&mut state, -0.5, &tuning), Ok(()));
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_rail_scroll_keeps_advancing_on_long_runs() {
        let tuning = Tuning::default();
        let mut state = BalanceState::new();
        state.rail_scroll = 134_217_728.0;
        tick(&mut state, &tuning);
        assert_eq!(state.rail_scroll, 134_217_736.0);
        assert_eq!(state.background_scroll(), 67_108_868.0);
    }

    #[test]
    fn test_nan_rejected() {
        let tuning = Tuning::default();
        let mut state = BalanceState::new();
        assert_eq!(
            apply_input(&mut state, f32::NAN, &tuning),
            Err(SimError::NonFiniteInput)
        );
        assert_eq!(state.balance, 0.0);
    }

    #[test]
    fn test_reset_requires_fall() {
        let (mut state, tuning) = running_with(0.1);
        assert_eq!(reset(&mut state), Err(SimError::InvalidState));

        apply_input(&mut state, -1.0, &tuning).unwrap();
        tick(&mut state, &tuning);
        assert_eq!(reset(&mut state), Ok(SimEvent::Reset));
        assert_eq!(state, BalanceState::new());
    }
}
