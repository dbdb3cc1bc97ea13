//! Frame driver
//!
//! Stands in for the render loop: one simulator tick per frame, and the fall
//! pause timer that decides when `reset()` is called.

use crate::consts::MAX_FRAME_DT;
use crate::sim::{BalanceSimulator, SimError, SimEvent};
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct Session {
    sim: BalanceSimulator,
    /// Seconds left before the automatic reset, while fallen
    fall_pause: Option<f32>,
    /// Best final score this process (not persisted)
    best_score: u64,
    falls: u32,
    frames: u64,
}

impl Session {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            sim: BalanceSimulator::new(tuning),
            fall_pause: None,
            best_score: 0,
            falls: 0,
            frames: 0,
        }
    }

    pub fn simulator(&self) -> &BalanceSimulator {
        &self.sim
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    pub fn falls(&self) -> u32 {
        self.falls
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Seconds until the automatic reset, if the rider is down
    pub fn pause_remaining(&self) -> Option<f32> {
        self.fall_pause
    }

    /// Forward an input sample to the simulator
    pub fn push_input(&mut self, value: f32) -> Result<(), SimError> {
        self.sim.set_input(value)
    }

    /// Run one rendered frame of `dt` seconds
    pub fn frame(&mut self, dt: f32) -> Result<Option<SimEvent>, SimError> {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.frames += 1;

        if let Some(remaining) = self.fall_pause {
            let remaining = remaining - dt;
            if remaining > 0.0 {
                self.fall_pause = Some(remaining);
                return Ok(None);
            }
            self.fall_pause = None;
            let event = self.sim.reset()?;
            log::info!("Round restarted");
            return Ok(Some(event));
        }

        let event = self.sim.tick()?;
        if let Some(SimEvent::Fallen { final_score }) = event {
            self.falls += 1;
            self.best_score = self.best_score.max(final_score);
            self.fall_pause = Some(self.sim.tuning().fall_pause_secs);
            log::info!(
                "Fall! Score: {} (best {}, falls {})",
                final_score,
                self.best_score,
                self.falls
            );
        }
        Ok(event)
    }

    /// Stop driving the simulator
    pub fn end(&mut self) {
        self.fall_pause = None;
        self.sim.end_session();
    }
}
