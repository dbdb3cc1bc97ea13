//! Balance simulator: owns the round state and its tuning

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use super::error::SimError;
use super::state::{BalanceState, SimEvent};
use super::tick::{apply_input, reset, tick, validate_sample};
use crate::tuning::{InputPolicy, Tuning};

/// Single-threaded simulator driven by one render loop
#[derive(Debug, Clone)]
pub struct BalanceSimulator {
    state: BalanceState,
    tuning: Tuning,
    ended: bool,
}

impl Default for BalanceSimulator {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl BalanceSimulator {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            state: BalanceState::new(),
            tuning,
            ended: false,
        }
    }

    pub fn state(&self) -> &BalanceState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Push a tilt sample from the input source
    pub fn set_input(&mut self, value: f32) -> Result<(), SimError> {
        self.ensure_live()?;
        apply_input(&mut self.state, value, &self.tuning)
    }

    /// Advance one frame; `Ok(None)` means paused after a fall
    pub fn tick(&mut self) -> Result<Option<SimEvent>, SimError> {
        self.ensure_live()?;
        Ok(tick(&mut self.state, &self.tuning))
    }

    /// Restart after a fall; the pause before this is the caller's job
    pub fn reset(&mut self) -> Result<SimEvent, SimError> {
        self.ensure_live()?;
        reset(&mut self.state)
    }

    /// Tear the session down; every later call fails with `SessionEnded`
    pub fn end_session(&mut self) {
        if !self.ended {
            log::info!("Session ended at distance {}", self.state.distance);
        }
        self.ended = true;
    }

    fn ensure_live(&self) -> Result<(), SimError> {
        if self.ended {
            Err(SimError::SessionEnded)
        } else {
            Ok(())
        }
    }
}

/// Mailbox value meaning "no sample waiting"
const NO_SAMPLE: u64 = u64::MAX;

/// Simulator for hosts that deliver input callbacks on other threads
///
/// `set_input` never blocks: it overwrites a single-slot mailbox that the
/// next locked operation drains. `tick` holds the lock for its whole step.
#[derive(Debug)]
pub struct SharedSimulator {
    inner: Mutex<BalanceSimulator>,
    pending: AtomicU64,
    ended: AtomicBool,
    policy: InputPolicy,
}

impl SharedSimulator {
    pub fn new(tuning: Tuning) -> Self {
        let policy = tuning.input_policy;
        Self {
            inner: Mutex::new(BalanceSimulator::new(tuning)),
            pending: AtomicU64::new(NO_SAMPLE),
            ended: AtomicBool::new(false),
            policy,
        }
    }

    /// Queue a tilt sample; the latest sample wins
    ///
    /// Range checks run here so callers still see rejected samples.
    pub fn set_input(&self, value: f32) -> Result<(), SimError> {
        if self.ended.load(Ordering::Acquire) {
            return Err(SimError::SessionEnded);
        }
        validate_sample(value, self.policy)?;
        let bits = u64::from(value.to_bits());
        self.pending.store(bits, Ordering::Release);
        Ok(())
    }

    pub fn tick(&self) -> Result<Option<SimEvent>, SimError> {
        self.with_sim(|sim| sim.tick())
    }

    pub fn reset(&self) -> Result<SimEvent, SimError> {
        self.with_sim(|sim| sim.reset())
    }

    pub fn end_session(&self) {
        let mut sim = self.lock();
        self.ended.store(true, Ordering::Release);
        self.pending.store(NO_SAMPLE, Ordering::Release);
        sim.end_session();
    }

    pub fn is_ended(&self) -> bool {
        self.ended.load(Ordering::Acquire)
    }

    /// Copy of the current state, including any queued sample
    pub fn snapshot(&self) -> BalanceState {
        self.with_sim(|sim| Ok(sim.state().clone()))
            .unwrap_or_else(|_| self.lock().state().clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BalanceSimulator> {
        // State is only written under &mut, so a poisoned guard is still consistent
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn with_sim<T>(
        &self,
        f: impl FnOnce(&mut BalanceSimulator) -> Result<T, SimError>,
    ) -> Result<T, SimError> {
        let mut sim = self.lock();
        let bits = self.pending.swap(NO_SAMPLE, Ordering::Acquire);
        if bits != NO_SAMPLE {
            sim.set_input(f32::from_bits(bits as u32))?;
        }
        f(&mut *sim)
    }
}
