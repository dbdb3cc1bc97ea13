//! Seeded demo rider
//!
//! Random-walk tilt with a pull back toward center. Same seed, same run.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Largest per-frame tilt change
const DEFAULT_JITTER: f32 = 0.08;
/// Fraction of the current tilt removed each frame
const DEFAULT_RECENTER: f32 = 0.05;

#[derive(Debug, Clone)]
pub struct DemoInput {
    rng: Pcg32,
    tilt: f32,
    jitter: f32,
    recenter: f32,
}

impl DemoInput {
    pub fn new(seed: u64) -> Self {
        Self::with_params(seed, DEFAULT_JITTER, DEFAULT_RECENTER)
    }

    pub fn with_params(seed: u64, jitter: f32, recenter: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            tilt: 0.0,
            jitter: jitter.abs(),
            recenter: recenter.clamp(0.0, 1.0),
        }
    }

    /// Start the walk over from center (after a reset)
    pub fn restart(&mut self) {
        self.tilt = 0.0;
    }

    /// Next tilt sample in [-1, 1]
    pub fn next_sample(&mut self) -> f32 {
        let step = if self.jitter > 0.0 {
            self.rng.random_range(-self.jitter..=self.jitter)
        } else {
            0.0
        };
        self.tilt = ((self.tilt + step) * (1.0 - self.recenter)).clamp(-1.0, 1.0);
        self.tilt
    }
}
