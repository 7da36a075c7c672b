//! Random Source Adapters

use crate::ports::outbound::RandomSource;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fixed random source for deterministic testing.
///
/// Cycles through the given values, enabling reproducible outcome draws.
/// Values are clamped into `[0, 1]`; an empty list always yields `0.0`.
///
/// # Example
///
/// ```rust
/// use qn_04_transport::adapters::FixedRandomSource;
/// use qn_04_transport::RandomSource;
///
/// let rng = FixedRandomSource::new(vec![0.25, 1.0]);
/// assert_eq!(rng.uniform(), 0.25);
/// assert_eq!(rng.uniform(), 1.0);
/// assert_eq!(rng.uniform(), 0.25);
/// ```
#[derive(Debug)]
pub struct FixedRandomSource {
    values: Vec<f64>,
    cursor: AtomicUsize,
}

impl FixedRandomSource {
    /// Create a source cycling through `values`.
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Every draw is `0.0`: any teleportation with `P >= 0` succeeds.
    pub fn always_succeed() -> Self {
        Self::new(vec![0.0])
    }

    /// Every draw is `1.0`: only `P == 1` succeeds.
    pub fn always_fail() -> Self {
        Self::new(vec![1.0])
    }
}

impl RandomSource for FixedRandomSource {
    fn uniform(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let i = self.cursor.fetch_add(1, Ordering::Relaxed) % self.values.len();
        self.values[i].clamp(0.0, 1.0)
    }
}

/// Production random source backed by the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandomSource;

impl RandomSource for ThreadRandomSource {
    fn uniform(&self) -> f64 {
        rand::thread_rng().gen_range(0.0..=1.0)
    }
}

/// Seeded random source for reproducible simulations.
#[derive(Debug)]
pub struct SeededRandomSource {
    rng: Mutex<StdRng>,
}

impl SeededRandomSource {
    /// Create a source from a 64-bit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandomSource {
    fn uniform(&self) -> f64 {
        self.rng.lock().gen_range(0.0..=1.0)
    }
}
