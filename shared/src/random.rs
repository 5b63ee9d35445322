//! Injectable randomness for confidence jitter and random disease picks

use rand::Rng;

/// Source of uniform random numbers used by the scorer and classifier
///
/// Every [`rand::Rng`] is a `RandomSource`, so production code passes
/// `rand::thread_rng()` and tests pass a seeded `StdRng` or [`FixedRandom`].
pub trait RandomSource {
    /// Uniform value in `[0, 1)`
    fn next_f64(&mut self) -> f64;

    /// Uniform value in `[low, high)`
    fn next_in_range(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        let index = (self.next_f64() * len as f64).floor() as usize;
        index.min(len.saturating_sub(1))
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_f64(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Random source that always returns the same value
///
/// `FixedRandom(0.5)` yields zero jitter on the health confidence and the
/// middle of every range, which makes analysis output fully reproducible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRandom(pub f64);

impl FixedRandom {
    pub fn midpoint() -> Self {
        Self(0.5)
    }
}

impl RandomSource for FixedRandom {
    fn next_f64(&mut self) -> f64 {
        // Keep the half-open contract even for a stub value of 1.0
        self.0.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
