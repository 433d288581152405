//! Uniform random source abstraction.
//!
//! The engine never touches a global RNG. Every sampler and series builder
//! takes a `&mut dyn UniformSource`, so the same seed reproduces an entire
//! dashboard or report bit for bit.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform random values in `[0, 1)`.
pub trait UniformSource {
    /// Next uniform sample in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;
}

/// Default source backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct SimRng {
    inner: StdRng,
}

impl SimRng {
    /// Source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_os_rng(),
        }
    }

    /// Deterministic source for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl UniformSource for SimRng {
    fn next_uniform(&mut self) -> f64 {
        self.inner.random()
    }
}

/// Uniform value in `[low, high)`.
pub fn uniform_in(source: &mut dyn UniformSource, low: f64, high: f64) -> f64 {
    low + source.next_uniform() * (high - low)
}

/// Uniform integer in `[low, high]`, both ends inclusive.
pub fn uniform_int(source: &mut dyn UniformSource, low: u32, high: u32) -> u32 {
    if high <= low {
        return low;
    }
    let span = (high - low + 1) as f64;
    low + (source.next_uniform() * span) as u32
}

/// Fixed-sequence source for tests that need exact uniform draws.
///
/// Cycles through the provided values.
#[cfg(test)]
pub(crate) struct SequenceSource {
    values: Vec<f64>,
    index: usize,
}

#[cfg(test)]
impl SequenceSource {
    pub(crate) fn new(values: Vec<f64>) -> Self {
        Self { values, index: 0 }
    }
}

#[cfg(test)]
impl UniformSource for SequenceSource {
    fn next_uniform(&mut self) -> f64 {
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value
    }
}
