//! Single-value samplers used for service durations, capacities, and window
//! lengths.

use pdp_core::SimRng;
use pdp_core::rng::SampleUniform;

use crate::{ScenarioError, ScenarioResult};

/// Produces one value per seed.
///
/// `get` must be a pure function of `seed`: the same seed always yields the
/// same value.
pub trait ValueGenerator<T>: Send + Sync {
    fn get(&self, seed: u64) -> T;
}

// ── Constant ──────────────────────────────────────────────────────────────────

/// Always returns the same value and ignores the seed.
#[derive(Clone, Debug, PartialEq)]
pub struct Constant<T>(T);

impl<T: Clone + Send + Sync> ValueGenerator<T> for Constant<T> {
    fn get(&self, _seed: u64) -> T {
        self.0.clone()
    }
}

pub fn constant<T>(value: T) -> Constant<T> {
    Constant(value)
}

// ── Uniform ───────────────────────────────────────────────────────────────────

/// Uniform draw from the inclusive range `[low, high]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Uniform<T> {
    low:  T,
    high: T,
}

impl<T> ValueGenerator<T> for Uniform<T>
where
    T: SampleUniform + PartialOrd + Copy + Send + Sync,
{
    fn get(&self, seed: u64) -> T {
        SimRng::new(seed).gen_range(self.low..=self.high)
    }
}

/// A uniform sampler over `[low, high]`.  Fails if `low > high`.
pub fn uniform<T: PartialOrd + std::fmt::Debug>(low: T, high: T) -> ScenarioResult<Uniform<T>> {
    if low > high {
        return Err(ScenarioError::Config(format!(
            "uniform range is empty: {low:?} > {high:?}"
        )));
    }
    Ok(Uniform { low, high })
}
