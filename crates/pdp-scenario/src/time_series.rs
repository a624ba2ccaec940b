//! Event-time generators: sorted sequences of arrival times over a fixed
//! length.

use pdp_core::SimRng;

use crate::{ScenarioError, ScenarioResult};

/// Four hours in milliseconds.
const DEFAULT_LENGTH: f64 = 14_400_000.0;
const DEFAULT_EXPECTED_EVENTS: f64 = 20.0;

/// Produces a non-decreasing sequence of times in `[0, length)`.
pub trait TimeSeriesGenerator: Send + Sync {
    fn generate(&self, seed: u64) -> Vec<f64>;
}

fn check_length(length: f64) -> ScenarioResult<()> {
    if length.is_finite() && length > 0.0 {
        Ok(())
    } else {
        Err(ScenarioError::Config(format!(
            "time series length must be positive and finite, got {length}"
        )))
    }
}

// ── Homogeneous Poisson ───────────────────────────────────────────────────────

/// Homogeneous Poisson process: exponential inter-arrival gaps with mean
/// `length / expected_events`, truncated at `length`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PoissonProcess {
    length:          f64,
    expected_events: f64,
}

impl PoissonProcess {
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[inline]
    pub fn expected_events(&self) -> f64 {
        self.expected_events
    }
}

impl Default for PoissonProcess {
    /// 20 expected events over four hours.
    fn default() -> Self {
        Self { length: DEFAULT_LENGTH, expected_events: DEFAULT_EXPECTED_EVENTS }
    }
}

impl TimeSeriesGenerator for PoissonProcess {
    fn generate(&self, seed: u64) -> Vec<f64> {
        let mut rng = SimRng::new(seed);
        let mean_gap = self.length / self.expected_events;
        let mut times = Vec::new();
        let mut t = rng.next_exponential(mean_gap);
        while t < self.length {
            times.push(t);
            t += rng.next_exponential(mean_gap);
        }
        times
    }
}

pub fn homogeneous_poisson(length: f64, expected_events: f64) -> ScenarioResult<PoissonProcess> {
    check_length(length)?;
    if !(expected_events.is_finite() && expected_events > 0.0) {
        return Err(ScenarioError::Config(format!(
            "expected event count must be positive and finite, got {expected_events}"
        )));
    }
    Ok(PoissonProcess { length, expected_events })
}

// ── Uniform ───────────────────────────────────────────────────────────────────

/// Exactly `count` independent uniform draws in `[0, length)`, sorted.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UniformTimes {
    length: f64,
    count:  usize,
}

impl TimeSeriesGenerator for UniformTimes {
    fn generate(&self, seed: u64) -> Vec<f64> {
        let mut rng = SimRng::new(seed);
        let mut times: Vec<f64> = (0..self.count)
            .map(|_| rng.next_f64() * self.length)
            .collect();
        times.sort_by(f64::total_cmp);
        times
    }
}

pub fn uniform(length: f64, count: usize) -> ScenarioResult<UniformTimes> {
    check_length(length)?;
    Ok(UniformTimes { length, count })
}
