//! The seedable random stream shared by the kernel and the scenario
//! generators.
//!
//! # Determinism strategy
//!
//! A `SimRng` is fully determined by the seed it was created (or last
//! reseeded) with.  Consumers that compose several random processes never
//! share one stream between them.  Instead a *master* stream hands out
//! independent sub-seeds:
//!
//!   master = SimRng::new(master_seed)
//!   arrivals  = generate(master.next_seed())
//!   locations = generate(master.next_seed())
//!   ...
//!
//! Each sub-generator builds its own `SimRng` from the sub-seed it was given,
//! so the number of draws one generator makes can never shift the values
//! another generator sees.  Only the *order and count of `next_seed` calls*
//! on the master stream is part of the reproducibility contract.
//!
//! Backed by `StdRng`, which is reproducible for a fixed `rand` version.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub use rand::distributions::uniform::SampleUniform;

/// Seedable pseudo-random stream.
#[derive(Clone, Debug)]
pub struct SimRng(StdRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(StdRng::seed_from_u64(seed))
    }

    /// Reset the stream so the next draws equal those of `SimRng::new(seed)`.
    pub fn reseed(&mut self, seed: u64) {
        self.0 = StdRng::seed_from_u64(seed);
    }

    /// Draw a sub-seed for an independent consumer.
    #[inline]
    pub fn next_seed(&mut self) -> u64 {
        self.0.r#gen()
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.0.r#gen()
    }

    /// Exponentially distributed draw with the given `mean`.
    ///
    /// Inverse-transform sampling: `-mean * ln(1 - u)` with `u` in `[0, 1)`,
    /// so the logarithm argument is never zero.
    #[inline]
    pub fn next_exponential(&mut self, mean: f64) -> f64 {
        -mean * (1.0 - self.next_f64()).ln()
    }

    /// Generate a value uniformly in `range`.
    ///
    /// # Panics
    /// Panics if `range` is empty.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
