//! Deterministic simulation-level RNG.
//!
//! The tick loop never draws random numbers: ties are broken by identifier
//! so that results are independent of thread scheduling.  Randomness is only
//! used when synthesising a population from zone shares, and then always
//! from a `SimRng` seeded by `SimConfig::seed`.

use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Seeded RNG for configuration-time generation.
///
/// Used only in single-threaded contexts.  The same seed always produces the
/// same sequence on the same platform.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types
    /// (`WeightedIndex`, `Uniform`, …).
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        use rand::Rng;
        self.0.gen_range(range)
    }
}
