//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! A run draws every random number (routing decisions, lengths of stay,
//! inter-arrival gaps) from one `SmallRng` seeded from the run's seed, in
//! the fixed order the arrival process consumes them.  Given the same seed
//! and parameters a run is bit-for-bit reproducible.
//!
//! Independent replications derive their seeds from a root `SimRng` via
//! [`SimRng::child`]:
//!
//!   seed = root.next_u64() XOR (offset * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive offsets uniformly across the seed space.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::Distribution;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// The random stream of one simulation run.
///
/// Used only from the single scheduler loop.  For parallel replications,
/// give each replication its own `SimRng` seeded via [`SimRng::child`].
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive the seed of a child stream for replication `offset`.
    pub fn child_seed(&mut self, offset: u64) -> u64 {
        self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT)
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        SimRng::new(self.child_seed(offset))
    }

    /// Uniform draw on `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    /// `true` iff a fresh uniform draw falls below `p`.
    ///
    /// Always consumes exactly one draw, so the stream stays aligned
    /// whatever `p` is (including 0 and 1).
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        self.uniform() < p
    }

    /// Draw one value from `dist`.
    #[inline]
    pub fn sample<D: Distribution<f64>>(&mut self, dist: &D) -> f64 {
        dist.sample(&mut self.0)
    }
}
