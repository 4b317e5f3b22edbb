//! Deterministic per-site and simulator-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each site gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (site_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive site IDs uniformly across the seed space.
//! Consequences:
//!
//! - Sites never share RNG state, so a refresh pass gives the same result
//!   whether sites are visited sequentially or on a thread pool.
//! - Appending a site does not disturb the sequences of existing sites.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::SiteId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── SiteRng ───────────────────────────────────────────────────────────────────

/// Per-site deterministic RNG.
///
/// One lives next to each `Site` in the store and is only touched by the
/// refresh pass for that site.
#[derive(Clone, Debug)]
pub struct SiteRng(SmallRng);

impl SiteRng {
    /// Seed deterministically from the run's global seed and a site ID.
    pub fn new(global_seed: u64, site: SiteId) -> Self {
        let seed = global_seed ^ (site.0 as u64).wrapping_mul(MIXING_CONSTANT);
        SiteRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Symmetric integer step in `[-step, step)`; zero when `step == 0`.
    #[inline]
    pub fn step(&mut self, step: i32) -> i32 {
        if step <= 0 {
            return 0;
        }
        self.0.gen_range(-step..step)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulator-level RNG for operations that are not tied to one site
/// (booking queue numbers, seeding from entropy, …).
///
/// Used only from a single thread.  For parallel work derive children with
/// [`SimRng::child`].
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from OS entropy.  Returns the RNG and the seed that was drawn so
    /// the run can be reproduced from logs.
    pub fn from_entropy() -> (Self, u64) {
        let seed: u64 = rand::random();
        (SimRng::new(seed), seed)
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
