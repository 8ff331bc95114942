//! Deterministic per-entity RNG.
//!
//! # Determinism strategy
//!
//! Each truck gets its own independent `SmallRng` seeded by:
//!
//!   seed = run_seed XOR (truck_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive truck IDs uniformly across the seed space.  A
//! truck's load draws therefore depend only on the run seed and its own id,
//! never on how the scheduler happened to interleave the fleet.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::TruckId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Return `seed` if given, otherwise draw a fresh one from OS entropy.
///
/// The resolved value is reported back to the caller so an unseeded run can
/// still be replayed.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

/// Per-truck deterministic RNG.
pub struct EntityRng(SmallRng);

impl EntityRng {
    /// Seed deterministically from the run seed and a truck ID.
    pub fn new(run_seed: u64, truck: TruckId) -> Self {
        let seed = run_seed ^ (truck.0 as u64).wrapping_mul(MIXING_CONSTANT);
        EntityRng(SmallRng::seed_from_u64(seed))
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
}
