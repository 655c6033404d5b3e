//! Utility functions for random number generation.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Fast seedable RNG used for all stochastic feedback.
pub type FastRng = Xoshiro256PlusPlus;

/// # Overview
///
/// Creates a fast RNG seeded from a u64 value.
///
/// # Examples
///
/// ```
/// use tsetlin_engine::utils::rng_from_seed;
///
/// let mut rng = rng_from_seed(42);
/// ```
#[inline]
pub fn rng_from_seed(seed: u64) -> FastRng {
    Xoshiro256PlusPlus::seed_from_u64(seed)
}

/// # Overview
///
/// Creates a fast RNG with entropy from thread-local RNG.
#[inline]
pub fn rng_from_entropy() -> FastRng {
    Xoshiro256PlusPlus::from_rng(&mut rand::rng())
}

/// # Overview
///
/// Performs a Bernoulli trial with given probability.
#[inline]
pub fn bernoulli<R: Rng>(rng: &mut R, probability: f32) -> bool {
    rng.random::<f32>() < probability
}

/// # Overview
///
/// Draws `n` sub-seeds, one per clause, from `rng`.
///
/// Each clause then runs on its own generator, so results do not depend on
/// the order in which clauses are processed.
#[inline]
pub fn sub_seeds<R: Rng>(rng: &mut R, n: usize) -> Vec<u64> {
    (0..n).map(|_| rng.random::<u64>()).collect()
}
