//! Per-run random number generation.
//!
//! Every run owns its generator. Nothing in the crate touches a global
//! source, so two engines seeded alike produce identical runs and
//! concurrent runs never interfere.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generator type used by the engine.
pub type RunRng = StdRng;

/// Creates a deterministic generator from `seed`.
pub fn create_rng(seed: u64) -> RunRng {
    StdRng::seed_from_u64(seed)
}

/// Replaces `rng` with a fresh generator seeded from its own stream.
///
/// Used by stagnation reform to jump to an unrelated part of the random
/// sequence while keeping seeded runs reproducible.
pub fn reseed(rng: &mut RunRng) {
    let seed: u64 = rng.random();
    *rng = create_rng(seed);
}
