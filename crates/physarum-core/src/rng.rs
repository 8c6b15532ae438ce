use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Create a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(seed)
}

/// Derive an independent stream for one population generation, so a
/// regeneration's layout does not depend on how many ticks preceded it.
pub fn derive_generation_rng(base_seed: u64, generation: u64) -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(
        base_seed.wrapping_add(generation.wrapping_mul(crate::constants::RNG_DERIVATION_PRIME)),
    )
}
