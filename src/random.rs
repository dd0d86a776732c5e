//! Seeded random number generation.
//!
//! Provides seeded RNG construction for the sampling loop.
//!
//! # Reproducibility
//!
//! Every sampling run is seeded, by default with [`DEFAULT_SEED`], so the
//! sequence of generated phases — and therefore every accumulator snapshot —
//! is fully reproducible for a given seed. Regression tests rely on this.

/// The fixed startup seed.
///
/// Chosen to match the seed the measurement has historically run with, so
/// published snapshots remain comparable.
pub const DEFAULT_SEED: u64 = 1111;

/// Creates a fast, seeded random number generator.
///
/// Uses `SmallRng` (Xoshiro256++) for high performance.
/// The sequence is deterministic for a given seed on the same platform.
///
/// # Examples
/// ```
/// use sinerr::random::create_rng;
/// use rand::Rng;
/// let mut rng = create_rng(42);
/// let x: u32 = rng.random();
/// let _ = x;
/// ```
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

// ============================================================================
// Tests
// ============================================================================
