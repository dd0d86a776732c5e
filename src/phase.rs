//! Random phase distributions over single-precision floats.
//!
//! Each [`Distribution`] maps a random source to one `f32` phase sample.
//! The three variants deliberately exercise different regions and densities
//! of the single-precision domain:
//!
//! | Variant | Range | Density |
//! |---|---|---|
//! | [`Distribution::NonUniform`] | [0, π/2) | bit-pattern uniform, value-dense near 0 |
//! | [`Distribution::Uniform`] | [0, π/2) | value uniform to f32 granularity |
//! | [`Distribution::AllFloats`] | every finite f32 | bit-pattern uniform incl. subnormals |
//!
//! # Contract
//!
//! Each call returns exactly one phase; generators are stateless apart from
//! the shared RNG; no variant ever returns NaN or an infinity.

use rand::Rng;

/// Bit pattern of the `f32` immediately above π/2 (`0x1.921fb6p+0`).
///
/// `f32::from_bits(ABOVE_PI_2_BITS)` is the nearest single to π/2 and lies
/// slightly above it, so drawing bit patterns strictly below this constant
/// yields values in [0, π/2).
pub const ABOVE_PI_2_BITS: u32 = 0x3fc9_0fdb;

/// `⌊2²³ · π/2⌋`, the exclusive bound of the uniform integer draw.
pub const UNIFORM_BOUND: u32 = 13_176_795;

/// Biased exponent field of an IEEE-754 single-precision float.
const EXPONENT_MASK: u32 = 0x7f80_0000;

/// Named input-phase distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Distribution {
    /// Uniform over the *bit patterns* below π/2, hence non-uniform over
    /// values: float spacing shrinks towards zero, so small phases are
    /// drawn far more often.
    NonUniform,
    /// Uniform over [0, π/2) to single-precision granularity. The integer
    /// draw, the integer-to-float conversion, and the division by 2²³ are
    /// all exact in binary floating point.
    Uniform,
    /// Every finite `f32` bit pattern, including ±0, negative values, and
    /// subnormals. NaN and ±∞ patterns are rejected and redrawn.
    AllFloats,
}

impl Distribution {
    /// All variants, in sampling order.
    pub const ALL: [Distribution; 3] = [
        Distribution::NonUniform,
        Distribution::Uniform,
        Distribution::AllFloats,
    ];

    /// The distribution's report name.
    pub fn name(self) -> &'static str {
        match self {
            Distribution::NonUniform => "+0 <= x < pi/2, non-uniform",
            Distribution::Uniform => "+0 <= x < pi/2, uniform",
            Distribution::AllFloats => "all floats",
        }
    }

    /// Draws one phase sample from `rng`.
    pub fn sample<R: Rng>(self, rng: &mut R) -> f32 {
        match self {
            Distribution::NonUniform => sample_non_uniform(rng),
            Distribution::Uniform => sample_uniform(rng),
            Distribution::AllFloats => sample_all_floats(rng),
        }
    }
}

/// Uniform bit pattern in `[0, ABOVE_PI_2_BITS)`, reinterpreted as a float.
fn sample_non_uniform<R: Rng>(rng: &mut R) -> f32 {
    f32::from_bits(rng.random_range(0..ABOVE_PI_2_BITS))
}

/// Uniform integer `k < ⌊2²³·π/2⌋`, returned as `k / 2²³`.
///
/// Known property, preserved deliberately: at extreme sample counts the
/// bounded integer draw of the historical implementation degraded with the
/// native word width of its random source. This is reproduced as-is, not
/// corrected.
fn sample_uniform<R: Rng>(rng: &mut R) -> f32 {
    let k = rng.random_range(0..UNIFORM_BOUND);
    // Both the conversion (k < 2^24) and the power-of-two division are exact.
    k as f32 / (1u32 << 23) as f32
}

/// Uniform 32-bit pattern, rejecting the all-ones exponent field (NaN, ±∞).
fn sample_all_floats<R: Rng>(rng: &mut R) -> f32 {
    loop {
        let bits = rng.random::<u32>();
        if bits & EXPONENT_MASK != EXPONENT_MASK {
            return f32::from_bits(bits);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_above_pi_2_bits_is_nearest_single_to_pi_2() {
        assert_eq!(ABOVE_PI_2_BITS, std::f32::consts::FRAC_PI_2.to_bits());
        // The nearest single rounds up, i.e. lies strictly above π/2.
        assert!(f64::from(std::f32::consts::FRAC_PI_2) > std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn test_uniform_bound_is_floor_of_2_23_pi_2() {
        let exact = (std::f64::consts::FRAC_PI_2 * f64::from(1u32 << 23)).floor();
        assert_eq!(UNIFORM_BOUND, exact as u32);
    }

    #[test]
    fn test_non_uniform_range() {
        let mut rng = create_rng(7);
        for _ in 0..10_000 {
            let x = Distribution::NonUniform.sample(&mut rng);
            assert!(x >= 0.0);
            assert!(f64::from(x) < std::f64::consts::FRAC_PI_2);
            assert!(x.is_sign_positive());
        }
    }

    #[test]
    fn test_uniform_range_and_exact_round_trip() {
        let mut rng = create_rng(7);
        for _ in 0..10_000 {
            let x = Distribution::Uniform.sample(&mut rng);
            assert!(x >= 0.0);
            assert!(f64::from(x) < std::f64::consts::FRAC_PI_2);
            // Scaling back by 2^23 must recover the original integer exactly.
            let k = x * (1u32 << 23) as f32;
            assert_eq!(k, k.trunc());
            assert!((k as u32) < UNIFORM_BOUND);
        }
    }

    #[test]
    fn test_all_floats_never_nan_or_inf() {
        let mut rng = create_rng(7);
        for _ in 0..100_000 {
            let x = Distribution::AllFloats.sample(&mut rng);
            assert!(
                x.to_bits() & EXPONENT_MASK != EXPONENT_MASK,
                "all-ones exponent emitted: {:#010x}",
                x.to_bits()
            );
            assert!(!x.is_nan());
            assert!(!x.is_infinite());
        }
    }

    #[test]
    fn test_all_floats_covers_negatives_and_subnormals_eventually() {
        let mut rng = create_rng(7);
        let mut saw_negative = false;
        let mut saw_subnormal = false;
        for _ in 0..100_000 {
            let x = Distribution::AllFloats.sample(&mut rng);
            saw_negative |= x.is_sign_negative();
            saw_subnormal |= x != 0.0 && x.is_subnormal();
        }
        assert!(saw_negative, "negatives make up half the pattern space");
        // Subnormals are ~0.4% of patterns; 100k draws make a miss absurd.
        assert!(saw_subnormal);
    }

    #[test]
    fn test_sampling_is_reproducible() {
        for dist in Distribution::ALL {
            let mut rng1 = create_rng(99);
            let mut rng2 = create_rng(99);
            for _ in 0..100 {
                let a = dist.sample(&mut rng1);
                let b = dist.sample(&mut rng2);
                assert_eq!(a.to_bits(), b.to_bits());
            }
        }
    }
}
