//! Reference and precision-tiered candidate sine evaluation.
//!
//! [`reference_sin`] computes the ground-truth sine of a phase: the phase is
//! converted exactly into a 512-bit [`rug::Float`] and MPFR's correctly
//! rounded `sin` is taken at that precision.
//!
//! [`Tier`] computes the same sine at one of four increasing native
//! precision widths and lifts the result losslessly back into 512 bits, so
//! the only error a tier carries into the comparison is its own.
//!
//! # Lifting
//!
//! Finite `f32`/`f64` values convert exactly into a 512-bit float. The
//! extended and quadruple tiers are produced at their mantissa widths by the
//! high-precision library itself; the quadruple lift additionally
//! round-trips through an exact base-16 textual rendering, mirroring how a
//! binary128 result reaches MPFR when no direct binary conversion exists.
//! Base 16 is a power of two, so the round trip introduces no rounding.

use rug::Float;

use crate::REF_PRECISION;

/// Mantissa width of the emulated 80-bit extended tier.
const EXTENDED_PRECISION: u32 = 64;

/// Mantissa width of the emulated binary128 quadruple tier.
const QUAD_PRECISION: u32 = 113;

/// Computes the ground-truth sine of `phase` at [`REF_PRECISION`] bits.
///
/// The f32 → 512-bit conversion is exact, and MPFR's `sin` is correctly
/// rounded at the working precision. The result is computed once per round
/// and shared across all four tiers so every tier is measured against an
/// identical baseline.
pub fn reference_sin(phase: f32) -> Float {
    Float::with_val(REF_PRECISION, phase).sin()
}

/// The four candidate precision tiers under measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Native `f32::sin` (24-bit mantissa).
    Single,
    /// Native `f64::sin` after exact promotion of the phase (53-bit mantissa).
    Double,
    /// Correctly rounded sine at a 64-bit mantissa, the significand width of
    /// the x87 80-bit extended format.
    Extended,
    /// Correctly rounded sine at a 113-bit mantissa (IEEE binary128),
    /// lifted via an exact hexadecimal round trip.
    Quad,
}

impl Tier {
    /// All tiers, in increasing precision order.
    pub const ALL: [Tier; 4] = [Tier::Single, Tier::Double, Tier::Extended, Tier::Quad];

    /// The tier's report name.
    pub fn name(self) -> &'static str {
        match self {
            Tier::Single => "single",
            Tier::Double => "double",
            Tier::Extended => "extended",
            Tier::Quad => "quadruple",
        }
    }

    /// Computes `sin(phase)` at this tier's precision, lifted losslessly
    /// into a [`REF_PRECISION`]-bit float.
    ///
    /// No tier mutates the phase; each call is independent.
    pub fn sin(self, phase: f32) -> Float {
        match self {
            Tier::Single => Float::with_val(REF_PRECISION, phase.sin()),
            Tier::Double => Float::with_val(REF_PRECISION, f64::from(phase).sin()),
            Tier::Extended => lift(&Float::with_val(EXTENDED_PRECISION, phase).sin()),
            Tier::Quad => lift_via_hex(&Float::with_val(QUAD_PRECISION, phase).sin()),
        }
    }
}

/// Widens `narrow` to [`REF_PRECISION`] bits. Exact: the target precision
/// strictly exceeds every tier width.
fn lift(narrow: &Float) -> Float {
    Float::with_val(REF_PRECISION, narrow)
}

/// Widens `narrow` through an exact base-16 textual rendering.
///
/// Renders with as many hex digits as needed to reproduce the value, then
/// parses the string back at full precision. Both directions are exact for
/// a power-of-two radix.
fn lift_via_hex(narrow: &Float) -> Float {
    let hex = narrow.to_string_radix(16, None);
    let parsed = Float::parse_radix(&hex, 16)
        .expect("base-16 rendering of a float is always parseable");
    Float::with_val(REF_PRECISION, parsed)
}

/// The normalized error metric: `(candidate − reference) / |reference|`.
///
/// When the reference is exactly zero the result is ±∞ (candidate nonzero)
/// or NaN (candidate also zero). These samples are fed to the accumulator
/// unfiltered; the downstream arithmetic propagates them.
pub fn relative_difference(candidate: &Float, reference: &Float) -> Float {
    let diff = Float::with_val(REF_PRECISION, candidate - reference);
    let magnitude = Float::with_val(REF_PRECISION, reference.abs_ref());
    diff / magnitude
}

// ============================================================================
// Tests
// ============================================================================
