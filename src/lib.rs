//! # sinerr
//!
//! Empirically measures the relative error of sine at four floating-point
//! precision tiers (single, double, extended, quadruple) against a 512-bit
//! MPFR reference, across three input-phase distributions, using a streaming
//! high-precision statistics accumulator.
//!
//! ## Modules
//!
//! - [`phase`] — Random phase distributions over single-precision floats
//! - [`sine`] — Reference and precision-tiered candidate sine evaluation
//! - [`stats`] — Streaming mean/variance of relative differences (Welford)
//! - [`run`] — Sampling loop, cooperative control flags, and reporting
//! - [`random`] — Seeded RNG construction for reproducible runs
//!
//! ## Design Philosophy
//!
//! - **Numerical correctness over throughput**: all error measurement
//!   arithmetic runs at 512 bits of mantissa so the measurement itself
//!   contributes no comparable error
//! - **Numerical stability first**: Welford's algorithm for streaming
//!   variance, with a fused multiply-add in the `m2` update
//! - **Reproducibility**: a fixed seed makes every sampling run repeatable
//!   bit for bit

pub mod phase;
pub mod random;
pub mod run;
pub mod sine;
pub mod stats;

/// Working precision, in bits of mantissa, of the reference pipeline.
///
/// Every [`rug::Float`] flowing through the comparison — reference sine,
/// lifted candidate values, relative differences, and accumulator state —
/// carries this precision. 512 bits is far beyond any native tier (the
/// widest, quadruple, has a 113-bit mantissa), so lifts from native values
/// are exact and the statistics do not themselves lose significant digits.
pub const REF_PRECISION: u32 = 512;
