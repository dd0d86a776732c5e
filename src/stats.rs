//! Streaming statistics over relative differences, in high precision.
//!
//! # Algorithm
//!
//! **Mean/Variance**: Welford's online algorithm.
//! Reference: Welford (1962), "Note on a Method for Calculating Corrected
//! Sums of Squares and Products", *Technometrics* 4(3).
//!
//! The single-pass recurrence avoids the catastrophic cancellation of a
//! naive sum-of-squares formula. That matters here more than usual: sample
//! counts run into the hundreds of millions and the tracked quantities are
//! themselves differences near machine epsilon. All recurrence arithmetic is
//! performed at [`REF_PRECISION`] bits — the `m2` update as a fused
//! multiply-add — so the measurement of precision introduces no comparable
//! error of its own.
//!
//! NaN and infinite samples (a zero reference sine yields one) are accepted
//! and propagate through the recurrence per IEEE-754; they permanently
//! poison the affected accumulator, which is the intended behavior.

use std::fmt;

use rug::float::Special;
use rug::Float;

use crate::phase::Distribution;
use crate::sine::Tier;
use crate::REF_PRECISION;

/// Streaming accumulator for the relative-difference stream of one
/// (distribution, tier) pair.
///
/// Maintains sample count `n`, running `mean`, and running sum of squared
/// deviations `m2`, all at [`REF_PRECISION`] bits. `n = 0` implies
/// `mean = 0, m2 = 0`.
///
/// # Examples
/// ```
/// use rug::Float;
/// use sinerr::phase::Distribution;
/// use sinerr::sine::Tier;
/// use sinerr::stats::ErrorStats;
/// use sinerr::REF_PRECISION;
///
/// let mut acc = ErrorStats::new(Distribution::Uniform, Tier::Double);
/// acc.push(&Float::with_val(REF_PRECISION, 1.0e-10));
/// acc.push(&Float::with_val(REF_PRECISION, -1.0e-10));
/// let snap = acc.snapshot();
/// assert_eq!(snap.n, 2);
/// assert!(snap.mean.is_zero());
/// ```
#[derive(Debug, Clone)]
pub struct ErrorStats {
    distribution: Distribution,
    tier: Tier,
    n: u64,
    mean: Float,
    m2: Float,
}

impl ErrorStats {
    /// Creates an empty accumulator tagged with its pair.
    pub fn new(distribution: Distribution, tier: Tier) -> Self {
        Self {
            distribution,
            tier,
            n: 0,
            mean: Float::new(REF_PRECISION),
            m2: Float::new(REF_PRECISION),
        }
    }

    /// The distribution tag of this accumulator.
    pub fn distribution(&self) -> Distribution {
        self.distribution
    }

    /// The tier tag of this accumulator.
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Number of samples seen so far.
    pub fn len(&self) -> u64 {
        self.n
    }

    /// Returns true if no samples have been fed yet.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Feeds one relative-difference sample into the accumulator.
    ///
    /// Welford update, in order:
    /// 1. `n ← n + 1`
    /// 2. `delta ← x − mean`
    /// 3. `mean ← mean + delta / n`
    /// 4. `delta2 ← x − mean` (recomputed with the updated mean)
    /// 5. `m2 ← fma(delta, delta2, m2)`
    ///
    /// Non-finite samples are fed like any other and propagate.
    pub fn push(&mut self, x: &Float) {
        self.n += 1;
        let delta = Float::with_val(REF_PRECISION, x - &self.mean);
        let step = Float::with_val(REF_PRECISION, &delta / self.n);
        self.mean += step;
        let delta2 = Float::with_val(REF_PRECISION, x - &self.mean);
        self.m2 = delta.mul_add(&delta2, &self.m2);
    }

    /// Takes a read-only snapshot of the accumulator.
    ///
    /// `variance = m2 / (n − 1)` and `stddev = √variance` when `n > 1`;
    /// both are NaN below two samples (undefined, insufficient data).
    pub fn snapshot(&self) -> Snapshot {
        let (variance, stddev) = if self.n > 1 {
            let variance = Float::with_val(REF_PRECISION, &self.m2 / (self.n - 1));
            let stddev = variance.clone().sqrt();
            (variance, stddev)
        } else {
            (
                Float::with_val(REF_PRECISION, Special::Nan),
                Float::with_val(REF_PRECISION, Special::Nan),
            )
        };
        Snapshot {
            distribution: self.distribution,
            tier: self.tier,
            n: self.n,
            mean: self.mean.clone(),
            variance,
            stddev,
        }
    }
}

/// One report record: the state of a single accumulator at a point in time.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub distribution: Distribution,
    pub tier: Tier,
    pub n: u64,
    pub mean: Float,
    pub variance: Float,
    pub stddev: Float,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "#   Distribution: \"{}\"   Generator: \"{}\"",
            self.distribution.name(),
            self.tier.name()
        )?;
        writeln!(f, "Samples: {}", self.n)?;
        writeln!(f, "Relative difference mean: {:.10e}", self.mean)?;
        writeln!(f, "Relative difference variance: {:.10e}", self.variance)?;
        write!(
            f,
            "Relative difference standard deviation: {:.10e}",
            self.stddev
        )
    }
}

// ============================================================================
// Tests
// ============================================================================


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn hp(x: f64) -> Float {
        Float::with_val(REF_PRECISION, x)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        // Incremental Welford matches the brute-force two-pass computation
        // to well within the working precision's rounding tolerance.
        #[test]
        fn welford_matches_two_pass(
            data in proptest::collection::vec(-1e6_f64..1e6, 2..64),
        ) {
            let lifted: Vec<Float> = data.iter().map(|&x| hp(x)).collect();
            let mut a = ErrorStats::new(Distribution::AllFloats, Tier::Single);
            for x in &lifted {
                a.push(x);
            }
            let mut sum = Float::new(REF_PRECISION);
            for x in &lifted {
                sum += x;
            }
            let mean = Float::with_val(REF_PRECISION, &sum / lifted.len() as u64);
            let mut m2 = Float::new(REF_PRECISION);
            for x in &lifted {
                let d = Float::with_val(REF_PRECISION, x - &mean);
                m2 = d.clone().mul_add(&d, &m2);
            }
            let snap = a.snapshot();
            let scale = 1.0_f64.max(mean.to_f64().abs());
            prop_assert!(
                Float::with_val(REF_PRECISION, &snap.mean - &mean).abs().to_f64()
                    < 1e-120 * scale
            );
            let expected_var =
                Float::with_val(REF_PRECISION, &m2 / (lifted.len() as u64 - 1));
            let vscale = 1.0_f64.max(expected_var.to_f64().abs());
            prop_assert!(
                Float::with_val(REF_PRECISION, &snap.variance - &expected_var)
                    .abs()
                    .to_f64()
                    < 1e-120 * vscale
            );
        }

        // Variance is non-negative and stddev² recovers it.
        #[test]
        fn variance_non_negative(
            data in proptest::collection::vec(-1e6_f64..1e6, 2..64),
        ) {
            let mut a = ErrorStats::new(Distribution::Uniform, Tier::Quad);
            for &x in &data {
                a.push(&hp(x));
            }
            let snap = a.snapshot();
            prop_assert!(snap.variance >= 0);
            let squared = Float::with_val(REF_PRECISION, snap.stddev.square_ref());
            let err = Float::with_val(REF_PRECISION, &squared - &snap.variance)
                .abs()
                .to_f64();
            prop_assert!(err <= 1e-120 * 1.0_f64.max(snap.variance.to_f64()));
        }

        // Finite inputs with n ≥ 2 always produce finite variance/stddev.
        #[test]
        fn finite_inputs_finite_snapshot(
            data in proptest::collection::vec(-1e6_f64..1e6, 2..64),
        ) {
            let mut a = ErrorStats::new(Distribution::NonUniform, Tier::Extended);
            for &x in &data {
                a.push(&hp(x));
            }
            let snap = a.snapshot();
            prop_assert!(snap.mean.is_finite());
            prop_assert!(snap.variance.is_finite());
            prop_assert!(snap.stddev.is_finite());
        }
    }
}
