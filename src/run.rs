//! Sampling loop, cooperative control requests, and report plumbing.
//!
//! [`Harness`] owns the random source and the twelve accumulators — one per
//! (distribution, tier) pair — and drives the measurement: each round draws
//! one phase per distribution, computes its reference sine once, and feeds
//! every tier's relative difference into the matching accumulator. Sharing
//! one phase and one reference across all four tiers keeps the comparison
//! fair within a round.
//!
//! # Concurrency
//!
//! The loop is single-threaded. The only cross-context communication is
//! [`Controls`]: two atomic flags, set from signal handlers (or tests) and
//! polled between rounds. A print request emits a snapshot of all
//! accumulators and clears the flag; a stop request ends the loop after the
//! current round, followed by a final report. Nothing preempts an in-flight
//! sample/update sequence.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::SmallRng;
use tracing::{debug, info};

use crate::phase::Distribution;
use crate::random::create_rng;
use crate::sine::{reference_sin, relative_difference, Tier};
use crate::stats::{ErrorStats, Snapshot};

/// Cooperative control requests, polled between rounds.
///
/// Handler side stays trivial: set the flag, nothing else. That makes the
/// flags safe to share with `signal_hook::flag::register`.
#[derive(Debug, Clone, Default)]
pub struct Controls {
    print: Arc<AtomicBool>,
    stop: Arc<AtomicBool>,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests an immediate report without stopping the loop.
    pub fn request_print(&self) {
        self.print.store(true, Ordering::Relaxed);
    }

    /// Requests termination after the current round completes.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// The raw print flag, for registering a signal handler against.
    pub fn print_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.print)
    }

    /// The raw stop flag, for registering a signal handler against.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Consumes a pending print request, if any.
    fn take_print(&self) -> bool {
        self.print.swap(false, Ordering::Relaxed)
    }

    fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }
}

/// Drives the sampling loop and owns all per-pair accumulators.
pub struct Harness {
    rng: SmallRng,
    stats: Vec<ErrorStats>,
}

impl Harness {
    /// Creates a harness with one empty accumulator per
    /// (distribution, tier) pair.
    pub fn new(seed: u64) -> Self {
        let mut stats = Vec::with_capacity(Distribution::ALL.len() * Tier::ALL.len());
        for dist in Distribution::ALL {
            for tier in Tier::ALL {
                stats.push(ErrorStats::new(dist, tier));
            }
        }
        Self {
            rng: create_rng(seed),
            stats,
        }
    }

    /// Looks the accumulator up by its tag pair rather than by position.
    fn entry_mut(&mut self, dist: Distribution, tier: Tier) -> &mut ErrorStats {
        self.stats
            .iter_mut()
            .find(|s| s.distribution() == dist && s.tier() == tier)
            .expect("every (distribution, tier) pair has an accumulator")
    }

    /// Runs one sampling round across every distribution and tier.
    ///
    /// Per distribution: one phase draw, one reference sine, four candidate
    /// sines, four accumulator updates. The phase and reference are shared
    /// across tiers within the round.
    pub fn step(&mut self) {
        for dist in Distribution::ALL {
            let phase = dist.sample(&mut self.rng);
            let reference = reference_sin(phase);
            for tier in Tier::ALL {
                let candidate = tier.sin(phase);
                let x = relative_difference(&candidate, &reference);
                self.entry_mut(dist, tier).push(&x);
            }
        }
    }

    /// Snapshots all twelve accumulators, in (distribution, tier) order.
    pub fn snapshots(&self) -> Vec<Snapshot> {
        self.stats.iter().map(ErrorStats::snapshot).collect()
    }

    /// Writes one report record per accumulator to `out`.
    pub fn report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for snap in self.snapshots() {
            writeln!(out, "{snap}")?;
            writeln!(out)?;
        }
        Ok(())
    }

    /// Runs rounds until a stop request arrives (or `rounds` completes),
    /// polling the control flags between rounds, then writes the final
    /// report.
    pub fn run<W: Write>(
        &mut self,
        controls: &Controls,
        rounds: Option<u64>,
        out: &mut W,
    ) -> io::Result<u64> {
        let mut completed = 0u64;
        while !controls.stop_requested() {
            if rounds.is_some_and(|limit| completed >= limit) {
                break;
            }
            self.step();
            completed += 1;
            if controls.take_print() {
                debug!(completed, "print requested");
                self.report(out)?;
            }
        }
        info!(completed, "sampling loop finished");
        self.report(out)?;
        Ok(completed)
    }
}

// ============================================================================
// Tests
// ============================================================================
