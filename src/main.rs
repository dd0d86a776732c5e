//! sinerr CLI - streaming measurement of sine precision tiers.

use anyhow::{Context, Result};
use clap::Parser;
use signal_hook::consts::{SIGHUP, SIGINT};
use sinerr::random::DEFAULT_SEED;
use sinerr::run::{Controls, Harness};
use sinerr::REF_PRECISION;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "sinerr")]
#[command(version)]
#[command(about = "Measures the relative error of sine at four precision tiers \
against a 512-bit MPFR reference. SIGHUP prints a snapshot, SIGINT stops.")]
struct Cli {
    /// RNG seed; the fixed default keeps runs reproducible
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Stop after this many rounds instead of running until SIGINT
    #[arg(long)]
    rounds: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let controls = Controls::new();
    signal_hook::flag::register(SIGINT, controls.stop_flag())
        .context("Failed to install SIGINT handler")?;
    signal_hook::flag::register(SIGHUP, controls.print_flag())
        .context("Failed to install SIGHUP handler")?;

    info!(
        seed = cli.seed,
        precision = REF_PRECISION,
        "starting sampling loop; SIGHUP prints, SIGINT stops"
    );

    let mut harness = Harness::new(cli.seed);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let completed = harness
        .run(&controls, cli.rounds, &mut out)
        .context("Failed to write report")?;
    info!(rounds = completed, "done");

    Ok(())
}
