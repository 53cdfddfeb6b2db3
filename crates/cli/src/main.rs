//! # hastynoise
//!
//! Regression and benchmark harness for the hasty-noise backends. Generates
//! raw dumps per noise type and SIMD level, compares them pairwise and times
//! grid fills.

mod dump;
mod harness;

use anyhow::{bail, Context, Result};
use clap::Parser;
use hasty_noise::{BackendRegistry, GridRegion, SimdLevel};
use std::path::PathBuf;
use std::process::ExitCode;

/// Accumulated absolute error above which two levels are reported as diverging
const COMPARE_TOLERANCE: f32 = 1e-3;

/// Cross-level regression and benchmark harness for hasty-noise
#[derive(Parser)]
#[command(name = "hastynoise")]
#[command(version)]
struct Cli {
    /// Generate reference dumps for every registered level up to the cap
    #[arg(short = 'g', long)]
    generate: bool,

    /// Compare all previously generated dumps pairwise per noise type
    #[arg(short = 'c', long)]
    compare: bool,

    /// Time 100 grid fills per level and noise type
    #[arg(short = 'p', long = "perf")]
    perf: bool,

    /// Highest SIMD level index used by generate and perf
    #[arg(short = 'm', long = "max-level")]
    max_level: Option<usize>,

    /// Directory holding the dumps
    #[arg(long, default_value = "./data")]
    data: PathBuf,

    /// Grid edge length
    #[arg(long, default_value = "64")]
    size: usize,

    /// Directory of backend plugin libraries
    #[arg(long)]
    plugins: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(1)
        }
    }
}

/// Run the requested passes, returning whether every comparison passed.
fn run(cli: &Cli) -> Result<bool> {
    if !(cli.generate || cli.compare || cli.perf) {
        bail!("nothing to do, pass -g, -c or -p (see --help)");
    }
    if cli.size == 0 {
        bail!("--size must be at least 1");
    }
    if GridRegion::sized(cli.size, cli.size, cli.size).checked_len().is_none() {
        bail!("--size {} is too large, its sample count overflows usize", cli.size);
    }

    install_registry(cli.plugins.as_deref())?;
    let registry = BackendRegistry::global();
    println!("Fastest SIMD level: {}", registry.fastest_available());

    let cap = cli.max_level.map(|m| SimdLevel::from_index(m).unwrap_or(SimdLevel::Avx512));
    let levels = harness::levels_up_to(registry, cap);

    if cli.generate {
        let written = harness::generate(registry, &levels, &cli.data, cli.size)?;
        println!("Wrote {written} dumps to {}", cli.data.display());
    }

    let mut passed = true;
    if cli.compare {
        let comparisons = harness::compare(&cli.data, cli.size)
            .with_context(|| format!("Failed to compare dumps in {}", cli.data.display()))?;
        if comparisons.is_empty() {
            println!("No dump pairs to compare in {}", cli.data.display());
        }
        for c in &comparisons {
            let verdict = if c.error < COMPARE_TOLERANCE { "ok" } else { "DIVERGED" };
            println!(
                "{:<20} {:>7} vs {:<7} error {:>12.6} {verdict}",
                c.noise_type, c.first, c.second, c.error
            );
            passed &= c.error < COMPARE_TOLERANCE;
        }
    }

    if cli.perf {
        harness::benchmark(registry, &levels, cli.size);
    }

    Ok(passed)
}

#[cfg(feature = "dynamic-backends")]
fn install_registry(plugins: Option<&std::path::Path>) -> Result<()> {
    let Some(dir) = plugins else {
        return Ok(());
    };
    let mut registry = BackendRegistry::with_builtin_backends();
    let loaded = registry
        .load_plugins(dir)
        .with_context(|| format!("Failed to load plugins from {}", dir.display()))?;
    log::info!("{loaded} backend plugins registered");
    if registry.install_global().is_err() {
        bail!("backend registry was initialized before plugins were loaded");
    }
    Ok(())
}

#[cfg(not(feature = "dynamic-backends"))]
fn install_registry(plugins: Option<&std::path::Path>) -> Result<()> {
    if let Some(dir) = plugins {
        log::warn!(
            "ignoring --plugins {}: built without the dynamic-backends feature",
            dir.display()
        );
    }
    Ok(())
}
