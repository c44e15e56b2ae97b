//! Batch entry point: sweep, aggregate, persist, print summary.
//!
//! Configuration comes from `MEMBENCH_*` environment variables (or a `.env`
//! file); see `membench::config`.
//!
//! Usage:
//!   cargo run --release -p membench
//!   MEMBENCH_TRIALS=5 MEMBENCH_EXECUTABLE=/path/to/benchmark cargo run --release -p membench

use std::fs;
use std::process;

use anyhow::Context;
use log::{error, info};

use membench::aggregate::aggregate;
use membench::config::{resolve_log_file, resolve_log_level, HarnessConfig};
use membench::invoker::ProcessRunner;
use membench::persist::{host_name, store_results, store_statistics};
use membench::progress::ProgressBar;
use membench::report::print_report;
use membench::sweep::run_sweep_with_progress;

fn run() -> anyhow::Result<()> {
    let config = HarnessConfig::from_env()?;
    let sweep = &config.sweep;

    info!(
        "Sweeping {} with {} trials, strategies {}..={}, {}-{} MiB, seed {}",
        config.executable.display(),
        sweep.trials,
        sweep.strategies.start(),
        sweep.strategies.end(),
        sweep.min_mib,
        sweep.max_mib,
        sweep.seed
    );

    let runner = ProcessRunner::new(&config.executable);
    let progress = ProgressBar::default();
    let results = run_sweep_with_progress(&runner, sweep, |done, total| {
        progress.update(done, total)
    })
    .context("benchmark sweep aborted")?;

    info!(
        "{} invocations produced {} records ({} errors)",
        results.invocations,
        results.records.len(),
        results.error_count()
    );

    let (table, stats) = aggregate(&results.records).context("aggregation failed")?;

    let host = host_name();
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.output_dir.display()
        )
    })?;
    store_results(&config.output_dir, &host, &table)?;
    store_statistics(&config.output_dir, &host, &stats)?;

    print_report(&stats, &host);
    Ok(())
}

fn main() {
    dotenvy::dotenv().ok();

    let log_file = resolve_log_file();
    membench_core::initialize_logger(resolve_log_level(), log_file.as_deref()).unwrap_or_else(
        |e| {
            eprintln!("Failed to initialize logger: {e:#}. Exiting.");
            process::exit(1);
        },
    );

    if let Err(err) = run() {
        error!("{err:#}");
        process::exit(1);
    }
}
