//! Measurement Runner: connects to both endpoints, runs every battery,
//! writes the result document and prints the summary.
//!
//! Usage:
//!   cargo run --release --bin kvbench-runner
//!   PRIMARY_HOST=127.0.0.1 SECONDARY_HOST=127.0.0.1 SECONDARY_PORT=6380 cargo run --release

use std::process;

use kv_core::summary::format_summary;
use kv_core::BenchError;
use kvbench_runner::config::RunnerConfig;
use kvbench_runner::{failure_message, run_benchmarks};

fn main() {
    // A missing .env file is fine; the process environment still applies.
    let _ = dotenvy::dotenv();

    let log_level = kv_core::resolve_log_level();
    let log_file = kv_core::resolve_log_file();
    kv_core::initialize_logger(log_level, log_file.as_deref()).unwrap_or_else(|e| {
        eprintln!("Failed to initialize logger: {}. Exiting.", e);
        process::exit(1);
    });

    let config = RunnerConfig::from_env();
    log::info!(
        "Starting benchmark: {} ({}) vs {} ({})",
        config.primary_label,
        config.primary.address(),
        config.secondary_label,
        config.secondary.address()
    );
    println!(
        "Starting {} vs {} benchmark...",
        config.primary_label, config.secondary_label
    );

    if let Err(e) = run(&config) {
        log::error!("Benchmark failed: {e:#}");
        match e.downcast_ref::<BenchError>() {
            Some(err) => println!("{}", failure_message(&config, err)),
            None => println!("Benchmark failed: {e}"),
        }
        process::exit(1);
    }
}

fn run(config: &RunnerConfig) -> anyhow::Result<()> {
    let document = run_benchmarks(config)?;

    document.save(&config.results_path)?;
    println!("Results saved to {}", config.results_path.display());

    print!("{}", format_summary(&document));
    Ok(())
}
