//! Report Renderer: reads the result document, prints the summary and
//! writes the comparison charts next to it.
//!
//! Usage:
//!   cargo run --release --bin kvbench-report
//!   cargo run --release --bin kvbench-report -- path/to/benchmark_results.json

use std::env;
use std::path::{Path, PathBuf};
use std::process;

use kv_core::constants::DEFAULT_RESULTS_PATH;
use kv_core::summary::format_summary;
use kv_core::types::ResultDocument;
use kvbench_report::{chart_timestamp, charts_dir, visualize};

fn resolve_results_path() -> PathBuf {
    env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| env::var_os("KVBENCH_RESULTS_PATH").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_PATH))
}

fn main() {
    let _ = dotenvy::dotenv();

    let log_level = kv_core::resolve_log_level();
    let log_file = kv_core::resolve_log_file();
    kv_core::initialize_logger(log_level, log_file.as_deref()).unwrap_or_else(|e| {
        eprintln!("Failed to initialize logger: {}. Exiting.", e);
        process::exit(1);
    });

    let results_path = resolve_results_path();
    if !results_path.exists() {
        println!("Results file not found: {}", results_path.display());
        println!("Run the benchmark first (kvbench-runner) to produce it.");
        process::exit(1);
    }

    if let Err(e) = run(&results_path) {
        log::error!("Rendering failed: {e:#}");
        println!("Failed to create visualizations: {e}");
        process::exit(1);
    }
}

fn run(results_path: &Path) -> anyhow::Result<()> {
    let document = ResultDocument::load(results_path)?;
    print!("{}", format_summary(&document));

    let output_dir = charts_dir(results_path);
    let timestamp = chart_timestamp(chrono::Local::now());
    let written = visualize(&document, &output_dir, &timestamp)?;
    for path in &written {
        log::debug!("  {}", path.display());
    }

    println!("Visualizations created in {}", output_dir.display());
    Ok(())
}
