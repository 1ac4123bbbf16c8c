//! Report Renderer: turns a saved result document into comparison charts.
//!
//! Rendering is a function of the document, an output directory and a
//! timestamp that only appears in filenames.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use kv_core::constants::{CHARTS_DIR_NAME, CHART_TIMESTAMP_FORMAT};
use kv_core::types::{Operation, ResultDocument};
use kv_core::BenchError;

/// PNG rendering of the two chart kinds.
pub mod charts;
/// Extraction of chart series from a result document.
pub mod series;

use charts::EndpointLabels;

/// Families that get a grouped bar chart, in output order.
pub const SIZED_FAMILIES: [Operation; 3] = [Operation::Set, Operation::Get, Operation::Lpush];

/// Directory next to the results file that receives the charts.
pub fn charts_dir(results_file: &Path) -> PathBuf {
    results_file
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(CHARTS_DIR_NAME)
}

/// `YYYYMMDD_HHMMSS`, as embedded in chart filenames.
pub fn chart_timestamp(at: DateTime<Local>) -> String {
    at.format(CHART_TIMESTAMP_FORMAT).to_string()
}

/// Render every chart the document has data for and return the written
/// paths in render order.
pub fn visualize(
    document: &ResultDocument,
    output_dir: &Path,
    timestamp: &str,
) -> Result<Vec<PathBuf>, BenchError> {
    fs::create_dir_all(output_dir).map_err(|e| BenchError::io(output_dir, e))?;

    let labels = EndpointLabels::from_metadata(&document.metadata);
    let mut written = Vec::new();

    for operation in SIZED_FAMILIES {
        let categories = series::size_categories(document, operation);
        if categories.is_empty() {
            log::warn!("No {operation} results for both endpoints, skipping its chart");
            continue;
        }
        let path = output_dir.join(format!("{}_performance_{timestamp}.png", operation.name()));
        let title = format!(
            "{} Operation Performance",
            operation.name().to_uppercase()
        );
        charts::grouped_bar_chart(&path, &title, &labels, &categories)?;
        log::info!("Wrote {}", path.display());
        written.push(path);
    }

    let rows = series::divergence_rows(document);
    if rows.is_empty() {
        log::warn!("No computable comparisons, skipping the overall chart");
    } else {
        let path = output_dir.join(format!("overall_comparison_{timestamp}.png"));
        charts::divergence_chart(&path, &labels, &rows)?;
        log::info!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}
