//! Summary module: human-readable comparison table printed after a run.

use std::fmt::Write;

use crate::comparison::{compare, Faster, PercentDifference};
use crate::types::{EndpointRole, ResultDocument};

/// Render the per-benchmark summary of `document` as plain text.
pub fn format_summary(document: &ResultDocument) -> String {
    let primary = document.metadata.label(EndpointRole::Primary);
    let secondary = document.metadata.label(EndpointRole::Secondary);
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", "=".repeat(60));
    let _ = writeln!(out, "  BENCHMARK SUMMARY: {primary} vs {secondary}");
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(
        out,
        "  Operations per test: {}",
        document.metadata.num_operations
    );
    let _ = writeln!(
        out,
        "  Tests repeated:      {} times",
        document.metadata.repeat_count
    );

    for row in compare(document) {
        let _ = writeln!(out, "\n  Operation: {}", row.spec);
        let _ = writeln!(out, "  {:<12} {:.6} seconds", format!("{primary}:"), row.primary_mean);
        let _ = writeln!(
            out,
            "  {:<12} {:.6} seconds",
            format!("{secondary}:"),
            row.secondary_mean
        );

        let verdict = match (row.difference, row.difference.faster()) {
            (PercentDifference::Computed(diff), Some(Faster::Primary)) => {
                format!("{primary} is {:.2}% faster", diff.abs())
            }
            (PercentDifference::Computed(diff), Some(Faster::Secondary)) => {
                format!("{secondary} is {:.2}% faster", diff.abs())
            }
            (PercentDifference::Computed(_), _) => "Both endpoints took the same time".to_string(),
            (PercentDifference::Undefined, _) => {
                "Unable to calculate percentage difference (division by zero)".to_string()
            }
        };
        let _ = writeln!(out, "  {verdict}");
    }

    out
}
