//! Chart-ready views of a result document.

use kv_core::comparison::{self, ComparisonRow};
use kv_core::types::{BenchmarkSpec, EndpointRole, Operation, ResultDocument};

/// One x-axis category of a grouped bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeCategory {
    pub size: usize,
    pub primary_mean: f64,
    pub secondary_mean: f64,
}

/// One bar of the diverging chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DivergenceRow {
    pub spec: BenchmarkSpec,
    pub difference: f64,
}

/// Every benchmark of `operation` recorded for both endpoints, smallest
/// payload first.
pub fn size_categories(document: &ResultDocument, operation: Operation) -> Vec<SizeCategory> {
    let secondary = document.results(EndpointRole::Secondary);
    let mut categories: Vec<SizeCategory> = document
        .results(EndpointRole::Primary)
        .iter()
        .filter(|(spec, _)| spec.operation == operation)
        .filter_map(|(spec, primary)| {
            let secondary = secondary.get(spec)?;
            Some(SizeCategory {
                size: spec.sort_size(),
                primary_mean: primary.mean,
                secondary_mean: secondary.mean,
            })
        })
        .collect();
    categories.sort_by_key(|c| c.size);
    categories
}

/// Computable comparisons sorted ascending by signed percent difference.
pub fn divergence_rows(document: &ResultDocument) -> Vec<DivergenceRow> {
    let mut rows: Vec<DivergenceRow> = comparison::compare(document)
        .into_iter()
        .filter_map(|row: ComparisonRow| {
            let difference = row.difference.value();
            if difference.is_none() {
                log::warn!(
                    "Skipping {}: {} mean is zero, difference is undefined",
                    row.spec,
                    EndpointRole::Primary
                );
            }
            Some(DivergenceRow {
                spec: row.spec,
                difference: difference?,
            })
        })
        .collect();
    rows.sort_by(|a, b| a.difference.total_cmp(&b.difference));
    rows
}
