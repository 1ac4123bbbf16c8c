//! Relative comparison of the two endpoints' mean durations.

use crate::types::{BenchmarkSpec, EndpointRole, ResultDocument};

/// Signed change of the secondary mean relative to the primary mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PercentDifference {
    /// Negative: secondary took less time. Positive: primary took less time.
    Computed(f64),
    /// The primary mean was zero (or not a usable number).
    Undefined,
}

impl PercentDifference {
    pub fn value(self) -> Option<f64> {
        match self {
            PercentDifference::Computed(v) => Some(v),
            PercentDifference::Undefined => None,
        }
    }

    pub fn faster(self) -> Option<Faster> {
        self.value().map(|v| {
            if v < 0.0 {
                Faster::Secondary
            } else if v > 0.0 {
                Faster::Primary
            } else {
                Faster::Tie
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Faster {
    Primary,
    Secondary,
    Tie,
}

pub fn percent_difference(primary_mean: f64, secondary_mean: f64) -> PercentDifference {
    if !primary_mean.is_finite() || !secondary_mean.is_finite() || primary_mean <= 0.0 {
        return PercentDifference::Undefined;
    }
    PercentDifference::Computed((secondary_mean - primary_mean) / primary_mean * 100.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub spec: BenchmarkSpec,
    pub primary_mean: f64,
    pub secondary_mean: f64,
    pub difference: PercentDifference,
}

/// One row per benchmark present for both endpoints, in battery order.
pub fn compare(document: &ResultDocument) -> Vec<ComparisonRow> {
    let secondary = document.results(EndpointRole::Secondary);
    document
        .results(EndpointRole::Primary)
        .iter()
        .filter_map(|(spec, primary)| {
            let secondary = secondary.get(spec)?;
            Some(ComparisonRow {
                spec: *spec,
                primary_mean: primary.mean,
                secondary_mean: secondary.mean,
                difference: percent_difference(primary.mean, secondary.mean),
            })
        })
        .collect()
}
