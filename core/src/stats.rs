use serde::{Deserialize, Serialize};

/// Summary of the trial durations (seconds) for one (endpoint, benchmark) pair.
///
/// `raw` keeps the samples in trial order; the other fields are derived from
/// it and always satisfy `min <= median <= max` and `min <= mean <= max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStat {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub raw: Vec<f64>,
}

impl AggregateStat {
    /// Aggregate a sequence of trial durations. Returns `None` for no samples
    /// or when any sample is NaN or infinite.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.iter().any(|s| !s.is_finite()) {
            return None;
        }
        let mean = Self::mean(samples)?;
        let median = Self::median(samples)?;
        let min = samples.iter().cloned().fold(f64::MAX, f64::min);
        let max = samples.iter().cloned().fold(f64::MIN, f64::max);

        Some(AggregateStat {
            // Rounding in the sum can push the mean a hair outside [min, max]
            // when all samples are equal.
            mean: mean.clamp(min, max),
            median,
            min,
            max,
            raw: samples.to_vec(),
        })
    }

    pub fn sample_count(&self) -> usize {
        self.raw.len()
    }

    fn mean(data: &[f64]) -> Option<f64> {
        let sum = data.iter().sum::<f64>();
        let count = data.len();

        match count {
            positive if positive > 0 => Some(sum / count as f64),
            _ => None,
        }
    }

    fn median(data: &[f64]) -> Option<f64> {
        if data.is_empty() {
            return None;
        }
        let mut sorted = data.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            Some((sorted[mid - 1] + sorted[mid]) / 2.0)
        } else {
            Some(sorted[mid])
        }
    }
}
