use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};

use super::benchmark::{BenchmarkSpec, EndpointRole};
use crate::error::BenchError;
use crate::stats::AggregateStat;

/// Per-endpoint results, iterated in battery order.
pub type EndpointResults = BTreeMap<BenchmarkSpec, AggregateStat>;

/// Display label and `host:port` of one endpoint, recorded for the Renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointInfo {
    pub label: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub timestamp: String,
    pub num_operations: usize,
    pub repeat_count: usize,
    #[serde(default)]
    pub data_sizes: Vec<usize>,
    #[serde(default)]
    pub endpoints: BTreeMap<String, EndpointInfo>,
}

impl Metadata {
    /// Metadata stamped with the current local time.
    pub fn now(num_operations: usize, repeat_count: usize, data_sizes: &[usize]) -> Self {
        Metadata {
            timestamp: Local::now()
                .naive_local()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
            num_operations,
            repeat_count,
            data_sizes: data_sizes.to_vec(),
            endpoints: BTreeMap::new(),
        }
    }

    /// Label for `role`, falling back to the role name for older documents.
    pub fn label(&self, role: EndpointRole) -> String {
        self.endpoints
            .get(role.name())
            .map(|info| info.label.clone())
            .unwrap_or_else(|| role.name().to_string())
    }
}

/// Everything one Runner pass produced. Written once, read by the Renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultDocument {
    pub primary: EndpointResults,
    pub secondary: EndpointResults,
    pub metadata: Metadata,
}

impl ResultDocument {
    pub fn new(metadata: Metadata) -> Self {
        ResultDocument {
            primary: EndpointResults::new(),
            secondary: EndpointResults::new(),
            metadata,
        }
    }

    pub fn results(&self, role: EndpointRole) -> &EndpointResults {
        match role {
            EndpointRole::Primary => &self.primary,
            EndpointRole::Secondary => &self.secondary,
        }
    }

    pub fn results_mut(&mut self, role: EndpointRole) -> &mut EndpointResults {
        match role {
            EndpointRole::Primary => &mut self.primary,
            EndpointRole::Secondary => &mut self.secondary,
        }
    }

    pub fn to_json(&self) -> Result<String, BenchError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the document as indented JSON, replacing any previous run.
    pub fn save(&self, path: &Path) -> Result<(), BenchError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| BenchError::io(parent, e))?;
        }
        fs::write(path, self.to_json()?).map_err(|e| BenchError::io(path, e))
    }

    pub fn load(path: &Path) -> Result<Self, BenchError> {
        if !path.exists() {
            return Err(BenchError::RenderInputMissing(path.to_path_buf()));
        }
        let raw = fs::read_to_string(path).map_err(|e| BenchError::io(path, e))?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Operation;

    fn sample_document() -> ResultDocument {
        let mut doc = ResultDocument::new(Metadata::now(1000, 3, &[10, 1000]));
        doc.metadata.endpoints.insert(
            "primary".to_string(),
            EndpointInfo {
                label: "Redis".to_string(),
                address: "redis:6379".to_string(),
            },
        );
        let stat = AggregateStat::from_samples(&[0.1, 0.2, 0.3]).unwrap();
        doc.primary
            .insert(BenchmarkSpec::sized(Operation::Set, 10), stat.clone());
        doc.secondary
            .insert(BenchmarkSpec::plain(Operation::Incr), stat);
        doc
    }

    #[test]
    fn json_uses_role_names_and_string_keys() {
        let json = sample_document().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value["primary"]["set_10"]["mean"].is_number());
        assert_eq!(value["secondary"]["incr"]["raw"].as_array().unwrap().len(), 3);
        assert_eq!(value["metadata"]["num_operations"], 1000);
        assert_eq!(value["metadata"]["repeat_count"], 3);
        // Indented output, two spaces.
        assert!(json.contains("\n  \"primary\""));
    }

    #[test]
    fn save_then_load_restores_the_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("benchmark_results.json");
        let doc = sample_document();

        doc.save(&path).unwrap();
        let loaded = ResultDocument::load(&path).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn trial_durations_reload_bit_for_bit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("benchmark_results.json");
        let mut doc = ResultDocument::new(Metadata::now(1000, 3, &[10, 1000]));
        let samples = [
            [0.001415572, 0.0014155720000000001, 0.0013455543333333337],
            [0.0013455543333333335, 0.1 + 0.2, 1.0 / 3.0],
        ];
        for (spec, samples) in [
            (BenchmarkSpec::plain(Operation::Incr), &samples[0]),
            (BenchmarkSpec::plain(Operation::Lpop), &samples[1]),
        ] {
            let stat = AggregateStat::from_samples(samples).unwrap();
            doc.primary.insert(spec, stat.clone());
            doc.secondary.insert(spec, stat);
        }

        doc.save(&path).unwrap();
        let loaded = ResultDocument::load(&path).unwrap();
        for (spec, stat) in &doc.primary {
            let reloaded = &loaded.primary[spec];
            assert_eq!(reloaded.mean.to_bits(), stat.mean.to_bits(), "{spec}");
            assert_eq!(reloaded.median.to_bits(), stat.median.to_bits(), "{spec}");
            let raw: Vec<u64> = reloaded.raw.iter().map(|v| v.to_bits()).collect();
            let expected: Vec<u64> = stat.raw.iter().map(|v| v.to_bits()).collect();
            assert_eq!(raw, expected, "{spec}");
        }
        assert_eq!(loaded, doc);
    }

    #[test]
    fn loading_a_missing_file_reports_render_input_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        match ResultDocument::load(&path) {
            Err(BenchError::RenderInputMissing(p)) => assert_eq!(p, path),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn documents_without_supplementary_metadata_still_load() {
        let raw = r#"{
            "primary": {"lpop": {"mean": 1.0, "median": 1.0, "min": 1.0, "max": 1.0, "raw": [1.0]}},
            "secondary": {},
            "metadata": {"timestamp": "2024-01-01T00:00:00", "num_operations": 1000, "repeat_count": 3}
        }"#;
        let doc: ResultDocument = serde_json::from_str(raw).unwrap();
        assert!(doc.metadata.data_sizes.is_empty());
        assert_eq!(doc.metadata.label(EndpointRole::Secondary), "secondary");
        assert!(doc.primary.contains_key(&BenchmarkSpec::plain(Operation::Lpop)));
    }

    #[test]
    fn unknown_benchmark_keys_are_rejected() {
        let raw = r#"{"primary": {"flush": {"mean": 1.0, "median": 1.0, "min": 1.0, "max": 1.0, "raw": [1.0]}},
                      "secondary": {}, "metadata": {"timestamp": "t", "num_operations": 1, "repeat_count": 1}}"#;
        assert!(serde_json::from_str::<ResultDocument>(raw).is_err());
    }
}
