//! Wire types for the two benchmark result layouts.
//!
//! Schema A (`benchmarks`) is what the automaton runner writes for a single
//! parameter sweep. Schema B (`sweep_type` + `benchmark_sets`) groups several
//! labeled implementations per parameter set.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, VizError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResult {
    pub duration: f64,
}

/// Named benchmark parameters, kept in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet(Map<String, Value>);

impl ParameterSet {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Numeric value of `name`.
    pub fn number(&self, name: &str) -> Result<f64> {
        let value = self.0.get(name).ok_or_else(|| VizError::MissingParameter {
            name: name.to_string(),
        })?;
        value.as_f64().ok_or_else(|| {
            VizError::DataFormat(format!("parameter `{name}` is not numeric: {value}"))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }
}

// Schema A

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordResults {
    pub results: Vec<JobResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub parameters: ParameterSet,
    pub results: RecordResults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleReport {
    pub benchmarks: Vec<BenchmarkRecord>,
}

// Schema B

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkType {
    pub description: String,
    pub results: Vec<JobResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkSet {
    pub parameters: ParameterSet,
    pub benchmark_types: Vec<BenchmarkType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    pub sweep_type: String,
    pub benchmark_sets: Vec<BenchmarkSet>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parameters_keep_file_order() {
        let params: ParameterSet =
            serde_json::from_value(json!({"width_height": 64, "iterations": 8, "num_jobs": 4}))
                .unwrap();
        let keys: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["width_height", "iterations", "num_jobs"]);
    }

    #[test]
    fn number_reports_missing_and_non_numeric() {
        let params: ParameterSet =
            serde_json::from_value(json!({"width_height": 64, "label": "gpu"})).unwrap();
        assert_eq!(params.number("width_height").unwrap(), 64.0);
        assert!(matches!(
            params.number("iterations"),
            Err(VizError::MissingParameter { name }) if name == "iterations"
        ));
        assert!(matches!(params.number("label"), Err(VizError::DataFormat(_))));
    }

    #[test]
    fn simple_report_ignores_extra_result_fields() {
        let report: SimpleReport = serde_json::from_value(json!({
            "benchmarks": [{
                "parameters": {"width_height": 16},
                "results": {"mem_required": 2048, "results": [{"duration": 0.25, "mem": 512}]}
            }]
        }))
        .unwrap();
        assert_eq!(report.benchmarks[0].results.results[0].duration, 0.25);
    }
}
