//! Loading benchmark result files into one normalized shape.
//!
//! Both JSON layouts are parsed by their own variant parser and then folded
//! into [`BenchmarkFile`]: an ordered list of parameter groups, each holding
//! one duration sample list per series label. Every group lists its series in
//! the same order as [`BenchmarkFile::labels`].

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{Result, VizError};
use crate::schema::{JobResult, ParameterSet, SimpleReport, SweepReport};

/// Series label used for single-series (schema A) files.
pub const SIMPLE_SERIES_LABEL: &str = "Average Duration";

/// Which JSON layout a file was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// `{"benchmarks": [...]}`
    Simple,
    /// `{"sweep_type": ..., "benchmark_sets": [...]}`
    Sweep,
}

/// One parameter set and the job durations measured for each series under it.
#[derive(Debug, Clone)]
pub struct BenchmarkGroup {
    pub parameters: ParameterSet,
    /// Index-aligned with [`BenchmarkFile::labels`]; never empty per entry.
    pub samples: Vec<Vec<f64>>,
}

#[derive(Debug, Clone)]
pub struct BenchmarkFile {
    pub layout: Layout,
    /// Sweep parameter declared by the file, if the layout carries one.
    pub sweep_axis: Option<String>,
    pub labels: Vec<String>,
    pub groups: Vec<BenchmarkGroup>,
}

impl BenchmarkFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| VizError::io("read", path, e))?;
        let file = Self::from_json_str(&text)?;
        debug!(
            path = %path.display(),
            layout = ?file.layout,
            groups = file.groups.len(),
            series = file.labels.len(),
            "loaded benchmark file"
        );
        Ok(file)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Picks the variant parser from the top-level keys.
    pub fn from_value(value: Value) -> Result<Self> {
        let Some(object) = value.as_object() else {
            return Err(VizError::DataFormat(
                "top-level JSON value must be an object".to_string(),
            ));
        };

        if object.contains_key("benchmark_sets") || object.contains_key("sweep_type") {
            for key in ["sweep_type", "benchmark_sets"] {
                if !object.contains_key(key) {
                    return Err(VizError::DataFormat(format!("missing `{key}` key")));
                }
            }
            let report: SweepReport = serde_json::from_value(value)?;
            Self::from_sweep(report)
        } else if object.contains_key("benchmarks") {
            let report: SimpleReport = serde_json::from_value(value)?;
            Self::from_simple(report)
        } else {
            Err(VizError::DataFormat(
                "missing `benchmarks` key (or `sweep_type`/`benchmark_sets`)".to_string(),
            ))
        }
    }

    pub fn from_simple(report: SimpleReport) -> Result<Self> {
        if report.benchmarks.is_empty() {
            return Err(VizError::DataFormat("`benchmarks` is empty".to_string()));
        }

        let groups = report
            .benchmarks
            .into_iter()
            .map(|record| {
                Ok(BenchmarkGroup {
                    samples: vec![durations(&record.results.results)?],
                    parameters: record.parameters,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            layout: Layout::Simple,
            sweep_axis: None,
            labels: vec![SIMPLE_SERIES_LABEL.to_string()],
            groups,
        })
    }

    pub fn from_sweep(report: SweepReport) -> Result<Self> {
        let Some(first) = report.benchmark_sets.first() else {
            return Err(VizError::DataFormat("`benchmark_sets` is empty".to_string()));
        };
        let labels: Vec<String> = first
            .benchmark_types
            .iter()
            .map(|t| t.description.clone())
            .collect();
        if labels.is_empty() {
            return Err(VizError::DataFormat(
                "benchmark set #1 has no benchmark_types".to_string(),
            ));
        }

        let mut groups = Vec::with_capacity(report.benchmark_sets.len());
        for (idx, set) in report.benchmark_sets.into_iter().enumerate() {
            let found: Vec<&str> = set
                .benchmark_types
                .iter()
                .map(|t| t.description.as_str())
                .collect();
            if found != labels {
                return Err(VizError::DataFormat(format!(
                    "benchmark set #{} lists types {:?}, expected {:?}",
                    idx + 1,
                    found,
                    labels
                )));
            }

            let samples = set
                .benchmark_types
                .iter()
                .map(|t| durations(&t.results))
                .collect::<Result<Vec<_>>>()?;
            groups.push(BenchmarkGroup {
                parameters: set.parameters,
                samples,
            });
        }

        Ok(Self {
            layout: Layout::Sweep,
            sweep_axis: Some(report.sweep_type),
            labels,
            groups,
        })
    }
}

fn durations(jobs: &[JobResult]) -> Result<Vec<f64>> {
    if jobs.is_empty() {
        return Err(VizError::EmptyInput);
    }
    jobs.iter()
        .map(|job| {
            if job.duration.is_finite() && job.duration >= 0.0 {
                Ok(job.duration)
            } else {
                Err(VizError::DataFormat(format!(
                    "job duration must be a non-negative number, got {}",
                    job.duration
                )))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn sweep_json() -> Value {
        json!({
            "sweep_type": "width_height",
            "benchmark_sets": [
                {
                    "parameters": {"width_height": 64, "iterations": 10},
                    "benchmark_types": [
                        {"description": "cpu", "results": [{"duration": 0.5}, {"duration": 0.7}]},
                        {"description": "gpu", "results": [{"duration": 0.1}]}
                    ]
                },
                {
                    "parameters": {"width_height": 32, "iterations": 10},
                    "benchmark_types": [
                        {"description": "cpu", "results": [{"duration": 0.2}]},
                        {"description": "gpu", "results": [{"duration": 0.05}]}
                    ]
                }
            ]
        })
    }

    #[test]
    fn test_simple_layout() {
        let file = BenchmarkFile::from_value(json!({
            "benchmarks": [
                {"parameters": {"width_height": 10}, "results": {"results": [{"duration": 1.0}]}}
            ]
        }))
        .unwrap();

        assert_eq!(file.layout, Layout::Simple);
        assert_eq!(file.sweep_axis, None);
        assert_eq!(file.labels, [SIMPLE_SERIES_LABEL]);
        assert_eq!(file.groups[0].samples, vec![vec![1.0]]);
    }

    #[test]
    fn test_sweep_layout() {
        let file = BenchmarkFile::from_value(sweep_json()).unwrap();

        assert_eq!(file.layout, Layout::Sweep);
        assert_eq!(file.sweep_axis.as_deref(), Some("width_height"));
        assert_eq!(file.labels, ["cpu", "gpu"]);
        assert_eq!(file.groups.len(), 2);
        assert_eq!(file.groups[0].samples, vec![vec![0.5, 0.7], vec![0.1]]);
    }

    #[test]
    fn test_missing_top_level_keys() {
        let err = BenchmarkFile::from_value(json!({"results": []})).unwrap_err();
        assert!(matches!(err, VizError::DataFormat(ref m) if m.contains("benchmarks")));

        let err = BenchmarkFile::from_value(json!({"benchmark_sets": []})).unwrap_err();
        assert!(matches!(err, VizError::DataFormat(ref m) if m.contains("sweep_type")));

        let err = BenchmarkFile::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, VizError::DataFormat(_)));
    }

    #[test]
    fn test_empty_results_rejected() {
        let err = BenchmarkFile::from_value(json!({
            "benchmarks": [{"parameters": {"width_height": 10}, "results": {"results": []}}]
        }))
        .unwrap_err();
        assert!(matches!(err, VizError::EmptyInput));
    }

    #[test]
    fn test_negative_duration_rejected() {
        let err = BenchmarkFile::from_value(json!({
            "benchmarks": [{"parameters": {"width_height": 10}, "results": {"results": [{"duration": -1.0}]}}]
        }))
        .unwrap_err();
        assert!(matches!(err, VizError::DataFormat(_)));
    }

    #[test]
    fn test_misaligned_types_rejected() {
        let mut value = sweep_json();
        value["benchmark_sets"][1]["benchmark_types"][0]["description"] = json!("simd");

        let err = BenchmarkFile::from_value(value).unwrap_err();
        match err {
            VizError::DataFormat(msg) => assert!(msg.contains("#2"), "{msg}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sweep.json");
        fs::write(&path, serde_json::to_string_pretty(&sweep_json()).unwrap()).unwrap();

        let file = BenchmarkFile::load(&path).unwrap();
        assert_eq!(file.groups.len(), 2);

        let err = BenchmarkFile::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, VizError::Io { .. }));
    }
}
