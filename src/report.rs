//! Plain-text summary statistics.
//!
//! Durations are always printed as fixed-point seconds with six decimals; the
//! axis [`NumberFormat`](crate::format::NumberFormat) policy never applies here.

use serde_json::Value;

use crate::dataset::{BenchmarkFile, Layout};
use crate::error::Result;
use crate::stats::DurationSummary;

pub const HEADING: &str = "Benchmark Summary Statistics:";

/// Summary lines for every group and series in `file`, in file order.
pub fn summary_lines(file: &BenchmarkFile) -> Result<Vec<String>> {
    let mut lines = vec![HEADING.to_string(), "-".repeat(50)];

    for (idx, group) in file.groups.iter().enumerate() {
        lines.push(String::new());
        match file.layout {
            Layout::Simple => lines.push(format!("Benchmark #{}", idx + 1)),
            Layout::Sweep => lines.push(format!("Benchmark Set #{}", idx + 1)),
        }

        lines.push("Parameters:".to_string());
        for (key, value) in group.parameters.iter() {
            lines.push(format!("  {key}: {}", display_value(value)));
        }

        for (label, samples) in file.labels.iter().zip(&group.samples) {
            let summary = DurationSummary::from_samples(samples)?;
            match file.layout {
                Layout::Simple => lines.push("Results:".to_string()),
                Layout::Sweep => lines.push(format!("Results ({label}):")),
            }
            push_summary(&mut lines, &summary);
        }
    }

    Ok(lines)
}

fn push_summary(lines: &mut Vec<String>, summary: &DurationSummary) {
    lines.push(format!("  Number of jobs: {}", summary.count));
    lines.push(format!(
        "  Average duration: {:.6} seconds",
        summary.stat.mean
    ));
    lines.push(format!("  Std deviation: {:.6} seconds", summary.stat.stddev));
    lines.push(format!("  Min duration: {:.6} seconds", summary.min));
    lines.push(format!("  Max duration: {:.6} seconds", summary.max));
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
