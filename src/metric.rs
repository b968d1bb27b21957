//! Metrics that can be plotted against the sweep axis.

use crate::error::{Result, VizError};
use crate::schema::ParameterSet;

/// Edge length of the square automaton grid.
pub const WIDTH_HEIGHT: &str = "width_height";
/// Number of generations simulated per job.
pub const ITERATIONS: &str = "iterations";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    /// Mean wall-clock duration per job.
    Duration,
    /// Million cell updates per second.
    Efficiency,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Duration, Metric::Efficiency];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Duration => "duration",
            Metric::Efficiency => "efficiency",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Metric::Duration => "Duration",
            Metric::Efficiency => "Efficiency",
        }
    }

    pub fn y_desc(&self) -> &'static str {
        match self {
            Metric::Duration => "Average Duration (seconds)",
            Metric::Efficiency => "Efficiency (million cell updates / second)",
        }
    }
}

/// Throughput in million cell updates per second.
///
/// Total work is `width_height² × iterations`, the cell updates performed on a
/// square grid over the whole run.
pub fn efficiency(parameters: &ParameterSet, mean_duration: f64) -> Result<f64> {
    let width_height = parameters.number(WIDTH_HEIGHT)?;
    let iterations = parameters.number(ITERATIONS)?;
    if mean_duration <= 0.0 {
        return Err(VizError::DivisionByZero {
            duration: mean_duration,
        });
    }

    let total_work = width_height * width_height * iterations;
    Ok(total_work / mean_duration / 1_000_000.0)
}
