//! Descriptive statistics over per-job durations.

use crate::error::{Result, VizError};

/// Mean and population standard deviation of a duration sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DurationStat {
    pub mean: f64,
    pub stddev: f64,
}

impl DurationStat {
    /// Divides by `N`, not `N - 1`. Fails on an empty sample.
    pub fn from_samples(samples: &[f64]) -> Result<Self> {
        if samples.is_empty() {
            return Err(VizError::EmptyInput);
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;
        Ok(Self {
            mean,
            stddev: variance.sqrt(),
        })
    }
}

/// Everything the text report prints for one series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DurationSummary {
    pub count: usize,
    pub stat: DurationStat,
    pub min: f64,
    pub max: f64,
}

impl DurationSummary {
    pub fn from_samples(samples: &[f64]) -> Result<Self> {
        let stat = DurationStat::from_samples(samples)?;
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Ok(Self {
            count: samples.len(),
            stat,
            min,
            max,
        })
    }
}
