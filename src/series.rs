//! Reduced, sorted series ready to be charted.

use crate::dataset::BenchmarkFile;
use crate::error::{Result, VizError};
use crate::metric::{efficiency, Metric};
use crate::schema::ParameterSet;
use crate::stats::DurationStat;
use crate::sweep::{self, AxisMode};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesPoint {
    pub x: f64,
    pub stat: DurationStat,
}

/// One labeled line of (x, duration) points, ascending by x.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<SeriesPoint>,
}

/// A y-value with a symmetric error bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
    pub err: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlotSeries {
    pub label: String,
    pub points: Vec<PlotPoint>,
}

/// Every series of a file, normalized along one sweep axis.
///
/// `parameters[i]` is the parameter set that produced point `i` of every
/// series.
#[derive(Clone, Debug)]
pub struct SeriesSet {
    pub axis: String,
    pub series: Vec<Series>,
    pub parameters: Vec<ParameterSet>,
}

impl SeriesSet {
    /// Aggregates every group and sorts all series by the `axis` parameter.
    ///
    /// With [`AxisMode::Area`] a `width_height` axis is plotted as grid area.
    pub fn collect(file: &BenchmarkFile, axis: &str, mode: AxisMode) -> Result<Self> {
        let mut raw = Vec::with_capacity(file.groups.len());
        for group in &file.groups {
            let x = group
                .parameters
                .get(axis)
                .ok_or_else(|| VizError::MissingParameter {
                    name: axis.to_string(),
                })?;
            let stats = group
                .samples
                .iter()
                .map(|samples| DurationStat::from_samples(samples))
                .collect::<Result<Vec<_>>>()?;
            raw.push((x, (&group.parameters, stats)));
        }

        let sorted = sweep::normalize_with(axis, raw, mode)?;

        let mut series: Vec<Series> = file
            .labels
            .iter()
            .map(|label| Series {
                label: label.clone(),
                points: Vec::with_capacity(sorted.points.len()),
            })
            .collect();
        let mut parameters = Vec::with_capacity(sorted.points.len());

        for (x, (params, stats)) in sorted.points {
            for (line, stat) in series.iter_mut().zip(stats) {
                line.points.push(SeriesPoint { x, stat });
            }
            parameters.push(params.clone());
        }

        Ok(Self {
            axis: sorted.axis,
            series,
            parameters,
        })
    }

    /// Y-values and error bars for `metric`.
    ///
    /// Efficiency error bars scale the relative duration deviation onto the
    /// throughput value.
    pub fn plot_series(&self, metric: Metric) -> Result<Vec<PlotSeries>> {
        self.series
            .iter()
            .map(|line| {
                let points = line
                    .points
                    .iter()
                    .zip(&self.parameters)
                    .map(|(point, params)| self.plot_point(metric, point, params))
                    .collect::<Result<Vec<_>>>()?;
                Ok(PlotSeries {
                    label: line.label.clone(),
                    points,
                })
            })
            .collect()
    }

    fn plot_point(
        &self,
        metric: Metric,
        point: &SeriesPoint,
        params: &ParameterSet,
    ) -> Result<PlotPoint> {
        let DurationStat { mean, stddev } = point.stat;
        match metric {
            Metric::Duration => Ok(PlotPoint {
                x: point.x,
                y: mean,
                err: stddev,
            }),
            Metric::Efficiency => {
                let y = efficiency(params, mean)?;
                Ok(PlotPoint {
                    x: point.x,
                    y,
                    err: y * stddev / mean,
                })
            }
        }
    }
}
