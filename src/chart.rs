//! Chart descriptions and the PNG renderer.
//!
//! [`ChartSpec`] is everything a renderer needs: already-reduced points, axis
//! text, scale and tick policy. [`PngRenderer`] draws it with `plotters`; tests
//! swap in their own [`ChartRenderer`].

use std::ops::Range;
use std::path::Path;

use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::ranged1d::{Ranged, ValueFormatter};
use plotters::prelude::*;
use tracing::{info, warn};

use crate::error::{Result, VizError};
use crate::format::{axis_title, NumberFormat};
use crate::metric::Metric;
use crate::series::{PlotPoint, PlotSeries, SeriesSet};
use crate::Scale;

const TITLE_FONT_SIZE: u32 = 28;
const AXIS_LABEL_FONT_SIZE: u32 = 20;
const TICK_LABEL_FONT_SIZE: u32 = 15;
const LEGEND_FONT_SIZE: u32 = 16;
const MARKER_SIZE: u32 = 5;
const ERROR_BAR_WIDTH: u32 = 10;

/// Line colors, cycled per series.
const PALETTE: &[RGBColor] = &[
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Marker {
    Circle,
    Triangle,
    Cross,
}

const MARKERS: &[Marker] = &[Marker::Circle, Marker::Triangle, Marker::Cross];

#[derive(Clone, Debug, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub scale: Scale,
    pub number_format: NumberFormat,
    pub series: Vec<PlotSeries>,
}

impl ChartSpec {
    pub fn build(
        set: &SeriesSet,
        metric: Metric,
        scale: Scale,
        number_format: NumberFormat,
    ) -> Result<Self> {
        let x_desc = axis_title(&set.axis);
        Ok(Self {
            title: format!("Benchmark Performance: {} vs {}", metric.title(), x_desc),
            x_desc,
            y_desc: metric.y_desc().to_string(),
            scale,
            number_format,
            series: set.plot_series(metric)?,
        })
    }

    /// Points that can be placed on this chart's axes.
    fn drawable<'a>(&self, series: &'a PlotSeries) -> Vec<&'a PlotPoint> {
        series
            .points
            .iter()
            .filter(|p| self.scale == Scale::Linear || (p.x > 0.0 && p.y > 0.0))
            .collect()
    }

    /// Axis ranges covering every drawable point and its error bar.
    pub fn bounds(&self) -> Result<(Range<f64>, Range<f64>)> {
        let points: Vec<&PlotPoint> = self.series.iter().flat_map(|s| self.drawable(s)).collect();
        if points.is_empty() {
            return Err(VizError::Render(format!(
                "no drawable points for a {} chart",
                self.scale.as_str()
            )));
        }

        let x_min = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let x_max = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let y_min = points.iter().map(|p| p.y - p.err).fold(f64::INFINITY, f64::min);
        let y_max = points.iter().map(|p| p.y + p.err).fold(f64::NEG_INFINITY, f64::max);

        match self.scale {
            Scale::Linear => {
                let x_lo = if x_min >= 0.0 { 0.0 } else { x_min };
                let y_lo = if y_min >= 0.0 { 0.0 } else { y_min };
                Ok((
                    x_lo..padded(x_lo, x_max, 1.05),
                    y_lo..padded(y_lo, y_max, 1.1),
                ))
            }
            Scale::Log => {
                let y_min = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
                Ok((x_min / 1.5..x_max * 1.5, y_min / 1.5..y_max * 1.5))
            }
        }
    }
}

fn padded(lo: f64, hi: f64, factor: f64) -> f64 {
    if hi > lo {
        lo + (hi - lo) * factor
    } else {
        lo + 1.0
    }
}

/// Turns a [`ChartSpec`] into an image file.
pub trait ChartRenderer {
    fn render(&mut self, spec: &ChartSpec, path: &Path) -> Result<()>;
}

#[derive(Clone, Copy, Debug)]
pub struct PngRenderer {
    pub width: u32,
    pub height: u32,
}

impl PngRenderer {
    pub fn new((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl ChartRenderer for PngRenderer {
    fn render(&mut self, spec: &ChartSpec, path: &Path) -> Result<()> {
        let (x_range, y_range) = spec.bounds()?;

        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(VizError::render)?;

        let mut builder = ChartBuilder::on(&root);
        builder
            .caption(spec.title.as_str(), ("sans-serif", TITLE_FONT_SIZE))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(100);

        match spec.scale {
            Scale::Linear => {
                let chart = builder
                    .build_cartesian_2d(x_range, y_range)
                    .map_err(VizError::render)?;
                draw_chart(chart, spec)?;
            }
            Scale::Log => {
                let chart = builder
                    .build_cartesian_2d(x_range.log_scale(), y_range.log_scale())
                    .map_err(VizError::render)?;
                draw_chart(chart, spec)?;
            }
        }

        root.present().map_err(VizError::render)?;
        info!(path = %path.display(), "wrote chart");
        Ok(())
    }
}

fn draw_chart<'a, DB, X, Y>(
    mut chart: ChartContext<'a, DB, Cartesian2d<X, Y>>,
    spec: &ChartSpec,
) -> Result<()>
where
    DB: DrawingBackend + 'a,
    X: Ranged<ValueType = f64> + ValueFormatter<f64>,
    Y: Ranged<ValueType = f64> + ValueFormatter<f64>,
{
    let number_format = spec.number_format;
    let tick = move |v: &f64| number_format.format(*v);

    chart
        .configure_mesh()
        .x_desc(spec.x_desc.as_str())
        .y_desc(spec.y_desc.as_str())
        .x_label_formatter(&tick)
        .y_label_formatter(&tick)
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()
        .map_err(VizError::render)?;

    for (idx, series) in spec.series.iter().enumerate() {
        let color = PALETTE[idx % PALETTE.len()];
        let points = spec.drawable(series);
        if points.len() < series.points.len() {
            warn!(
                series = %series.label,
                skipped = series.points.len() - points.len(),
                "omitting non-positive points from log chart"
            );
        }
        let coords: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();

        chart
            .draw_series(LineSeries::new(coords.clone(), color.stroke_width(2)))
            .map_err(VizError::render)?
            .label(series.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        chart
            .draw_series(points.iter().map(|p| {
                let (low, high) = error_extent(spec.scale, p);
                ErrorBar::new_vertical(p.x, low, p.y, high, color.stroke_width(1), ERROR_BAR_WIDTH)
            }))
            .map_err(VizError::render)?;

        match MARKERS[idx % MARKERS.len()] {
            Marker::Circle => chart.draw_series(
                coords.iter().map(|&c| Circle::new(c, MARKER_SIZE, color.filled())),
            ),
            Marker::Triangle => chart.draw_series(
                coords.iter().map(|&c| TriangleMarker::new(c, MARKER_SIZE + 1, color.filled())),
            ),
            Marker::Cross => chart.draw_series(
                coords.iter().map(|&c| Cross::new(c, MARKER_SIZE, color.stroke_width(2))),
            ),
        }
        .map_err(VizError::render)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", LEGEND_FONT_SIZE))
        .draw()
        .map_err(VizError::render)?;

    Ok(())
}

/// Lower and upper end of a point's error bar; log axes clamp the lower end
/// to the point itself when it would cross zero.
fn error_extent(scale: Scale, p: &PlotPoint) -> (f64, f64) {
    let low = p.y - p.err;
    match scale {
        Scale::Log if low <= 0.0 => (p.y, p.y + p.err),
        _ => (low, p.y + p.err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(scale: Scale, points: Vec<PlotPoint>) -> ChartSpec {
        ChartSpec {
            title: "t".to_string(),
            x_desc: "Size".to_string(),
            y_desc: "y".to_string(),
            scale,
            number_format: NumberFormat::Scientific,
            series: vec![PlotSeries {
                label: "cpu".to_string(),
                points,
            }],
        }
    }

    fn pt(x: f64, y: f64, err: f64) -> PlotPoint {
        PlotPoint { x, y, err }
    }

    #[test]
    fn test_linear_bounds_start_at_zero() {
        let s = spec(Scale::Linear, vec![pt(10.0, 1.0, 0.5), pt(20.0, 2.0, 0.0)]);
        let (x, y) = s.bounds().unwrap();
        assert_eq!(x.start, 0.0);
        assert!((x.end - 21.0).abs() < 1e-9);
        assert_eq!(y.start, 0.0);
        assert!((y.end - 2.2).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_linear_bounds_are_widened() {
        let s = spec(Scale::Linear, vec![pt(0.0, 0.0, 0.0)]);
        let (x, y) = s.bounds().unwrap();
        assert!(x.end > x.start);
        assert!(y.end > y.start);
    }

    #[test]
    fn test_log_bounds_skip_non_positive_points() {
        let s = spec(Scale::Log, vec![pt(0.0, 1.0, 0.0), pt(4.0, 2.0, 0.0), pt(16.0, 8.0, 0.0)]);
        let (x, y) = s.bounds().unwrap();
        assert!((x.start - 4.0 / 1.5).abs() < 1e-9);
        assert!((x.end - 24.0).abs() < 1e-9);
        assert!((y.start - 2.0 / 1.5).abs() < 1e-9);
        assert!(y.start > 0.0);
    }

    #[test]
    fn test_log_chart_without_positive_points_fails() {
        let s = spec(Scale::Log, vec![pt(0.0, 1.0, 0.0)]);
        assert!(matches!(s.bounds(), Err(VizError::Render(_))));
    }

    #[test]
    fn test_error_extent_clamps_on_log_axes() {
        let p = pt(1.0, 1.0, 2.0);
        assert_eq!(error_extent(Scale::Linear, &p), (-1.0, 3.0));
        assert_eq!(error_extent(Scale::Log, &p), (1.0, 3.0));
    }
}
