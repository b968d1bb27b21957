//! Ordering data points along the sweep axis.

use std::fmt;

use serde_json::Value;

use crate::error::{Result, VizError};
use crate::metric::WIDTH_HEIGHT;

/// Axis label used after a `width_height` sweep is converted to grid area.
pub const AREA_AXIS: &str = "size";

/// Data points sorted ascending by x, with the final axis label.
#[derive(Clone, Debug, PartialEq)]
pub struct Sweep<T> {
    pub axis: String,
    pub points: Vec<(f64, T)>,
}

impl<T> Sweep<T> {
    #[cfg(test)]
    fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(x, _)| *x)
    }
}

/// How the sweep axis is presented once sorted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisMode {
    /// Plot the parameter values as they are.
    Raw,
    /// Plot a `width_height` sweep as grid area ([`AREA_AXIS`]).
    Area,
}

/// Sorts `points` by their x-value, keeping payloads in lockstep.
///
/// Equal x-values keep their input order. A `width_height` sweep is relabeled
/// [`AREA_AXIS`] and every x-value is squared.
pub fn normalize<X, T>(axis: &str, points: Vec<(X, T)>) -> Result<Sweep<T>>
where
    X: SweepValue,
{
    normalize_with(axis, points, AxisMode::Area)
}

/// [`normalize`] with an explicit axis mode; [`AxisMode::Raw`] only sorts.
pub fn normalize_with<X, T>(axis: &str, points: Vec<(X, T)>, mode: AxisMode) -> Result<Sweep<T>>
where
    X: SweepValue,
{
    let mut numeric = points
        .into_iter()
        .map(|(x, payload)| match x.as_number() {
            Some(n) => Ok((n, payload)),
            None => Err(VizError::IncomparableValues {
                axis: axis.to_string(),
                value: x.to_string(),
            }),
        })
        .collect::<Result<Vec<_>>>()?;

    let to_area = mode == AxisMode::Area && axis == WIDTH_HEIGHT;
    if to_area {
        if let Some((x, _)) = numeric.iter().find(|(x, _)| *x < 0.0) {
            return Err(VizError::DataFormat(format!(
                "`{axis}` must be non-negative to convert to area, got {x}"
            )));
        }
    }

    numeric.sort_by(|a, b| a.0.total_cmp(&b.0));

    if to_area {
        for (x, _) in &mut numeric {
            *x *= *x;
        }
        return Ok(Sweep {
            axis: AREA_AXIS.to_string(),
            points: numeric,
        });
    }

    Ok(Sweep {
        axis: axis.to_string(),
        points: numeric,
    })
}

/// A raw sweep coordinate that may or may not be numeric.
pub trait SweepValue: fmt::Display {
    fn as_number(&self) -> Option<f64>;
}

impl SweepValue for f64 {
    fn as_number(&self) -> Option<f64> {
        (!self.is_nan()).then_some(*self)
    }
}

impl SweepValue for Value {
    fn as_number(&self) -> Option<f64> {
        self.as_f64()
    }
}

impl SweepValue for &Value {
    fn as_number(&self) -> Option<f64> {
        self.as_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sort_keeps_payload_in_lockstep() {
        let sweep = normalize("iterations", vec![(5.0, 'A'), (1.0, 'B'), (3.0, 'C')]).unwrap();
        assert_eq!(sweep.axis, "iterations");
        assert_eq!(sweep.points, vec![(1.0, 'B'), (3.0, 'C'), (5.0, 'A')]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let sweep = normalize("iterations", vec![(2.0, 1), (1.0, 2), (2.0, 3), (2.0, 4)]).unwrap();
        let payloads: Vec<i32> = sweep.points.iter().map(|(_, p)| *p).collect();
        assert_eq!(payloads, [2, 1, 3, 4]);
    }

    #[test]
    fn test_width_height_becomes_size() {
        let sweep = normalize(WIDTH_HEIGHT, vec![(4.0, "b"), (2.0, "a")]).unwrap();
        assert_eq!(sweep.axis, AREA_AXIS);
        assert_eq!(sweep.xs().collect::<Vec<_>>(), [4.0, 16.0]);
        assert_eq!(sweep.points[0].1, "a");
    }

    #[test]
    fn test_raw_mode_keeps_width_height() {
        let sweep =
            normalize_with(WIDTH_HEIGHT, vec![(20.0, "b"), (10.0, "a")], AxisMode::Raw).unwrap();
        assert_eq!(sweep.axis, WIDTH_HEIGHT);
        assert_eq!(sweep.xs().collect::<Vec<_>>(), [10.0, 20.0]);
        assert_eq!(sweep.points[0].1, "a");
    }

    #[test]
    fn test_negative_width_height_rejected_for_area() {
        let err = normalize(WIDTH_HEIGHT, vec![(3.0, ()), (-4.0, ())]).unwrap_err();
        assert!(matches!(err, VizError::DataFormat(ref m) if m.contains("-4")), "{err}");

        let raw = normalize_with(WIDTH_HEIGHT, vec![(3.0, ()), (-4.0, ())], AxisMode::Raw).unwrap();
        assert_eq!(raw.xs().collect::<Vec<_>>(), [-4.0, 3.0]);
    }

    #[test]
    fn test_json_values() {
        let sweep = normalize("iterations", vec![(json!(64), ()), (json!(0.5), ())]).unwrap();
        assert_eq!(sweep.xs().collect::<Vec<_>>(), [0.5, 64.0]);
    }

    #[test]
    fn test_non_numeric_value_rejected() {
        let err = normalize("iterations", vec![(json!(1), ()), (json!("many"), ())]).unwrap_err();
        match err {
            VizError::IncomparableValues { axis, value } => {
                assert_eq!(axis, "iterations");
                assert_eq!(value, "\"many\"");
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(matches!(
            normalize("iterations", vec![(f64::NAN, ())]),
            Err(VizError::IncomparableValues { .. })
        ));
    }
}
