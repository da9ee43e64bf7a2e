use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::line_series::{autoscale, project_line_on_x_axis};
use crate::core::{DataPoint, PathCommand, ValueRange, Viewport, project_unit_points};

/// Several series drawn into one chart.
///
/// Each variant is one scaling mode; a chart cannot mix them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MultiSeries {
    /// Pairs already normalized to the unit square, drawn without autoscale.
    UnitSquare(Vec<Vec<DataPoint>>),
    /// Raw values sharing one y-scale (e.g. actual vs forecast).
    ///
    /// `range: None` autoscales over the union of all series.
    SharedRange {
        series: Vec<Vec<f64>>,
        range: Option<ValueRange>,
    },
    /// Raw values, each autoscaled to its own min/max (e.g. loss vs accuracy).
    Independent(Vec<Vec<f64>>),
}

impl MultiSeries {
    #[must_use]
    pub fn shared(series: Vec<Vec<f64>>) -> Self {
        Self::SharedRange {
            series,
            range: None,
        }
    }

    #[must_use]
    pub fn shared_with_range(series: Vec<Vec<f64>>, range: ValueRange) -> Self {
        Self::SharedRange {
            series,
            range: Some(range),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::UnitSquare(series) => series.len(),
            Self::SharedRange { series, .. } | Self::Independent(series) => series.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample count of the longest raw series; every raw series is laid out on
    /// an x-axis of this many samples.
    #[must_use]
    pub fn x_axis_len(&self) -> usize {
        match self {
            Self::UnitSquare(_) => 0,
            Self::SharedRange { series, .. } | Self::Independent(series) => {
                series.iter().map(Vec::len).max().unwrap_or(0)
            }
        }
    }

    /// Range used for every series in `SharedRange` mode.
    #[must_use]
    pub fn resolved_shared_range(&self) -> Option<ValueRange> {
        match self {
            Self::SharedRange {
                range: Some(range), ..
            } => Some(*range),
            Self::SharedRange {
                series,
                range: None,
            } => ValueRange::spanning(series.iter().map(Vec::as_slice)),
            Self::UnitSquare(_) | Self::Independent(_) => None,
        }
    }
}

/// Projects every series of a chart, one path per series, in input order.
///
/// Raw series share one x-axis sized by the longest series, so shorter
/// series end early instead of being stretched across the plot.
#[must_use]
pub fn project_multi_series(series: &MultiSeries, viewport: Viewport) -> Vec<Vec<PathCommand>> {
    let axis_len = series.x_axis_len();
    trace!(series_count = series.len(), axis_len, "project multi series");
    match series {
        MultiSeries::UnitSquare(sets) => map_series(sets, |points| {
            project_unit_points(points, viewport)
        }),
        MultiSeries::SharedRange { series: sets, .. } => {
            let range = series
                .resolved_shared_range()
                .unwrap_or_else(|| ValueRange::point(0.0));
            map_series(sets, |values| {
                project_line_on_x_axis(values, range, axis_len, viewport)
            })
        }
        MultiSeries::Independent(sets) => map_series(sets, |values| {
            project_line_on_x_axis(values, autoscale(values), axis_len, viewport)
        }),
    }
}

#[cfg(not(feature = "parallel-projection"))]
fn map_series<T, F>(sets: &[Vec<T>], project: F) -> Vec<Vec<PathCommand>>
where
    F: Fn(&[T]) -> Vec<PathCommand>,
{
    sets.iter().map(|set| project(set)).collect()
}

#[cfg(feature = "parallel-projection")]
fn map_series<T, F>(sets: &[Vec<T>], project: F) -> Vec<Vec<PathCommand>>
where
    T: Sync,
    F: Fn(&[T]) -> Vec<PathCommand> + Sync + Send,
{
    use rayon::prelude::*;

    sets.par_iter().map(|set| project(set)).collect()
}
