use crate::core::path::polyline;
use crate::core::{DataPoint, PathCommand, ValueRange, Viewport};

/// Projects a raw value series, autoscaled to its own min/max, into a line path.
///
/// Sample `i` of `n` lands at `x = i / max(1, n - 1) * plot_width`; values grow
/// upward, so `y = (1 - normalized) * plot_height`. A single sample or a
/// constant series sits on the vertical center. The function is deterministic
/// and side-effect free so rendering and tests consume the same geometry.
#[must_use]
pub fn project_line(values: &[f64], viewport: Viewport) -> Vec<PathCommand> {
    // Without a finite sample the degenerate fallback range still yields
    // exactly one command per point.
    project_line_with_range(values, autoscale(values), viewport)
}

/// Projects a raw value series against an externally supplied range.
///
/// Values outside `range` are not clamped and map outside the plot area.
/// Non-finite samples sit on the vertical center.
#[must_use]
pub fn project_line_with_range(
    values: &[f64],
    range: ValueRange,
    viewport: Viewport,
) -> Vec<PathCommand> {
    project_line_on_x_axis(values, range, values.len(), viewport)
}

/// Autoscaled range of one series, or a point at 0 when it has no finite sample.
pub(crate) fn autoscale(values: &[f64]) -> ValueRange {
    ValueRange::from_values(values).unwrap_or_else(|| ValueRange::point(0.0))
}

/// Projects `values` on an x-axis sized for `axis_len` samples.
///
/// Series drawn together pass the length of their longest member so sample
/// `i` lands on the same x in every one of them.
pub(crate) fn project_line_on_x_axis(
    values: &[f64],
    range: ValueRange,
    axis_len: usize,
    viewport: Viewport,
) -> Vec<PathCommand> {
    let plot_width = viewport.plot_width();
    let plot_height = viewport.plot_height();
    let last_index = axis_len.max(values.len()).saturating_sub(1).max(1) as f64;

    polyline(values.iter().enumerate().map(|(index, value)| {
        let x = index as f64 / last_index * plot_width;
        let unit = if value.is_finite() {
            range.normalize(*value)
        } else {
            0.5
        };
        let y = (1.0 - unit) * plot_height;
        (x, y)
    }))
}

/// Projects points already expressed in the unit square (e.g. precision/recall).
#[must_use]
pub fn project_unit_points(points: &[DataPoint], viewport: Viewport) -> Vec<PathCommand> {
    let plot_width = viewport.plot_width();
    let plot_height = viewport.plot_height();

    polyline(
        points
            .iter()
            .map(|point| (point.x * plot_width, (1.0 - point.y) * plot_height)),
    )
}
