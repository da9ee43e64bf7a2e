use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ValueRange, Viewport};

/// Unit positions that get a tick on both axes.
pub const UNIT_TICKS: [f64; 3] = [0.0, 0.5, 1.0];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    /// Unit-space position in `[0, 1]`.
    pub unit: f64,
    /// Plot-local pixel coordinate along the axis.
    pub position: f64,
    pub label: String,
}

pub type AxisTicks = SmallVec<[AxisTick; 3]>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLayout {
    pub x: AxisTicks,
    pub y: AxisTicks,
}

/// Ticks for charts whose both axes live in `[0, 1]` (precision/recall, ROC).
#[must_use]
pub fn unit_axis_ticks(viewport: Viewport) -> AxisLayout {
    AxisLayout {
        x: x_ticks(viewport, format_tick_label),
        y: y_ticks(viewport, format_tick_label),
    }
}

/// Ticks for an index x-axis and a value y-axis labelled in data units.
///
/// A degenerate range labels every y tick with its single value.
#[must_use]
pub fn value_axis_ticks(range: ValueRange, viewport: Viewport) -> AxisLayout {
    AxisLayout {
        x: x_ticks(viewport, format_tick_label),
        y: y_ticks(viewport, |unit| format_tick_label(range.denormalize(unit))),
    }
}

fn x_ticks(viewport: Viewport, label: impl Fn(f64) -> String) -> AxisTicks {
    let plot_width = viewport.plot_width();
    UNIT_TICKS
        .iter()
        .map(|&unit| AxisTick {
            unit,
            position: unit * plot_width,
            label: label(unit),
        })
        .collect()
}

fn y_ticks(viewport: Viewport, label: impl Fn(f64) -> String) -> AxisTicks {
    let plot_height = viewport.plot_height();
    UNIT_TICKS
        .iter()
        .map(|&unit| AxisTick {
            unit,
            position: (1.0 - unit) * plot_height,
            label: label(unit),
        })
        .collect()
}

/// Formats a tick value with at most two decimals and no trailing zeros.
#[must_use]
pub fn format_tick_label(value: f64) -> String {
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}
