use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Closed value interval used to normalize raw samples into `[0, 1]`.
///
/// A zero-width range is allowed: it describes a constant series and every
/// value normalizes to the vertical center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    min: f64,
    max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> ChartResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::InvalidData(
                "value range bounds must be finite".to_owned(),
            ));
        }
        if min > max {
            return Err(ChartError::InvalidData(format!(
                "value range min ({min}) must not exceed max ({max})"
            )));
        }

        Ok(Self { min, max })
    }

    /// Zero-width range at `value`; every sample normalizes to the center.
    #[must_use]
    pub fn point(value: f64) -> Self {
        let value = if value.is_finite() { value } else { 0.0 };
        Self {
            min: value,
            max: value,
        }
    }

    /// Autoscaled range over the finite samples of one series.
    ///
    /// Returns `None` when the series holds no finite sample.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        Self::spanning([values])
    }

    /// Shared autoscaled range over several series drawn on one y-scale.
    #[must_use]
    pub fn spanning<'a, I>(series: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a [f64]>,
    {
        let mut min: Option<OrderedFloat<f64>> = None;
        let mut max: Option<OrderedFloat<f64>> = None;
        for values in series {
            for value in values.iter().copied().filter(|v| v.is_finite()) {
                let value = OrderedFloat(value);
                min = Some(min.map_or(value, |current| current.min(value)));
                max = Some(max.map_or(value, |current| current.max(value)));
            }
        }

        match (min, max) {
            (Some(min), Some(max)) => Some(Self {
                min: min.into_inner(),
                max: max.into_inner(),
            }),
            _ => None,
        }
    }

    #[must_use]
    pub fn min(self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.span() == 0.0
    }

    /// Maps `value` into unit space. Values outside the range are not clamped.
    #[must_use]
    pub fn normalize(self, value: f64) -> f64 {
        if self.is_degenerate() {
            return 0.5;
        }
        (value - self.min) / self.span()
    }

    /// Inverse of [`ValueRange::normalize`] for non-degenerate ranges.
    #[must_use]
    pub fn denormalize(self, unit: f64) -> f64 {
        self.min + unit * self.span()
    }
}
