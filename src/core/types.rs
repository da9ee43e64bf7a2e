use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::decimal_to_f64;
use crate::error::{ChartError, ChartResult};

/// Logical chart viewbox: outer size plus uniform padding around the plot area.
///
/// Projected geometry is plot-local: `(0, 0)` is the top-left corner of the
/// padded plot area, and renderers translate it by `padding`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            padding: 0,
        }
    }

    /// Card used by the training-curve and precision/recall charts.
    #[must_use]
    pub fn metric_card() -> Self {
        Self::new(520, 280).with_padding(28)
    }

    /// Card used by the forecast-vs-actual chart.
    #[must_use]
    pub fn forecast_card() -> Self {
        Self::new(520, 260).with_padding(28)
    }

    #[must_use]
    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        let inset = u64::from(self.padding) * 2;
        self.width > 0
            && self.height > 0
            && inset < u64::from(self.width)
            && inset < u64::from(self.height)
    }

    pub fn validate(self) -> ChartResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
                padding: self.padding,
            })
        }
    }

    /// Width of the plot area once padding is removed on both sides.
    #[must_use]
    pub fn plot_width(self) -> f64 {
        f64::from(self.width.saturating_sub(self.padding.saturating_mul(2)))
    }

    /// Height of the plot area once padding is removed on both sides.
    #[must_use]
    pub fn plot_height(self) -> f64 {
        f64::from(self.height.saturating_sub(self.padding.saturating_mul(2)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_decimal(x: Decimal, y: Decimal) -> ChartResult<Self> {
        Ok(Self {
            x: decimal_to_f64(x, "x")?,
            y: decimal_to_f64(y, "y")?,
        })
    }
}

impl From<(f64, f64)> for DataPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}
