use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Converts exact readings (e.g. metered kWh) into a raw value series.
pub fn decimals_to_series(values: &[Decimal]) -> ChartResult<Vec<f64>> {
    values
        .iter()
        .map(|value| decimal_to_f64(*value, "series value"))
        .collect()
}
