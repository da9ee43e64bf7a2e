use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One confusion-matrix cell with its two independent derivations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntensityCell {
    pub value: f64,
    /// `value / matrix_max`, drives color intensity.
    pub intensity: f64,
    /// `value / matrix_total`, drives the percentage label.
    pub share: f64,
}

impl IntensityCell {
    #[must_use]
    pub fn percentage(self) -> f64 {
        self.share * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntensityGrid {
    pub labels: Vec<String>,
    pub rows: Vec<Vec<IntensityCell>>,
    pub max: f64,
    pub total: f64,
}

impl IntensityGrid {
    #[must_use]
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<IntensityCell> {
        self.rows.get(row)?.get(column).copied()
    }
}

/// Projects an `n x n` matrix into per-cell intensity and share ratios.
///
/// Non-finite cells are left out of the max and total and get ratios of 0.
/// Both divisors are guarded: a zero max or zero total yields ratios of 0.
/// Only structural problems are errors: rows of differing length, a
/// non-square matrix, or a label count that does not match the row count.
pub fn project_intensity_grid<S>(matrix: &[Vec<f64>], labels: &[S]) -> ChartResult<IntensityGrid>
where
    S: AsRef<str>,
{
    let size = matrix.len();
    if labels.len() != size {
        return Err(ChartError::InvalidData(format!(
            "intensity grid expects {size} labels, got {}",
            labels.len()
        )));
    }
    if let Some((index, row)) = matrix.iter().enumerate().find(|(_, row)| row.len() != size) {
        return Err(ChartError::InvalidData(format!(
            "intensity grid row {index} has {} cells, expected {size}",
            row.len()
        )));
    }

    let finite_cells = || matrix.iter().flatten().copied().filter(|v| v.is_finite());
    let max = finite_cells()
        .map(OrderedFloat)
        .max()
        .map_or(0.0, OrderedFloat::into_inner);
    let total: f64 = finite_cells().sum();

    let rows = matrix
        .iter()
        .map(|row| {
            row.iter()
                .map(|&value| IntensityCell {
                    value,
                    intensity: guarded_ratio(value, max),
                    share: guarded_ratio(value, total),
                })
                .collect()
        })
        .collect();

    Ok(IntensityGrid {
        labels: labels.iter().map(|label| label.as_ref().to_owned()).collect(),
        rows,
        max,
        total,
    })
}

fn guarded_ratio(value: f64, divisor: f64) -> f64 {
    if !value.is_finite() || divisor == 0.0 || !divisor.is_finite() {
        0.0
    } else {
        value / divisor
    }
}
