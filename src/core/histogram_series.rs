use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Viewport;

/// Bucket count used by the error-distribution chart.
pub const DEFAULT_BUCKET_COUNT: usize = 6;

/// Per-bucket sample counts; inline for the usual handful of buckets.
pub type BucketCounts = SmallVec<[usize; 8]>;

/// Absolute forecast errors `|actual - forecast|` over the common prefix.
#[must_use]
pub fn absolute_errors(actual: &[f64], forecast: &[f64]) -> Vec<f64> {
    actual
        .iter()
        .zip(forecast)
        .map(|(a, f)| (a - f).abs())
        .collect()
}

/// Buckets errors by their magnitude relative to the largest observed error.
///
/// Each sample lands in `floor(error / max_error * bucket_count)`, clamped to
/// the last bucket, so the maximum error always falls in the last bucket. A
/// zero max normalizes by 1 instead. Non-finite or negative errors land in
/// bucket 0. Counts always sum to `errors.len()`; zero buckets yield an empty
/// result.
#[must_use]
pub fn bucket_histogram(errors: &[f64], bucket_count: usize) -> BucketCounts {
    let mut buckets: BucketCounts = SmallVec::from_elem(0, bucket_count);
    if bucket_count == 0 {
        return buckets;
    }

    let max_error = errors
        .iter()
        .copied()
        .filter(|e| e.is_finite())
        .map(OrderedFloat)
        .max()
        .map_or(0.0, OrderedFloat::into_inner);
    let scale = if max_error > 0.0 { max_error } else { 1.0 };

    for error in errors {
        buckets[bucket_index(*error / scale, bucket_count)] += 1;
    }
    buckets
}

fn bucket_index(normalized: f64, bucket_count: usize) -> usize {
    if !normalized.is_finite() || normalized <= 0.0 {
        return 0;
    }
    // Float-to-int casts saturate, so huge ratios still clamp below.
    let index = (normalized * bucket_count as f64).floor() as usize;
    index.min(bucket_count - 1)
}

/// Deterministic bar geometry for one histogram bucket, plot-local.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBar {
    pub bucket: usize,
    pub count: usize,
    pub x_left: f64,
    pub x_right: f64,
    pub y_top: f64,
    pub y_bottom: f64,
}

impl HistogramBar {
    #[must_use]
    pub fn height(self) -> f64 {
        self.y_bottom - self.y_top
    }
}

/// Lays bucket counts out as equal-width bars scaled to the tallest bucket.
///
/// `gap_px` separates neighbouring bars; it is clamped so bars never get a
/// negative width. When every count is zero all bars have zero height.
#[must_use]
pub fn project_bucket_bars(counts: &[usize], viewport: Viewport, gap_px: f64) -> Vec<HistogramBar> {
    if counts.is_empty() {
        return Vec::new();
    }

    let plot_width = viewport.plot_width();
    let plot_height = viewport.plot_height();
    let slot = plot_width / counts.len() as f64;
    let gap = if gap_px.is_finite() {
        gap_px.clamp(0.0, slot)
    } else {
        0.0
    };
    let tallest = counts.iter().copied().max().unwrap_or(0);

    counts
        .iter()
        .enumerate()
        .map(|(bucket, &count)| {
            let ratio = if tallest == 0 {
                0.0
            } else {
                count as f64 / tallest as f64
            };
            let x_left = bucket as f64 * slot + gap * 0.5;
            HistogramBar {
                bucket,
                count,
                x_left,
                x_right: x_left + slot - gap,
                y_top: plot_height - ratio * plot_height,
                y_bottom: plot_height,
            }
        })
        .collect()
}
