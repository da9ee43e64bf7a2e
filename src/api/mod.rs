//! Page-facing composition: typed service payloads and chart frame assembly.

mod chart_frame_builder;
mod contract;
mod upload;

pub use chart_frame_builder::{ChartFrameBuilder, ChartTheme, MatrixHeaders};
pub use contract::{
    ComparisonRow, FORECAST_ENDPOINT, ForecastPoint, ForecastResponse, METRICS_SUMMARY_ENDPOINT,
    Metric, MetricsSummary, ModelComparison, ModelMetrics, RankedLabel,
    metrics_summary_from_json_str, parse_timestamp,
};
pub use upload::{
    UPLOAD_FIELD_NAME, UPLOAD_PREVIEW_CHARS, UploadFormat, upload_preview, upload_progress_percent,
};
