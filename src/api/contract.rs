use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::core::ValueRange;
use crate::error::{ChartError, ChartResult};

pub const FORECAST_ENDPOINT: &str = "/forecast";
pub const METRICS_SUMMARY_ENDPOINT: &str = "/metrics/summary";

/// One ranked outcome of a forecast (`{ "label": .., "prob": .. }` on the wire).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedLabel {
    #[serde(default)]
    pub label: String,
    #[serde(default, rename = "prob")]
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// `None` when the service sent no timestamp or one that does not parse.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    pub value: f64,
}

/// Parses a service timestamp.
///
/// Accepts RFC 3339, then an offset-less date-time or a bare date, both read
/// as UTC. Anything else yields `None`.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Some(naive.and_utc());
    }
    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).and_then(parse_timestamp))
}

/// Forecast service response. Every field is optional; unknown fields are
/// kept in `extra` so the page can still display them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// In `[0, 1]` when present; not validated here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inference_ms: Option<f64>,
    /// Unparseable timestamps are dropped rather than failing the response.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, rename = "topK", skip_serializing_if = "Vec::is_empty")]
    pub top_k: Vec<RankedLabel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub forecast: Vec<ForecastPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<ModelMetrics>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ForecastResponse {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse forecast response: {e}"))
        })
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize forecast response: {e}"))
        })
    }

    /// Forecast values in timestamp order, ready for line projection.
    ///
    /// Points without a usable timestamp come first, in payload order.
    #[must_use]
    pub fn forecast_values(&self) -> Vec<f64> {
        let mut points: Vec<&ForecastPoint> = self.forecast.iter().collect();
        points.sort_by_key(|point| point.timestamp);
        points.into_iter().map(|point| point.value).collect()
    }

    /// Confidence as a whole percentage, e.g. `0.85 -> 85`.
    #[must_use]
    pub fn confidence_percent(&self) -> Option<f64> {
        self.confidence.map(|c| (c * 100.0).round())
    }

    /// Timestamp as `dd/mm/yyyy hh:mm:ss` in UTC.
    #[must_use]
    pub fn formatted_timestamp(&self) -> Option<String> {
        self.timestamp
            .map(|ts| ts.format("%d/%m/%Y %H:%M:%S").to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mae: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rmse: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mape: Option<f64>,
}

/// Model name to metrics, in the order the service returned them.
pub type MetricsSummary = IndexMap<String, ModelMetrics>;

pub fn metrics_summary_from_json_str(input: &str) -> ChartResult<MetricsSummary> {
    serde_json::from_str(input)
        .map_err(|e| ChartError::InvalidData(format!("failed to parse metrics summary: {e}")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    Mae,
    Rmse,
    Mape,
}

impl Metric {
    pub const ALL: [Self; 3] = [Self::Mae, Self::Rmse, Self::Mape];

    #[must_use]
    pub fn of(self, metrics: ModelMetrics) -> Option<f64> {
        match self {
            Self::Mae => metrics.mae,
            Self::Rmse => metrics.rmse,
            Self::Mape => metrics.mape,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub model: String,
    pub metrics: ModelMetrics,
}

/// Comparison table rows plus the best (lowest) value of each error metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelComparison {
    pub rows: Vec<ComparisonRow>,
    pub best: ModelMetrics,
}

impl ModelComparison {
    #[must_use]
    pub fn from_summary(summary: &MetricsSummary) -> Self {
        let rows: Vec<ComparisonRow> = summary
            .iter()
            .map(|(model, metrics)| ComparisonRow {
                model: model.clone(),
                metrics: *metrics,
            })
            .collect();

        let best_of = |metric: Metric| {
            let values: Vec<f64> = rows.iter().filter_map(|row| metric.of(row.metrics)).collect();
            ValueRange::from_values(&values).map(ValueRange::min)
        };
        let best = ModelMetrics {
            mae: best_of(Metric::Mae),
            rmse: best_of(Metric::Rmse),
            mape: best_of(Metric::Mape),
        };

        Self { rows, best }
    }

    /// Whether `model` holds the best value for `metric`.
    #[must_use]
    pub fn is_best(&self, model: &str, metric: Metric) -> bool {
        let Some(best) = metric.of(self.best) else {
            return false;
        };
        self.rows
            .iter()
            .find(|row| row.model == model)
            .and_then(|row| metric.of(row.metrics))
            .is_some_and(|value| value == best)
    }
}
