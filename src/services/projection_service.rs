use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use crate::models::chart::{ChartDataset, Projection};
use crate::models::rates::{RatePoint, RatesPayload, SeriesResult, Trend};

/// Display names handed out to series by position
pub const DEFAULT_ALGORITHM_NAMES: [&str; 8] = [
    "Quantum Trend Analysis",
    "Neural Network Predictor",
    "Genetic Algorithm Forecast",
    "Stochastic Gradient Descent",
    "Bayesian Inference Model",
    "Support Vector Machine",
    "Random Forest Estimator",
    "Deep Learning Sequence",
];

/// Ways a rates payload can break the data contract
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("Rates payload is not a JSON object")]
    NotAnObject,
    #[error("Series '{series}' is not a JSON object")]
    MalformedSeries { series: String },
    #[error("Series '{series}' has unknown trend {value}")]
    UnknownTrend { series: String, value: String },
    #[error("No series labels configured")]
    NoLabels,
}

/// Wrap a decoded response body, rejecting anything but an object
pub fn payload_from_value(value: Value) -> Result<RatesPayload, ProjectionError> {
    match value {
        Value::Object(fields) => Ok(RatesPayload::new(fields)),
        _ => Err(ProjectionError::NotAnObject),
    }
}

/// Read one series entry. Missing point arrays degrade to empty; the trend must be known.
pub fn parse_series(series: &str, value: &Value) -> Result<SeriesResult, ProjectionError> {
    let fields = value.as_object().ok_or_else(|| ProjectionError::MalformedSeries {
        series: series.to_string(),
    })?;

    let historical = parse_points(series, "historical", fields.get("historical"));
    let predicted = parse_points(series, "predicted", fields.get("predicted"));

    let trend = match fields.get("trend") {
        Some(Value::String(s)) => s.parse::<Trend>().map_err(|_| ProjectionError::UnknownTrend {
            series: series.to_string(),
            value: format!("'{}'", s),
        })?,
        other => {
            return Err(ProjectionError::UnknownTrend {
                series: series.to_string(),
                value: other.map(|v| v.to_string()).unwrap_or_else(|| "(missing)".to_string()),
            })
        }
    };

    let message = fields
        .get("message")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    Ok(SeriesResult {
        historical,
        predicted,
        trend,
        message,
    })
}

/// Collect the `[timestamp, price]` pairs of one array, skipping unusable entries
fn parse_points(series: &str, field: &str, value: Option<&Value>) -> Vec<RatePoint> {
    let items = match value {
        None | Some(Value::Null) => {
            debug!("Series '{}' has no {} array, treating as empty", series, field);
            return Vec::new();
        }
        Some(Value::Array(items)) => items,
        Some(other) => {
            warn!("Series '{}' {} is not an array: {}", series, field, other);
            return Vec::new();
        }
    };

    let mut points = Vec::with_capacity(items.len());
    for item in items {
        match RatePoint::from_value(item) {
            Some(point) if point.time().is_some() => points.push(point),
            _ => warn!("Skipping malformed {} point in series '{}': {}", field, series, item),
        }
    }
    points
}

/// Lay historical then predicted points on one axis.
/// The predicted trace is padded with `None` across the historical range.
pub fn build_dataset(historical: &[RatePoint], predicted: &[RatePoint]) -> ChartDataset {
    let mut axis = Vec::with_capacity(historical.len() + predicted.len());
    let mut historical_trace = Vec::with_capacity(historical.len());

    for point in historical {
        if let Some(time) = point.time() {
            axis.push(time);
            historical_trace.push(point.price);
        }
    }

    let mut predicted_trace = vec![None; historical_trace.len()];
    for point in predicted {
        if let Some(time) = point.time() {
            axis.push(time);
            predicted_trace.push(Some(point.price));
        }
    }

    ChartDataset {
        axis,
        historical: historical_trace,
        predicted: predicted_trace,
    }
}

/// Turn a multi-series rates payload into labelled datasets, messages and a trend tally.
///
/// Series get `labels[index % labels.len()]` in document order. When labels repeat, the
/// later series replaces the earlier one under that label.
pub fn project<S: AsRef<str>>(
    payload: &RatesPayload,
    labels: &[S],
) -> Result<Projection, ProjectionError> {
    if labels.is_empty() {
        return Err(ProjectionError::NoLabels);
    }

    let mut projection = Projection {
        majority_message: payload.majority_message(),
        majority_trend: payload.majority_trend(),
        ..Projection::default()
    };

    for (index, (key, value)) in payload.series().enumerate() {
        let series = parse_series(key, value)?;
        let label = labels[index % labels.len()].as_ref();

        if projection.datasets.get(label).is_some() {
            debug!("Label '{}' reused by series '{}', replacing earlier entry", label, key);
        }

        projection
            .datasets
            .insert(label.to_string(), build_dataset(&series.historical, &series.predicted));
        projection.messages.insert(label.to_string(), series.message);
        projection.tally.record(series.trend);
    }

    debug!(
        "Projected {} series into {} charts (up {}, down {}, neutral {})",
        projection.tally.total(),
        projection.datasets.len(),
        projection.tally.uptrend,
        projection.tally.downtrend,
        projection.tally.neutral
    );

    Ok(projection)
}

/// Project the bare `{historical, predicted}` shape.
///
/// The last historical point is repeated at the head of the predicted run so the two
/// lines join on the chart.
pub fn project_single(payload: &RatesPayload) -> ChartDataset {
    let historical = parse_points("(single)", "historical", payload.get("historical"));
    let mut predicted = parse_points("(single)", "predicted", payload.get("predicted"));

    if let Some(last) = historical.last() {
        predicted.insert(0, *last);
    }

    build_dataset(&historical, &predicted)
}
