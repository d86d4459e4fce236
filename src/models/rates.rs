//! Rate prediction payload models

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Aggregate key carrying the majority trend; never a series
pub const MAJORITY_TREND_KEY: &str = "majority_trend";
/// Aggregate key carrying the majority verdict text; never a series
pub const MAJORITY_MESSAGE_KEY: &str = "majority_message";

/// A single (timestamp, price) sample as sent by the prediction API
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatePoint {
    /// Seconds since the Unix epoch
    pub timestamp: i64,
    pub price: f64,
}

impl RatePoint {
    /// Parse the wire form `[timestamp, price]`.
    /// Fractional timestamps are truncated to whole seconds.
    pub fn from_value(value: &Value) -> Option<Self> {
        let pair = value.as_array()?;
        if pair.len() != 2 {
            return None;
        }

        let timestamp = match pair[0].as_i64() {
            Some(ts) => ts,
            None => {
                let ts = pair[0].as_f64()?;
                if !ts.is_finite() {
                    return None;
                }
                ts.trunc() as i64
            }
        };
        let price = pair[1].as_f64()?;

        Some(Self { timestamp, price })
    }

    /// Convert the epoch timestamp into a chart axis value
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.timestamp, 0)
    }
}

/// Forecast direction attached to a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trend {
    Uptrend,
    Downtrend,
    Neutral,
}

impl Trend {
    pub const ALL: [Trend; 3] = [Trend::Uptrend, Trend::Downtrend, Trend::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Uptrend => "uptrend",
            Trend::Downtrend => "downtrend",
            Trend::Neutral => "neutral",
        }
    }

    /// Title-cased name used on the summary chart
    pub fn display_name(&self) -> &'static str {
        match self {
            Trend::Uptrend => "Uptrend",
            Trend::Downtrend => "Downtrend",
            Trend::Neutral => "Neutral",
        }
    }
}

impl FromStr for Trend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uptrend" => Ok(Trend::Uptrend),
            "downtrend" => Ok(Trend::Downtrend),
            "neutral" => Ok(Trend::Neutral),
            other => Err(format!("unknown trend '{}'", other)),
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One model's output inside a rates response
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesResult {
    pub historical: Vec<RatePoint>,
    pub predicted: Vec<RatePoint>,
    pub trend: Trend,
    pub message: String,
}

/// Raw response of `POST /get-rates/`.
///
/// Kept as the JSON object so document key order drives series order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatesPayload {
    fields: Map<String, Value>,
}

impl RatesPayload {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Series entries in document order, aggregate keys skipped
    pub fn series(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields
            .iter()
            .filter(|(key, _)| !is_reserved_key(key))
    }

    /// Verdict text, passed through untouched. Absent reads as empty.
    pub fn majority_message(&self) -> String {
        self.fields
            .get(MAJORITY_MESSAGE_KEY)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    }

    pub fn majority_trend(&self) -> Option<Trend> {
        self.fields
            .get(MAJORITY_TREND_KEY)
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse().ok())
    }

    /// The older static page received one bare `{historical, predicted}` object
    pub fn is_single_series(&self) -> bool {
        self.fields.contains_key("historical") || self.fields.contains_key("predicted")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

pub fn is_reserved_key(key: &str) -> bool {
    key == MAJORITY_TREND_KEY || key == MAJORITY_MESSAGE_KEY
}
