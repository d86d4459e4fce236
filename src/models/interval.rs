//! Interval and chart time-unit models

use chrono::Duration;
use std::fmt;
use std::str::FromStr;

/// Granularity of a chart's time axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

impl TimeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Minute => "minute",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
            TimeUnit::Week => "week",
            TimeUnit::Month => "month",
        }
    }

    /// strftime pattern for axis tick labels
    pub fn label_format(&self) -> &'static str {
        match self {
            TimeUnit::Minute => "%H:%M",
            TimeUnit::Hour => "%b %-d, %H:%M",
            TimeUnit::Day | TimeUnit::Week => "%b %-d",
            TimeUnit::Month => "%b %Y",
        }
    }

    /// One step of this unit; months count as 30 days
    pub fn step(&self) -> Duration {
        match self {
            TimeUnit::Minute => Duration::minutes(1),
            TimeUnit::Hour => Duration::hours(1),
            TimeUnit::Day => Duration::days(1),
            TimeUnit::Week => Duration::weeks(1),
            TimeUnit::Month => Duration::days(30),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which client flavour is running.
///
/// `Interactive` picks pairs from the built-in catalog and sends interval phrases;
/// `Static` picks tickers from the API and sends interval option values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewKind {
    #[default]
    Interactive,
    Static,
}

impl FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "interactive" => Ok(ViewKind::Interactive),
            "static" => Ok(ViewKind::Static),
            other => Err(format!("unknown view '{}', expected interactive or static", other)),
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Interactive => f.write_str("interactive"),
            ViewKind::Static => f.write_str("static"),
        }
    }
}

/// One entry of the `intervals` mapping from `GET /get-options/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalOption {
    pub label: String,
    pub value: String,
}
