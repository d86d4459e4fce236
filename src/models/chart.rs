//! Chart generation models

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use crate::models::rates::Trend;

pub const HISTORICAL_TRACE: &str = "Historical Prices";
pub const PREDICTED_TRACE: &str = "Predicted Prices";

/// Display-ready data for one series: a shared time axis and two traces on it
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDataset {
    pub axis: Vec<DateTime<Utc>>,
    /// Historical prices; covers axis positions `[0, historical.len())`
    pub historical: Vec<f64>,
    /// Same length as `axis`; `None` across the historical range
    pub predicted: Vec<Option<f64>>,
}

impl ChartDataset {
    /// Points of the historical trace paired with their axis value
    pub fn historical_points(&self) -> Vec<(DateTime<Utc>, f64)> {
        self.axis
            .iter()
            .zip(self.historical.iter())
            .map(|(t, v)| (*t, *v))
            .collect()
    }

    /// Points of the predicted trace, gaps dropped
    pub fn predicted_points(&self) -> Vec<(DateTime<Utc>, f64)> {
        self.axis
            .iter()
            .zip(self.predicted.iter())
            .filter_map(|(t, v)| v.map(|v| (*t, v)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.axis.is_empty()
    }
}

/// Number of series per trend category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrendTally {
    pub uptrend: usize,
    pub downtrend: usize,
    pub neutral: usize,
}

impl TrendTally {
    pub fn record(&mut self, trend: Trend) {
        match trend {
            Trend::Uptrend => self.uptrend += 1,
            Trend::Downtrend => self.downtrend += 1,
            Trend::Neutral => self.neutral += 1,
        }
    }

    pub fn count(&self, trend: Trend) -> usize {
        match trend {
            Trend::Uptrend => self.uptrend,
            Trend::Downtrend => self.downtrend,
            Trend::Neutral => self.neutral,
        }
    }

    pub fn total(&self) -> usize {
        self.uptrend + self.downtrend + self.neutral
    }
}

/// Everything a view needs to render one rates response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    /// Keyed by label in first-use order; a reused label keeps its slot
    pub datasets: IndexMap<String, ChartDataset>,
    pub messages: IndexMap<String, String>,
    pub tally: TrendTally,
    pub majority_message: String,
    pub majority_trend: Option<Trend>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_records_each_bucket() {
        let mut tally = TrendTally::default();
        tally.record(Trend::Uptrend);
        tally.record(Trend::Uptrend);
        tally.record(Trend::Neutral);

        assert_eq!(tally.count(Trend::Uptrend), 2);
        assert_eq!(tally.count(Trend::Downtrend), 0);
        assert_eq!(tally.total(), 3);
    }
}
