use lazy_static::lazy_static;
use std::collections::HashMap;
use crate::models::interval::{TimeUnit, ViewKind};

lazy_static! {
    /// Interval phrases offered by the interactive view
    static ref PHRASE_UNITS: HashMap<&'static str, TimeUnit> = HashMap::from([
        ("Within 2 days", TimeUnit::Minute),
        ("Within 2-4 days", TimeUnit::Minute),
        ("Within 4-7 days", TimeUnit::Minute),
        ("Within 1-2 Week", TimeUnit::Minute),
        ("Within 2-3 Week", TimeUnit::Hour),
        ("Within 1 Month", TimeUnit::Hour),
        ("Within 2 Months", TimeUnit::Day),
        ("Within 4 Months", TimeUnit::Week),
        ("Within 4-12 Months", TimeUnit::Month),
    ]);

    /// Minute-count interval values offered by the static view
    static ref MINUTE_UNITS: HashMap<&'static str, TimeUnit> = HashMap::from([
        ("1", TimeUnit::Minute),
        ("5", TimeUnit::Minute),
        ("15", TimeUnit::Minute),
        ("30", TimeUnit::Minute),
        ("60", TimeUnit::Hour),
        ("240", TimeUnit::Hour),
        ("1440", TimeUnit::Day),
        ("10080", TimeUnit::Week),
        ("43200", TimeUnit::Month),
    ]);
}

pub const PHRASE_FALLBACK: TimeUnit = TimeUnit::Day;
pub const MINUTES_FALLBACK: TimeUnit = TimeUnit::Minute;

/// Map an interactive interval phrase such as "Within 2 days" to an axis unit.
/// Unknown phrases fall back to days.
pub fn time_unit_for_phrase(phrase: &str) -> TimeUnit {
    match PHRASE_UNITS.get(phrase) {
        Some(unit) => *unit,
        None => {
            tracing::debug!("Unrecognized interval phrase '{}', using {}", phrase, PHRASE_FALLBACK);
            PHRASE_FALLBACK
        }
    }
}

/// Map a static-view minute count such as "1440" to an axis unit.
/// Unknown values fall back to minutes.
pub fn time_unit_for_minutes(minutes: &str) -> TimeUnit {
    match MINUTE_UNITS.get(minutes) {
        Some(unit) => *unit,
        None => {
            tracing::debug!("Unrecognized interval value '{}', using {}", minutes, MINUTES_FALLBACK);
            MINUTES_FALLBACK
        }
    }
}

/// Pick the table matching the running view
pub fn time_unit_for(view: ViewKind, descriptor: &str) -> TimeUnit {
    match view {
        ViewKind::Interactive => time_unit_for_phrase(descriptor),
        ViewKind::Static => time_unit_for_minutes(descriptor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_table() {
        let cases = [
            ("Within 2 days", TimeUnit::Minute),
            ("Within 2-4 days", TimeUnit::Minute),
            ("Within 4-7 days", TimeUnit::Minute),
            ("Within 1-2 Week", TimeUnit::Minute),
            ("Within 2-3 Week", TimeUnit::Hour),
            ("Within 1 Month", TimeUnit::Hour),
            ("Within 2 Months", TimeUnit::Day),
            ("Within 4 Months", TimeUnit::Week),
            ("Within 4-12 Months", TimeUnit::Month),
        ];
        for (phrase, unit) in cases {
            assert_eq!(time_unit_for_phrase(phrase), unit, "phrase {}", phrase);
        }
    }

    #[test]
    fn test_minute_table() {
        let cases = [
            ("1", TimeUnit::Minute),
            ("5", TimeUnit::Minute),
            ("15", TimeUnit::Minute),
            ("30", TimeUnit::Minute),
            ("60", TimeUnit::Hour),
            ("240", TimeUnit::Hour),
            ("1440", TimeUnit::Day),
            ("10080", TimeUnit::Week),
            ("43200", TimeUnit::Month),
        ];
        for (minutes, unit) in cases {
            assert_eq!(time_unit_for_minutes(minutes), unit, "minutes {}", minutes);
        }
    }

    #[test]
    fn test_unrecognized_interval_falls_back() {
        assert_eq!(time_unit_for_phrase("Within 3 years"), TimeUnit::Day);
        assert_eq!(time_unit_for_phrase(""), TimeUnit::Day);
        assert_eq!(time_unit_for_minutes("7"), TimeUnit::Minute);
        assert_eq!(time_unit_for_minutes("within 2 days"), TimeUnit::Minute);
    }

    #[test]
    fn test_dispatch_by_view() {
        assert_eq!(time_unit_for(ViewKind::Interactive, "Within 4 Months"), TimeUnit::Week);
        assert_eq!(time_unit_for(ViewKind::Static, "10080"), TimeUnit::Week);
        assert_eq!(time_unit_for(ViewKind::Interactive, "1440"), TimeUnit::Day);
        assert_eq!(time_unit_for(ViewKind::Static, "Within 4 Months"), TimeUnit::Minute);
    }
}
