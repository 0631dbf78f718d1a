//! Show start times: parsing, ISO output, and the derived past/upcoming split.
//!
//! Start times are naive wall-clock timestamps. A show is never stored with a
//! status; it is past or upcoming only relative to the moment of the query.

use chrono::{Local, NaiveDateTime};

const INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowTiming {
    Past,
    /// Starts exactly at the query instant; counted as neither past nor upcoming.
    Starting,
    Upcoming,
}

impl ShowTiming {
    pub fn classify(start_time: NaiveDateTime, now: NaiveDateTime) -> Self {
        match start_time.cmp(&now) {
            std::cmp::Ordering::Less => Self::Past,
            std::cmp::Ordering::Equal => Self::Starting,
            std::cmp::Ordering::Greater => Self::Upcoming,
        }
    }
}

/// The instant shows are compared against.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn parse_start_time(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
}

/// ISO-8601 without offset, fractional seconds only when present.
pub fn format_start_time(start_time: &NaiveDateTime) -> String {
    start_time.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2035, 4, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn parses_form_and_html_inputs() {
        assert_eq!(parse_start_time("2035-04-01 20:00:00"), Some(at(20, 0)));
        assert_eq!(parse_start_time("2035-04-01T20:00"), Some(at(20, 0)));
        assert_eq!(parse_start_time(" 2035-04-01 20:30 "), Some(at(20, 30)));
        assert_eq!(parse_start_time("tomorrow"), None);
        assert_eq!(parse_start_time(""), None);
    }

    #[test]
    fn formats_iso() {
        assert_eq!(format_start_time(&at(21, 30)), "2035-04-01T21:30:00");
    }

    #[test]
    fn classification_is_strict_on_both_sides() {
        let now = at(12, 0);
        assert_eq!(ShowTiming::classify(at(11, 59), now), ShowTiming::Past);
        assert_eq!(ShowTiming::classify(at(12, 0), now), ShowTiming::Starting);
        assert_eq!(ShowTiming::classify(at(12, 1), now), ShowTiming::Upcoming);
    }
}
