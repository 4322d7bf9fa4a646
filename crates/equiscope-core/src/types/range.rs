//! Evaluation date ranges and date parsing.

use crate::error::{CoreError, CoreResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

/// An inclusive `[start, end]` date window with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `start >= end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> CoreResult<Self> {
        if start >= end {
            return Err(CoreError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range start (inclusive).
    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Range end (inclusive).
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if `date` lies within the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Calendar days between start and end.
    #[must_use]
    pub fn calendar_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses a calendar date from the formats found in vendor exports.
///
/// Accepts plain dates (`2024-01-31`), naive timestamps (`2024-01-31 00:00:00`)
/// and RFC 3339 timestamps (`2024-01-31T00:00:00Z`). Time components are dropped.
pub fn parse_date(value: &str) -> CoreResult<NaiveDate> {
    let s = value.trim();

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }

    Err(CoreError::invalid_date(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_range_validation() {
        assert!(DateRange::new(d(2024, 1, 1), d(2024, 12, 31)).is_ok());
        assert!(DateRange::new(d(2024, 1, 1), d(2024, 1, 1)).is_err());
        assert!(matches!(
            DateRange::new(d(2024, 2, 1), d(2024, 1, 1)),
            Err(CoreError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let r = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        assert!(r.contains(d(2024, 1, 1)));
        assert!(r.contains(d(2024, 1, 31)));
        assert!(!r.contains(d(2024, 2, 1)));
        assert_eq!(r.calendar_days(), 30);
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-01-31").unwrap(), d(2024, 1, 31));
        assert_eq!(parse_date("2024/01/31").unwrap(), d(2024, 1, 31));
        assert_eq!(parse_date("2024-01-31 00:00:00").unwrap(), d(2024, 1, 31));
        assert_eq!(parse_date("2024-01-31T16:00:00").unwrap(), d(2024, 1, 31));
        assert_eq!(parse_date("2024-01-31T00:00:00Z").unwrap(), d(2024, 1, 31));
        assert!(parse_date("31.01.2024").is_err());
    }
}
