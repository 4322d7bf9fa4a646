//! Error types for the Equiscope core data model.
//!
//! Raised when a price panel, time series or date range is constructed
//! from inconsistent inputs.

use chrono::NaiveDate;
use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building or querying core data structures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Dates are not strictly increasing.
    #[error("Dates must be strictly increasing: {previous} is followed by {next}")]
    UnorderedDates {
        /// The earlier position's date.
        previous: NaiveDate,
        /// The date that broke the ordering.
        next: NaiveDate,
    },

    /// Two parallel vectors have different lengths.
    #[error("Length mismatch: {dates} dates vs {values} values")]
    LengthMismatch {
        /// Number of dates.
        dates: usize,
        /// Number of values.
        values: usize,
    },

    /// A ticker appears more than once in a panel header.
    #[error("Duplicate ticker in panel: {ticker}")]
    DuplicateTicker {
        /// The repeated ticker.
        ticker: String,
    },

    /// A ticker is not present in the panel.
    #[error("Unknown ticker: {ticker}")]
    UnknownTicker {
        /// The ticker that was requested.
        ticker: String,
    },

    /// Start of a range is not strictly before its end.
    #[error("Invalid date range: start {start} must be before end {end}")]
    InvalidDateRange {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },

    /// A date string could not be parsed.
    #[error("Invalid date: {value}")]
    InvalidDate {
        /// The offending input.
        value: String,
    },
}

impl CoreError {
    /// Creates an unknown ticker error.
    #[must_use]
    pub fn unknown_ticker(ticker: impl Into<String>) -> Self {
        Self::UnknownTicker {
            ticker: ticker.into(),
        }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::unknown_ticker("AAPL.OQ");
        assert!(err.to_string().contains("AAPL.OQ"));

        let err = CoreError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert!(err.to_string().contains("2024-03-01"));
    }
}
