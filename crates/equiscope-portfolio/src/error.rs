//! Error types for portfolio analytics.
//!
//! Validation problems are reported before any computation starts. Sparse data
//! is not an error; it shows up as `NaN` in the results.

use equiscope_core::CoreError;
use equiscope_math::MathError;
use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// No tickers were selected.
    #[error("No tickers selected")]
    EmptySelection,

    /// No rows survived alignment.
    #[error("No price data available: {reason}")]
    NoData {
        /// Why nothing was left.
        reason: String,
    },

    /// A weight is negative or not finite.
    #[error("Invalid weight for '{ticker}': {value}")]
    InvalidWeight {
        /// The ticker carrying the weight.
        ticker: String,
        /// The rejected weight.
        value: f64,
    },

    /// A ticker appears twice in an allocation.
    #[error("Ticker '{ticker}' appears more than once in the allocation")]
    DuplicateTicker {
        /// The repeated ticker.
        ticker: String,
    },

    /// Weights add up to more than 100%.
    #[error("Weights sum to {total:.4}%, which exceeds 100%")]
    WeightsExceedTotal {
        /// Sum of the weights in percent.
        total: f64,
    },

    /// A configuration parameter is out of range.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// An operation that needs at least one observation got none.
    #[error("Series '{name}' is empty")]
    EmptySeries {
        /// Name of the series.
        name: String,
    },

    /// Error from the core data model (unknown ticker, bad range, ...).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Error from a statistical routine.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl PortfolioError {
    /// Create a no data error.
    #[must_use]
    pub fn no_data(reason: impl Into<String>) -> Self {
        Self::NoData {
            reason: reason.into(),
        }
    }

    /// Create an invalid weight error.
    #[must_use]
    pub fn invalid_weight(ticker: impl Into<String>, value: f64) -> Self {
        Self::InvalidWeight {
            ticker: ticker.into(),
            value,
        }
    }

    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an empty series error.
    #[must_use]
    pub fn empty_series(name: impl Into<String>) -> Self {
        Self::EmptySeries { name: name.into() }
    }

    /// Returns true for errors caused by caller input rather than data.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptySelection
                | Self::InvalidWeight { .. }
                | Self::DuplicateTicker { .. }
                | Self::WeightsExceedTotal { .. }
                | Self::InvalidParameter { .. }
                | Self::Core(CoreError::InvalidDateRange { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PortfolioError::WeightsExceedTotal { total: 120.0 };
        assert!(err.to_string().contains("120.0000%"));

        let err = PortfolioError::invalid_weight("AAPL.OQ", -5.0);
        assert!(err.to_string().contains("AAPL.OQ"));
        assert!(err.to_string().contains("-5"));

        let err: PortfolioError = CoreError::unknown_ticker("ZZZ").into();
        assert_eq!(err.to_string(), "Unknown ticker: ZZZ");
    }

    #[test]
    fn test_is_validation() {
        assert!(PortfolioError::EmptySelection.is_validation());
        assert!(PortfolioError::invalid_parameter("lookback", "must be >= 2").is_validation());
        assert!(!PortfolioError::no_data("empty window").is_validation());
        assert!(!PortfolioError::empty_series("nav").is_validation());
    }
}
