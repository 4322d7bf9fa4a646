//! Error types for statistical operations.

use thiserror::Error;

/// A specialized Result type for mathematical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during mathematical operations.
///
/// Only structural problems are errors. Statistics that are merely undefined
/// for the data at hand (too few points, zero variance) come back as `NaN`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// A rolling window of zero observations was requested.
    #[error("Invalid window: {window} (must be at least {minimum})")]
    InvalidWindow {
        /// The requested window.
        window: usize,
        /// Smallest window the operation accepts.
        minimum: usize,
    },

    /// Insufficient data points for operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }
}
