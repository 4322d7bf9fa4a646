//! Error types for data loading.

use equiscope_core::CoreError;
use thiserror::Error;

/// A specialized Result type for data loading.
pub type DataResult<T> = Result<T, DataError>;

/// Errors raised while reading price or metadata sources.
#[derive(Debug, Clone, Error)]
pub enum DataError {
    /// File could not be opened or read.
    #[error("IO error reading {path}: {message}")]
    Io {
        /// Path being read.
        path: String,
        /// Underlying error message.
        message: String,
    },

    /// A record could not be parsed.
    #[error("parse error in {path}: {message}")]
    Parse {
        /// Path being read.
        path: String,
        /// Underlying error message.
        message: String,
    },

    /// A required column is absent from the header row.
    #[error("{path} is missing required column '{column}'")]
    MissingColumn {
        /// Path being read.
        path: String,
        /// Name of the missing column.
        column: String,
    },

    /// The source yielded no usable price rows.
    #[error("no price data in {0}")]
    Empty(String),

    /// The loaded observations violate a panel invariant.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl DataError {
    /// Creates an IO error.
    #[must_use]
    pub fn io(path: impl Into<String>, err: impl ToString) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(path: impl Into<String>, err: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Creates a missing column error.
    #[must_use]
    pub fn missing_column(path: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            path: path.into(),
            column: column.into(),
        }
    }
}

/// Maps a `csv` error to [`DataError::Io`] or [`DataError::Parse`].
pub(crate) fn from_csv(path: &str, err: &csv::Error) -> DataError {
    if err.is_io_error() {
        DataError::io(path, err)
    } else {
        DataError::parse(path, err)
    }
}
