//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Malformed `TICKER=WEIGHT` pair.
    #[error("Invalid weight: {0}. Use TICKER=WEIGHT, e.g. AAPL.OQ=40.")]
    InvalidWeight(String),

    /// Ticker not present in the loaded panel.
    #[error("Unknown ticker: {0}")]
    UnknownTicker(String),

    /// Missing required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
