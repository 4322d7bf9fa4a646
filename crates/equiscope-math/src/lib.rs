//! # Equiscope Math
//!
//! Numerical building blocks for the Equiscope equity analytics toolkit.
//!
//! This crate provides:
//!
//! - **Statistics**: mean, sample variance/standard deviation, percentile rank
//! - **Returns**: percentage change, compounding, running peaks and drawdowns
//! - **Rolling windows**: trailing mean, standard deviation and percentile rank
//!
//! ## Design Philosophy
//!
//! - **Slices in, vectors out**: no dates, no domain types
//! - **NaN means undefined**: warm-up periods and degenerate inputs produce `NaN`
//!   so callers can render "N/A" instead of failing the whole computation
//! - **Errors for misuse only**: invalid window sizes are errors, sparse data is not

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod returns;
pub mod rolling;
pub mod stats;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::returns::{compound, drawdowns, max_drawdown, pct_change, running_max};
    pub use crate::rolling::{
        first_defined, rolling_apply, rolling_mean, rolling_percentile_rank, rolling_std,
    };
    pub use crate::stats::{clip, mean, percentile_rank, sample_std, sample_variance};
}

pub use error::{MathError, MathResult};
