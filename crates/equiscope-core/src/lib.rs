//! # Equiscope Core
//!
//! Core data model for the Equiscope equity analytics toolkit.
//!
//! This crate provides the immutable inputs every analytic is computed from:
//!
//! - **Price panel**: daily close prices indexed by date, one column per ticker
//! - **Time series**: named, strictly ordered `(date, value)` sequences
//! - **Ticker metadata**: open-ended descriptive attributes per ticker
//! - **Date ranges**: validated inclusive evaluation windows
//!
//! ## Design Philosophy
//!
//! - **Immutable after construction**: panels are validated once and shared read-only
//! - **NaN means missing**: absent prices are `NaN`, never zero
//! - **Validated constructors**: ordering and shape invariants are checked up front
//!
//! ## Example
//!
//! ```rust
//! use equiscope_core::prelude::*;
//! use chrono::NaiveDate;
//!
//! let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
//! let panel = PricePanel::from_observations(vec![
//!     (d(2), Ticker::from("SPY"), 470.0),
//!     (d(3), Ticker::from("SPY"), 468.8),
//! ])
//! .unwrap()
//! .forward_filled();
//!
//! let spy = panel.series("SPY").unwrap();
//! assert_eq!(spy.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{
        parse_date, AlignedPrices, Attributes, DateRange, PricePanel, Ticker, TickerMetadata,
        TimeSeries,
    };
}

pub use error::{CoreError, CoreResult};
pub use types::{
    parse_date, AlignedPrices, DateRange, PricePanel, Ticker, TickerMetadata, TimeSeries,
};
