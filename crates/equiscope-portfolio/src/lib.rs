//! # Equiscope Portfolio
//!
//! Portfolio analytics over an equity price panel.
//!
//! This crate turns a ticker selection, weights and a date range into a
//! normalized NAV series, a benchmark comparison and risk/return metrics. It
//! also provides two strategy overlays and a market stress indicator.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: all calculations are stateless with explicit inputs
//! - **Validate first**: bad weights, ranges and windows are rejected before any computation
//! - **NaN for sparse data**: too little history yields `NaN`, never an error
//! - **Read-only panel**: nothing here mutates the shared price panel
//!
//! ## Quick Start
//!
//! ```rust
//! use equiscope_portfolio::prelude::*;
//! use chrono::NaiveDate;
//!
//! let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
//! let mut obs = Vec::new();
//! for (i, (a, b)) in [(100.0, 50.0), (110.0, 55.0), (121.0, 50.0)].iter().enumerate() {
//!     obs.push((d(2 + i as u32), Ticker::from("A"), *a));
//!     obs.push((d(2 + i as u32), Ticker::from("B"), *b));
//! }
//! let panel = PricePanel::from_observations(obs).unwrap().forward_filled();
//!
//! let allocation = Allocation::new([("A", 60.0), ("B", 40.0)]).unwrap();
//! let range = DateRange::new(d(1), d(31)).unwrap();
//! let report = compute_nav(&panel, &allocation, &range, None).unwrap();
//! assert_eq!(report.nav.values()[0], 1.0);
//!
//! let metrics = compute_metrics(&report.nav, &AnalyticsConfig::default()).unwrap();
//! assert!(metrics.max_drawdown <= 0.0);
//! ```
//!
//! ## Module Overview
//!
//! - [`analytics`] - Buy-and-hold NAV, metrics, drawdowns, benchmark comparison
//! - [`strategy`] - Monthly rebalancing and volatility targeting
//! - [`stress`] - Market stress indicator
//! - [`bucketing`] - Allocation by metadata attribute
//! - [`types`] - Allocation and configuration types

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod analytics;
pub mod bucketing;
pub mod error;
pub mod strategy;
pub mod stress;
pub mod types;

// Re-export error types at crate root
pub use error::{PortfolioError, PortfolioResult};

// Re-export main types
pub use types::{
    Allocation, AllocationBuilder, AllocationSlice, AnalyticsConfig, Position, StressParams,
    VolTargetParams,
};

pub use analytics::{
    compute_metrics, compute_nav, drawdown_series, HoldingPeriod, MetricRow, MetricsComparison,
    MetricsRecord, NavReport,
};

pub use strategy::{
    compute_rebalanced_nav, compute_vol_targeted_nav, RebalancedNav, VolTargetedNav,
};

pub use stress::{compute_stress, StressLevel, StressSeries, StressSnapshot};

pub use bucketing::{bucket_by_attribute, AttributeBucket, AttributeDistribution};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analytics::{
        compute_metrics, compute_nav, drawdown_series, MetricsComparison, MetricsRecord,
        NavReport,
    };
    pub use crate::bucketing::{bucket_by_attribute, AttributeDistribution};
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::strategy::{
        compute_rebalanced_nav, compute_vol_targeted_nav, RebalancedNav, VolTargetedNav,
    };
    pub use crate::stress::{compute_stress, StressLevel, StressSeries, StressSnapshot};
    pub use crate::types::{
        Allocation, AllocationBuilder, AnalyticsConfig, StressParams, VolTargetParams,
    };
    pub use equiscope_core::{DateRange, PricePanel, Ticker, TickerMetadata, TimeSeries};
}
