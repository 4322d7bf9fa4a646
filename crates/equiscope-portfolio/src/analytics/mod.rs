//! Portfolio-level analytics.
//!
//! This module provides:
//! - Buy-and-hold NAV with cash and benchmark alignment
//! - Risk/return metrics for any NAV series
//! - Drawdown curves and portfolio-vs-benchmark comparison
//!
//! All functions are pure - they take the panel, allocation and configuration
//! as input and return computed results. No caching, no I/O, no side effects.

mod metrics;
mod nav;

pub(crate) use nav::align;

pub use metrics::{
    compute_metrics, drawdown_series, HoldingPeriod, MetricRow, MetricsComparison, MetricsRecord,
};
pub use nav::{compute_nav, NavReport, PORTFOLIO_SERIES};
