//! Core types for portfolio analytics.
//!
//! - [`Allocation`]: validated ticker weights plus implied cash
//! - [`AnalyticsConfig`], [`StressParams`], [`VolTargetParams`]: computation settings

mod allocation;
mod config;

pub use allocation::{
    Allocation, AllocationBuilder, AllocationSlice, Position, CASH_LABEL, FULL_WEIGHT,
    WEIGHT_TOLERANCE,
};
pub use config::{
    AnalyticsConfig, StressParams, VolTargetParams, DAYS_PER_YEAR, DEFAULT_BENCHMARK,
    TRADING_DAYS_PER_YEAR,
};
