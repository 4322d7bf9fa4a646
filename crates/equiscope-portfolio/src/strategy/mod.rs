//! Strategy overlays on top of the buy-and-hold portfolio.
//!
//! - Monthly rebalancing: constant target weights
//! - Volatility targeting: leverage scaled to a target annualized volatility

mod rebalance;
mod vol_target;

pub use rebalance::{compute_rebalanced_nav, RebalancedNav, REBALANCED_SERIES};
pub use vol_target::{compute_vol_targeted_nav, VolTargetedNav, VOL_TARGET_SERIES};
