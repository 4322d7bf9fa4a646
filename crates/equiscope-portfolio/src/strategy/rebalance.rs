//! Fixed-weight portfolio with daily return to target weights.

use crate::analytics::align;
use crate::types::{Allocation, FULL_WEIGHT};
use crate::PortfolioResult;
use chrono::{Datelike, NaiveDate};
use equiscope_core::{DateRange, PricePanel, TimeSeries};
use equiscope_math::returns::{compound, pct_change};
use serde::Serialize;
use tracing::debug;

/// Name given to rebalanced NAV series.
pub const REBALANCED_SERIES: &str = "Rebalanced";

/// NAV of a constant-weight portfolio plus its monthly rebalance markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RebalancedNav {
    /// NAV starting at 1.0.
    pub nav: TimeSeries,

    /// First aligned trading date on or after each month start inside the range.
    ///
    /// Markers only; the NAV holds target weights every day regardless.
    pub rebalance_dates: Vec<NaiveDate>,
}

/// Computes the NAV of a portfolio held at the target weights every day.
///
/// Uses the same aligned rows as [`compute_nav`](crate::analytics::compute_nav).
/// The daily portfolio return is `Σ wᵢ/100 × rᵢ,ₜ` and NAV compounds from 1.0.
pub fn compute_rebalanced_nav(
    panel: &PricePanel,
    allocation: &Allocation,
    range: &DateRange,
) -> PortfolioResult<RebalancedNav> {
    let aligned = align(panel, allocation, range)?;
    let weights = allocation.weights();

    let per_ticker: Vec<Vec<f64>> = (0..aligned.tickers().len())
        .map(|i| pct_change(aligned.column(i)))
        .collect();

    let portfolio_returns: Vec<f64> = (1..aligned.len())
        .map(|t| {
            weights
                .iter()
                .zip(&per_ticker)
                .map(|(w, r)| w / FULL_WEIGHT * r[t])
                .sum()
        })
        .collect();

    let nav = TimeSeries::new(
        REBALANCED_SERIES,
        aligned.dates().to_vec(),
        compound(1.0, &portfolio_returns),
    )?;
    let rebalance_dates = month_start_markers(aligned.dates(), range);

    debug!(
        rows = nav.len(),
        rebalances = rebalance_dates.len(),
        "computed rebalanced NAV"
    );

    Ok(RebalancedNav {
        nav,
        rebalance_dates,
    })
}

/// For every first-of-month inside `range`, the first of `dates` on or after it.
fn month_start_markers(dates: &[NaiveDate], range: &DateRange) -> Vec<NaiveDate> {
    let mut markers = Vec::new();
    let mut month = first_month_start_on_or_after(range.start());

    while let Some(m) = month.filter(|m| *m <= range.end()) {
        let idx = dates.partition_point(|d| *d < m);
        if let Some(&d) = dates.get(idx) {
            if markers.last() != Some(&d) {
                markers.push(d);
            }
        }
        month = next_month_start(m);
    }

    markers
}

fn first_month_start_on_or_after(date: NaiveDate) -> Option<NaiveDate> {
    if date.day() == 1 {
        Some(date)
    } else {
        next_month_start(date)
    }
}

fn next_month_start(date: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}
