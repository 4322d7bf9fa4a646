//! Buy-and-hold NAV and benchmark alignment.
//!
//! The portfolio is bought on the first aligned date at the target weights and
//! never traded again. Cash earns nothing.

use crate::types::{Allocation, FULL_WEIGHT};
use crate::{PortfolioError, PortfolioResult};
use equiscope_core::{AlignedPrices, DateRange, PricePanel, Ticker, TimeSeries};
use serde::Serialize;
use tracing::{debug, warn};

/// Name given to portfolio NAV series.
pub const PORTFOLIO_SERIES: &str = "Portfolio";

/// Buy-and-hold result for one allocation over one range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavReport {
    /// Portfolio NAV, starting at exactly 1.0.
    pub nav: TimeSeries,

    /// Rebased benchmark joined to the NAV dates, if a benchmark was requested
    /// and has data in the window.
    pub benchmark: Option<TimeSeries>,

    /// Allocation the NAV was computed for.
    pub allocation: Allocation,

    /// Requested evaluation window.
    pub range: DateRange,
}

impl NavReport {
    /// Daily portfolio returns (first date dropped).
    #[must_use]
    pub fn daily_returns(&self) -> TimeSeries {
        self.nav.pct_change()
    }
}

/// Restricts the panel to the allocation's tickers and the range, dropping
/// every row where any selected ticker is missing.
pub(crate) fn align(
    panel: &PricePanel,
    allocation: &Allocation,
    range: &DateRange,
) -> PortfolioResult<AlignedPrices> {
    if allocation.is_empty() {
        return Err(PortfolioError::EmptySelection);
    }
    let aligned = panel.aligned(&allocation.tickers(), range)?;
    if aligned.is_empty() {
        return Err(PortfolioError::no_data(format!(
            "no date in {range} has prices for all selected tickers"
        )));
    }
    Ok(aligned)
}

/// Computes the buy-and-hold NAV of `allocation` over `range`.
///
/// `NAV(t) = 1 + Σ wᵢ/100 × (normᵢ(t) − 1)`, where `normᵢ` is the ticker's
/// price divided by its price on the first aligned date. This equals
/// `Σ wᵢ/100 × normᵢ(t) + cash/100` and starts at exactly 1.0.
///
/// When `benchmark` is given, its column is restricted to
/// `[first NAV date, range end]`, missing values dropped, rebased to 1.0 at
/// its first remaining date and inner-joined to the NAV dates.
///
/// # Errors
///
/// - [`PortfolioError::EmptySelection`] if the allocation has no tickers
/// - [`PortfolioError::Core`] for unknown tickers (portfolio or benchmark)
/// - [`PortfolioError::NoData`] if no row survives alignment
pub fn compute_nav(
    panel: &PricePanel,
    allocation: &Allocation,
    range: &DateRange,
    benchmark: Option<&Ticker>,
) -> PortfolioResult<NavReport> {
    let aligned = align(panel, allocation, range)?;
    let normalized = aligned.normalized();
    let weights: Vec<f64> = allocation
        .weights()
        .into_iter()
        .map(|w| w / FULL_WEIGHT)
        .collect();

    let values: Vec<f64> = (0..aligned.len())
        .map(|t| {
            let excess: f64 = weights
                .iter()
                .zip(&normalized)
                .map(|(w, col)| w * (col[t] - 1.0))
                .sum();
            1.0 + excess
        })
        .collect();

    let nav = TimeSeries::new(PORTFOLIO_SERIES, aligned.dates().to_vec(), values)?;

    let benchmark = match benchmark {
        Some(ticker) => align_benchmark(panel, ticker, &nav, range)?,
        None => None,
    };

    debug!(
        tickers = allocation.len(),
        cash = allocation.cash_weight(),
        rows = nav.len(),
        benchmark_rows = benchmark.as_ref().map_or(0, TimeSeries::len),
        "computed buy-and-hold NAV"
    );

    Ok(NavReport {
        nav,
        benchmark,
        allocation: allocation.clone(),
        range: *range,
    })
}

fn align_benchmark(
    panel: &PricePanel,
    ticker: &Ticker,
    nav: &TimeSeries,
    range: &DateRange,
) -> PortfolioResult<Option<TimeSeries>> {
    let Some((first, _)) = nav.first() else {
        return Ok(None);
    };

    let rebased = panel
        .series(ticker.as_str())?
        .since(first)
        .restrict(range)
        .rebased();

    if rebased.is_empty() {
        warn!(benchmark = %ticker, %range, "benchmark has no prices in the evaluation window");
        return Ok(None);
    }

    let joined = rebased.inner_join(nav);
    let series = TimeSeries::from_pairs(ticker.as_str(), joined.into_iter().map(|(d, b, _)| (d, b)))?;
    Ok(Some(series))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn panel() -> PricePanel {
        let a = [100.0, 110.0, 121.0, 110.0, 100.0];
        let b = [50.0, 55.0, 50.0, 45.0, 50.0];
        let spy = [400.0, 404.0, 408.0, 412.0, 416.0];
        let mut obs = Vec::new();
        for i in 0..5 {
            let day = d(2 + i as u32);
            obs.push((day, Ticker::from("A"), a[i]));
            obs.push((day, Ticker::from("B"), b[i]));
            obs.push((day, Ticker::from("SPY"), spy[i]));
        }
        PricePanel::from_observations(obs).unwrap()
    }

    fn range() -> DateRange {
        DateRange::new(d(1), d(31)).unwrap()
    }

    #[test]
    fn test_sixty_forty() {
        let alloc = Allocation::new([("A", 60.0), ("B", 40.0)]).unwrap();
        let report = compute_nav(&panel(), &alloc, &range(), None).unwrap();
        let v = report.nav.values();
        assert_eq!(v[0], 1.0);
        assert_relative_eq!(v[1], 1.10, epsilon = 1e-12);
        assert_relative_eq!(v[2], 0.6 * 1.21 + 0.4 * 1.0, epsilon = 1e-12);
        assert_relative_eq!(v[3], 0.6 * 1.10 + 0.4 * 0.9, epsilon = 1e-12);
        assert_relative_eq!(v[4], 1.0, epsilon = 1e-12);
        assert!(report.benchmark.is_none());
    }

    #[test]
    fn test_cash_dampens() {
        let alloc = Allocation::new([("A", 50.0)]).unwrap();
        let report = compute_nav(&panel(), &alloc, &range(), None).unwrap();
        assert_relative_eq!(report.nav.values()[2], 0.5 * 1.21 + 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_all_cash_is_flat() {
        let alloc = Allocation::new([("A", 0.0), ("B", 0.0)]).unwrap();
        let report = compute_nav(&panel(), &alloc, &range(), None).unwrap();
        assert!(report.nav.values().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_benchmark_rebased() {
        let alloc = Allocation::new([("A", 100.0)]).unwrap();
        let spy = Ticker::from("SPY");
        let r = DateRange::new(d(3), d(31)).unwrap();
        let report = compute_nav(&panel(), &alloc, &r, Some(&spy)).unwrap();
        let bench = report.benchmark.unwrap();
        assert_eq!(bench.name(), "SPY");
        assert_eq!(bench.dates(), report.nav.dates());
        assert_eq!(bench.values()[0], 1.0);
        assert_relative_eq!(bench.values()[1], 408.0 / 404.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_price_row_skipped() {
        let panel = PricePanel::new(
            vec![d(2), d(3), d(4)],
            vec![Ticker::from("A")],
            vec![vec![0.0, 1.0, 1.5]],
        )
        .unwrap();
        let alloc = Allocation::new([("A", 50.0)]).unwrap();
        let report = compute_nav(&panel, &alloc, &range(), None).unwrap();
        assert_eq!(report.nav.dates(), &[d(3), d(4)]);
        assert_eq!(report.nav.values()[0], 1.0);
        assert_relative_eq!(report.nav.values()[1], 1.25, epsilon = 1e-12);
    }

    #[test]
    fn test_errors() {
        let empty = Allocation::new(Vec::<(&str, f64)>::new()).unwrap();
        assert!(matches!(
            compute_nav(&panel(), &empty, &range(), None),
            Err(PortfolioError::EmptySelection)
        ));

        let unknown = Allocation::new([("ZZZ", 10.0)]).unwrap();
        assert!(matches!(
            compute_nav(&panel(), &unknown, &range(), None),
            Err(PortfolioError::Core(_))
        ));

        let alloc = Allocation::new([("A", 10.0)]).unwrap();
        let outside = DateRange::new(d(20), d(25)).unwrap();
        assert!(matches!(
            compute_nav(&panel(), &alloc, &outside, None),
            Err(PortfolioError::NoData { .. })
        ));
    }
}
