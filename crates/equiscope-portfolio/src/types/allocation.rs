//! Portfolio allocation: ticker weights plus implied cash.

use crate::{PortfolioError, PortfolioResult};
use equiscope_core::Ticker;
use serde::Serialize;
use std::collections::HashSet;

/// Total weight of a fully invested portfolio, in percent.
pub const FULL_WEIGHT: f64 = 100.0;

/// Slack allowed when checking the weight sum against 100%.
///
/// Lets user-entered splits such as 33.3/33.3/33.4 through.
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Label of the cash slice in summaries and buckets.
pub const CASH_LABEL: &str = "Cash";

/// A single ticker weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Position {
    /// Instrument.
    pub ticker: Ticker,
    /// Weight in percent of portfolio value (0-100).
    pub weight_pct: f64,
}

/// One slice of an allocation pie: a ticker or the cash remainder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationSlice {
    /// Ticker symbol or [`CASH_LABEL`].
    pub label: String,
    /// Weight in percent.
    pub weight_pct: f64,
}

/// Validated, ordered ticker weights.
///
/// Invariants, checked at construction:
/// - every weight is finite and `>= 0`
/// - no ticker appears twice
/// - weights sum to at most 100%
///
/// Whatever is not allocated is cash, which earns nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    positions: Vec<Position>,
}

impl Allocation {
    /// Creates an allocation from `(ticker, weight%)` pairs, keeping their order.
    pub fn new<T: Into<Ticker>>(
        weights: impl IntoIterator<Item = (T, f64)>,
    ) -> PortfolioResult<Self> {
        let mut positions = Vec::new();
        let mut seen = HashSet::new();
        let mut total = 0.0;

        for (ticker, weight) in weights {
            let ticker = ticker.into();
            if !weight.is_finite() || weight < 0.0 {
                return Err(PortfolioError::invalid_weight(ticker.as_str(), weight));
            }
            if !seen.insert(ticker.clone()) {
                return Err(PortfolioError::DuplicateTicker {
                    ticker: ticker.to_string(),
                });
            }
            total += weight;
            positions.push(Position {
                ticker,
                weight_pct: weight,
            });
        }

        if total > FULL_WEIGHT + WEIGHT_TOLERANCE {
            return Err(PortfolioError::WeightsExceedTotal { total });
        }

        Ok(Self { positions })
    }

    /// Splits 100% evenly across `tickers`.
    pub fn equal_weight<T: Into<Ticker>>(
        tickers: impl IntoIterator<Item = T>,
    ) -> PortfolioResult<Self> {
        let tickers: Vec<Ticker> = tickers.into_iter().map(Into::into).collect();
        if tickers.is_empty() {
            return Err(PortfolioError::EmptySelection);
        }
        let weight = FULL_WEIGHT / tickers.len() as f64;
        Self::new(tickers.into_iter().map(|t| (t, weight)))
    }

    /// Positions in insertion order.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Selected tickers in insertion order.
    #[must_use]
    pub fn tickers(&self) -> Vec<Ticker> {
        self.positions.iter().map(|p| p.ticker.clone()).collect()
    }

    /// Weights in percent, in insertion order.
    #[must_use]
    pub fn weights(&self) -> Vec<f64> {
        self.positions.iter().map(|p| p.weight_pct).collect()
    }

    /// Weight of `ticker`, if selected.
    #[must_use]
    pub fn weight_of(&self, ticker: &str) -> Option<f64> {
        self.positions
            .iter()
            .find(|p| p.ticker.as_str() == ticker)
            .map(|p| p.weight_pct)
    }

    /// Number of selected tickers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if no ticker is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Sum of ticker weights in percent.
    #[must_use]
    pub fn invested_weight(&self) -> f64 {
        self.positions.iter().map(|p| p.weight_pct).sum()
    }

    /// Cash weight in percent: `100 - invested`.
    #[must_use]
    pub fn cash_weight(&self) -> f64 {
        (FULL_WEIGHT - self.invested_weight()).max(0.0)
    }

    /// One slice per ticker followed by a trailing cash slice.
    #[must_use]
    pub fn summary(&self) -> Vec<AllocationSlice> {
        self.positions
            .iter()
            .map(|p| AllocationSlice {
                label: p.ticker.to_string(),
                weight_pct: p.weight_pct,
            })
            .chain(std::iter::once(AllocationSlice {
                label: CASH_LABEL.to_string(),
                weight_pct: self.cash_weight(),
            }))
            .collect()
    }
}

/// Builder for constructing an [`Allocation`] one ticker at a time.
///
/// # Example
///
/// ```rust
/// use equiscope_portfolio::prelude::*;
///
/// let allocation = AllocationBuilder::new()
///     .add("AAPL.OQ", 40.0)
///     .add("MSFT.OQ", 40.0)
///     .build()
///     .unwrap();
/// assert_eq!(allocation.cash_weight(), 20.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AllocationBuilder {
    weights: Vec<(Ticker, f64)>,
}

impl AllocationBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a ticker weight in percent.
    #[must_use]
    pub fn add(mut self, ticker: impl Into<Ticker>, weight_pct: f64) -> Self {
        self.weights.push((ticker.into(), weight_pct));
        self
    }

    /// Adds several ticker weights.
    #[must_use]
    pub fn add_all<T: Into<Ticker>>(mut self, weights: impl IntoIterator<Item = (T, f64)>) -> Self {
        self.weights
            .extend(weights.into_iter().map(|(t, w)| (t.into(), w)));
        self
    }

    /// Validates and builds the allocation.
    pub fn build(self) -> PortfolioResult<Allocation> {
        Allocation::new(self.weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cash_is_remainder() {
        let a = Allocation::new([("A", 60.0), ("B", 25.0)]).unwrap();
        assert_relative_eq!(a.invested_weight(), 85.0);
        assert_relative_eq!(a.cash_weight(), 15.0);
        assert_relative_eq!(a.invested_weight() + a.cash_weight(), 100.0);
        assert_eq!(a.weight_of("B"), Some(25.0));
        assert_eq!(a.weight_of("C"), None);
    }

    #[test]
    fn test_rejects_overweight() {
        let err = Allocation::new([("A", 70.0), ("B", 50.0)]).unwrap_err();
        assert!(matches!(err, PortfolioError::WeightsExceedTotal { total } if total == 120.0));
    }

    #[test]
    fn test_rejects_bad_weights() {
        assert!(matches!(
            Allocation::new([("A", -1.0)]),
            Err(PortfolioError::InvalidWeight { .. })
        ));
        assert!(matches!(
            Allocation::new([("A", f64::NAN)]),
            Err(PortfolioError::InvalidWeight { .. })
        ));
        assert!(matches!(
            Allocation::new([("A", 10.0), ("A", 10.0)]),
            Err(PortfolioError::DuplicateTicker { .. })
        ));
    }

    #[test]
    fn test_tolerates_rounding() {
        let a = Allocation::new([("A", 33.3), ("B", 33.3), ("C", 33.4)]).unwrap();
        assert!(a.cash_weight() >= 0.0);
        assert!(a.cash_weight() < 1e-9);
    }

    #[test]
    fn test_summary_has_trailing_cash() {
        let a = AllocationBuilder::new()
            .add("A", 50.0)
            .add("B", 30.0)
            .build()
            .unwrap();
        let s = a.summary();
        assert_eq!(s.len(), 3);
        assert_eq!(s[0].label, "A");
        assert_eq!(s[2].label, CASH_LABEL);
        assert_relative_eq!(s[2].weight_pct, 20.0);
        assert_relative_eq!(s.iter().map(|x| x.weight_pct).sum::<f64>(), 100.0);
    }

    #[test]
    fn test_equal_weight_and_order() {
        let a = Allocation::equal_weight(["C", "A", "B", "D"]).unwrap();
        assert_eq!(
            a.tickers(),
            vec![Ticker::from("C"), Ticker::from("A"), Ticker::from("B"), Ticker::from("D")]
        );
        assert_relative_eq!(a.weights()[0], 25.0);
        assert!(matches!(
            Allocation::equal_weight(Vec::<&str>::new()),
            Err(PortfolioError::EmptySelection)
        ));
    }

    #[test]
    fn test_empty_allocation_is_all_cash() {
        let a = Allocation::new(Vec::<(&str, f64)>::new()).unwrap();
        assert!(a.is_empty());
        assert_eq!(a.cash_weight(), 100.0);
    }
}
