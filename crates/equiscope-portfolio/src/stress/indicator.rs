//! Composite market stress score.
//!
//! Combines how unusual current volatility is (its percentile within the
//! trailing year) with how far prices have trended away from equilibrium
//! (dual moving-average momentum).

use crate::types::StressParams;
use crate::PortfolioResult;
use chrono::NaiveDate;
use equiscope_core::TimeSeries;
use equiscope_math::returns::pct_change;
use equiscope_math::rolling::{rolling_mean, rolling_percentile_rank, rolling_std};
use equiscope_math::stats::clip;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Score below which stress is low.
pub const LOW_STRESS_THRESHOLD: f64 = 30.0;

/// Score at or above which stress is high.
pub const HIGH_STRESS_THRESHOLD: f64 = 60.0;

/// Interpretation band of a stress score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum StressLevel {
    /// Score below 30.
    Low,
    /// Score from 30 up to 60.
    Medium,
    /// Score of 60 or more.
    High,
}

impl StressLevel {
    /// Band for `score`, or `None` if the score is undefined.
    #[must_use]
    pub fn from_score(score: f64) -> Option<Self> {
        if score.is_nan() {
            None
        } else if score < LOW_STRESS_THRESHOLD {
            Some(Self::Low)
        } else if score < HIGH_STRESS_THRESHOLD {
            Some(Self::Medium)
        } else {
            Some(Self::High)
        }
    }
}

impl fmt::Display for StressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

/// Indicator values for one date. Fields are `NaN` until warmed up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StressSnapshot {
    /// Observation date.
    pub date: NaiveDate,
    /// Annualized rolling volatility in percent.
    pub volatility: f64,
    /// Short/long moving-average spread in percent.
    pub momentum: f64,
    /// Percentile rank (0-100) of `volatility` within its trailing window.
    pub volatility_percentile: f64,
    /// Composite score in `[0, 100]`.
    pub score: f64,
}

impl StressSnapshot {
    /// Interpretation band of the score.
    #[must_use]
    pub fn level(&self) -> Option<StressLevel> {
        StressLevel::from_score(self.score)
    }

    /// Returns true if the score is defined.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        !self.score.is_nan()
    }
}

/// Stress indicator over a reference price series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StressSeries {
    /// Name of the reference series.
    pub reference: String,
    /// One snapshot per reference date.
    pub snapshots: Vec<StressSnapshot>,
}

impl StressSeries {
    /// Number of snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns true if there are no snapshots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Most recent snapshot with a defined score.
    #[must_use]
    pub fn latest(&self) -> Option<&StressSnapshot> {
        self.snapshots.iter().rev().find(|s| s.is_defined())
    }

    /// Snapshots with a defined score.
    pub fn defined(&self) -> impl Iterator<Item = &StressSnapshot> {
        self.snapshots.iter().filter(|s| s.is_defined())
    }

    /// Score as a series.
    #[must_use]
    pub fn score(&self) -> TimeSeries {
        self.field("Stress Score", |s| s.score)
    }

    /// Rolling volatility as a series.
    #[must_use]
    pub fn volatility(&self) -> TimeSeries {
        self.field("Volatility", |s| s.volatility)
    }

    /// Momentum as a series.
    #[must_use]
    pub fn momentum(&self) -> TimeSeries {
        self.field("Momentum", |s| s.momentum)
    }

    fn field(&self, name: &str, f: impl Fn(&StressSnapshot) -> f64) -> TimeSeries {
        TimeSeries::from_pairs(name, self.snapshots.iter().map(|s| (s.date, f(s))))
            .unwrap_or_else(|_| TimeSeries::empty(name))
    }
}

/// Computes the stress indicator for every date of `reference`.
///
/// 1. volatility = rolling std of daily returns × √252 × 100
/// 2. momentum = (SMA(short) / SMA(long) − 1) × 100
/// 3. percentile = rank of volatility within its trailing `percentile_window`
/// 4. score = clip(0.6 × percentile + 0.4 × (50 − |momentum|), 0, 100)
///
/// A reference shorter than the warm-up windows yields snapshots whose
/// fields stay `NaN`; that is not an error.
///
/// # Errors
///
/// Returns [`PortfolioError::InvalidParameter`](crate::PortfolioError::InvalidParameter)
/// if `params` fail validation.
pub fn compute_stress(reference: &TimeSeries, params: &StressParams) -> PortfolioResult<StressSeries> {
    params.validate()?;

    let prices = reference.values();
    let returns = pct_change(prices);

    let volatility: Vec<f64> = rolling_std(&returns, params.volatility_window)?
        .into_iter()
        .map(|s| s * params.annualization_factor() * 100.0)
        .collect();

    let short = rolling_mean(prices, params.momentum_short)?;
    let long = rolling_mean(prices, params.momentum_long)?;
    let momentum: Vec<f64> = short
        .iter()
        .zip(&long)
        .map(|(s, l)| (s / l - 1.0) * 100.0)
        .collect();

    let percentile = rolling_percentile_rank(&volatility, params.percentile_window)?;

    let snapshots: Vec<StressSnapshot> = reference
        .dates()
        .iter()
        .enumerate()
        .map(|(i, &date)| {
            let raw = params.percentile_weight * percentile[i]
                + params.momentum_weight * (50.0 - momentum[i].abs());
            StressSnapshot {
                date,
                volatility: volatility[i],
                momentum: momentum[i],
                volatility_percentile: percentile[i],
                score: clip(raw, 0.0, 100.0),
            }
        })
        .collect();

    let series = StressSeries {
        reference: reference.name().to_string(),
        snapshots,
    };

    debug!(
        reference = %series.reference,
        rows = series.len(),
        defined = series.defined().count(),
        "computed stress indicator"
    );

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PortfolioError;
    use approx::assert_relative_eq;
    use chrono::Duration;

    fn series(values: &[f64]) -> TimeSeries {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        TimeSeries::from_pairs(
            "SPY",
            values
                .iter()
                .enumerate()
                .map(|(i, v)| (start + Duration::days(i as i64), *v)),
        )
        .unwrap()
    }

    fn wave(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + 10.0 * (i as f64 / 7.0).sin() + i as f64 * 0.05)
            .collect()
    }

    #[test]
    fn test_levels() {
        assert_eq!(StressLevel::from_score(0.0), Some(StressLevel::Low));
        assert_eq!(StressLevel::from_score(29.99), Some(StressLevel::Low));
        assert_eq!(StressLevel::from_score(30.0), Some(StressLevel::Medium));
        assert_eq!(StressLevel::from_score(59.99), Some(StressLevel::Medium));
        assert_eq!(StressLevel::from_score(60.0), Some(StressLevel::High));
        assert_eq!(StressLevel::from_score(f64::NAN), None);
        assert_eq!(StressLevel::High.to_string(), "High");
    }

    #[test]
    fn test_short_range_undefined() {
        let out = compute_stress(&series(&wave(25)), &StressParams::default()).unwrap();
        assert_eq!(out.len(), 25);
        assert!(out.snapshots.iter().all(|s| s.volatility.is_nan()));
        assert!(out.snapshots.iter().all(|s| s.score.is_nan()));
        assert!(out.latest().is_none());
    }

    #[test]
    fn test_warmups() {
        let params = StressParams::new()
            .with_volatility_window(5)
            .with_momentum(3, 6)
            .with_percentile_window(4);
        let out = compute_stress(&series(&wave(40)), &params).unwrap();
        let s = &out.snapshots;

        assert!(s[4].volatility.is_nan());
        assert!(!s[5].volatility.is_nan());
        assert!(s[4].momentum.is_nan());
        assert!(!s[5].momentum.is_nan());
        // percentile needs 4 defined volatilities: indices 5..=8
        assert!(s[7].volatility_percentile.is_nan());
        assert!(!s[8].volatility_percentile.is_nan());
        assert!(s[7].score.is_nan());
        assert!(s[8].is_defined());
    }

    #[test]
    fn test_score_formula_and_bounds() {
        let params = StressParams::new()
            .with_volatility_window(5)
            .with_momentum(3, 6)
            .with_percentile_window(10);
        let out = compute_stress(&series(&wave(120)), &params).unwrap();

        for snap in out.defined() {
            assert!((0.0..=100.0).contains(&snap.score));
            let expected =
                (0.6 * snap.volatility_percentile + 0.4 * (50.0 - snap.momentum.abs())).clamp(0.0, 100.0);
            assert_relative_eq!(snap.score, expected, epsilon = 1e-12);
        }
        assert!(out.latest().is_some());
        assert_eq!(out.score().len(), 120);
    }

    #[test]
    fn test_momentum_value() {
        let prices: Vec<f64> = (1..=6).map(f64::from).collect();
        let params = StressParams::new()
            .with_volatility_window(2)
            .with_momentum(2, 4)
            .with_percentile_window(1);
        let out = compute_stress(&series(&prices), &params).unwrap();
        // SMA2 = 5.5, SMA4 = 4.5 at the last date
        assert_relative_eq!(out.snapshots[5].momentum, (5.5 / 4.5 - 1.0) * 100.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_params() {
        let err = compute_stress(&series(&wave(10)), &StressParams::new().with_momentum(10, 5));
        assert!(matches!(err, Err(PortfolioError::InvalidParameter { .. })));
    }
}
