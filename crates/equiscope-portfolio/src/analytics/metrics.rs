//! Risk/return metrics over a NAV series.
//!
//! The same computation is used for the portfolio and the benchmark, so the
//! two columns of a comparison table are directly comparable.

use crate::analytics::NavReport;
use crate::types::AnalyticsConfig;
use crate::{PortfolioError, PortfolioResult};
use chrono::NaiveDate;
use equiscope_core::TimeSeries;
use equiscope_math::returns::{drawdowns, max_drawdown};
use equiscope_math::stats::sample_std;
use serde::Serialize;

/// The window a metrics record covers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoldingPeriod {
    /// First NAV date.
    pub start: NaiveDate,
    /// Last NAV date.
    pub end: NaiveDate,
    /// Calendar days between `start` and `end`.
    pub days: i64,
    /// `days / days_per_year`.
    pub years: f64,
}

/// Risk/return snapshot of a NAV series.
///
/// Values are decimals (0.12 = 12%). Undefined statistics are `NaN`, which
/// serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsRecord {
    /// `NAV(last) − 1`, measured against the first value for series not starting at 1.0.
    pub cumulative_return: f64,

    /// Compound annual growth rate over `holding.years`. `NaN` for a zero-length holding period.
    pub cagr: f64,

    /// Sample standard deviation of daily returns, annualized.
    /// `NaN` with fewer than two returns.
    pub annualized_volatility: f64,

    /// Deepest peak-to-trough decline, always `<= 0`.
    pub max_drawdown: f64,

    /// `(CAGR − risk-free) / volatility`. `NaN` when volatility is zero or undefined.
    pub sharpe_ratio: f64,

    /// Window the metrics were computed over.
    pub holding: HoldingPeriod,
}

/// Computes the metrics record for `nav`.
///
/// The series is rebased on its first value: cumulative return and CAGR use
/// `last / first`, which equals `NAV(last) − 1` for a NAV starting at 1.0.
///
/// # Errors
///
/// Returns [`PortfolioError::InvalidParameter`] if `config` fails validation
/// and [`PortfolioError::EmptySeries`] if `nav` has no observations.
pub fn compute_metrics(nav: &TimeSeries, config: &AnalyticsConfig) -> PortfolioResult<MetricsRecord> {
    config.validate()?;
    let (Some((start, first)), Some((end, last))) = (nav.first(), nav.last()) else {
        return Err(PortfolioError::empty_series(nav.name()));
    };

    let days = (end - start).num_days();
    let years = days as f64 / config.days_per_year;

    let cumulative_return = last / first - 1.0;
    let cagr = if years > 0.0 {
        (last / first).powf(1.0 / years) - 1.0
    } else {
        f64::NAN
    };

    let returns = nav.pct_change();
    let annualized_volatility = sample_std(returns.values()) * config.annualization_factor();

    let sharpe_ratio = if annualized_volatility > 0.0 {
        (cagr - config.risk_free_rate) / annualized_volatility
    } else {
        f64::NAN
    };

    Ok(MetricsRecord {
        cumulative_return,
        cagr,
        annualized_volatility,
        max_drawdown: max_drawdown(nav.values()),
        sharpe_ratio,
        holding: HoldingPeriod {
            start,
            end,
            days,
            years,
        },
    })
}

/// Underwater curve: `NAV(t) / running max − 1` at every date.
#[must_use]
pub fn drawdown_series(nav: &TimeSeries) -> TimeSeries {
    TimeSeries::from_pairs(
        format!("{} drawdown", nav.name()),
        nav.dates().iter().copied().zip(drawdowns(nav.values())),
    )
    .unwrap_or_else(|_| TimeSeries::empty(nav.name()))
}

/// Portfolio metrics side by side with the benchmark's.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsComparison {
    /// Metrics of the portfolio NAV.
    pub portfolio: MetricsRecord,
    /// Benchmark label.
    pub benchmark_name: Option<String>,
    /// Metrics of the benchmark series, computed from the benchmark itself.
    pub benchmark: Option<MetricsRecord>,
}

/// One labelled row of a comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    /// Metric label.
    pub metric: &'static str,
    /// Portfolio value.
    pub portfolio: f64,
    /// Benchmark value (`NaN` if there is no benchmark).
    pub benchmark: f64,
}

impl MetricsComparison {
    /// Computes both records from a NAV report.
    pub fn from_report(report: &NavReport, config: &AnalyticsConfig) -> PortfolioResult<Self> {
        let portfolio = compute_metrics(&report.nav, config)?;
        let benchmark = match &report.benchmark {
            Some(series) if !series.is_empty() => Some(compute_metrics(series, config)?),
            _ => None,
        };
        Ok(Self {
            portfolio,
            benchmark_name: report.benchmark.as_ref().map(|s| s.name().to_string()),
            benchmark,
        })
    }

    /// Table rows in display order.
    #[must_use]
    pub fn rows(&self) -> Vec<MetricRow> {
        let pick = |f: fn(&MetricsRecord) -> f64| MetricRow {
            metric: "",
            portfolio: f(&self.portfolio),
            benchmark: self.benchmark.as_ref().map_or(f64::NAN, f),
        };
        vec![
            MetricRow {
                metric: "Cumulative Return",
                ..pick(|m| m.cumulative_return)
            },
            MetricRow {
                metric: "CAGR",
                ..pick(|m| m.cagr)
            },
            MetricRow {
                metric: "Annualized Volatility",
                ..pick(|m| m.annualized_volatility)
            },
            MetricRow {
                metric: "Max Drawdown",
                ..pick(|m| m.max_drawdown)
            },
            MetricRow {
                metric: "Sharpe Ratio",
                ..pick(|m| m.sharpe_ratio)
            },
        ]
    }
}
