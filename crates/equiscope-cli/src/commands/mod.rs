//! CLI command implementations.

pub mod config;
pub mod portfolio;
pub mod prices;
pub mod rebalance;
pub mod stress;
pub mod tickers;
pub mod vol_target;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use portfolio::PortfolioArgs;
pub use prices::PricesArgs;
pub use rebalance::RebalanceArgs;
pub use stress::StressArgs;
pub use tickers::TickersArgs;
pub use vol_target::VolTargetArgs;

use std::sync::Arc;

use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use equiscope_core::{DateRange, PricePanel, Ticker, TimeSeries};
use equiscope_data::PanelCache;
use equiscope_portfolio::{Allocation, MetricsRecord};

use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};
use crate::output::{format_number, format_percent, print_header};

/// Everything a command needs besides its own arguments.
pub struct Session {
    /// Requested output format.
    pub format: OutputFormat,
    /// Suppress headers and notes.
    pub quiet: bool,
    /// Effective configuration.
    pub config: AppConfig,
}

impl Session {
    /// Opens a load-once cache over the configured data files.
    pub fn open_data(&self) -> PanelCache {
        equiscope_data::open_csv(&self.config.data.prices, self.config.data.metadata.as_deref())
    }

    /// Loads the price panel, failing early when no price file exists.
    pub fn load_prices(&self, cache: &PanelCache) -> anyhow::Result<Arc<PricePanel>> {
        if !self.config.data.prices.is_file() {
            return Err(CliError::MissingArgument(format!(
                "--prices (no price file at {})",
                self.config.data.prices.display()
            ))
            .into());
        }
        Ok(cache.prices()?)
    }

    /// Prints a section header in table mode.
    pub fn header(&self, title: &str) {
        if self.format == OutputFormat::Table && !self.quiet {
            print_header(title);
        }
    }
}

/// Optional `--start`/`--end` bounds, defaulting to the panel's own range.
#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// Range start (YYYY-MM-DD). Defaults to the first panel date.
    #[arg(long)]
    pub start: Option<String>,

    /// Range end (YYYY-MM-DD). Defaults to the last panel date.
    #[arg(long)]
    pub end: Option<String>,
}

impl RangeArgs {
    /// Whether either bound was given.
    pub fn is_set(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Resolves the bounds against the panel.
    pub fn resolve(&self, panel: &PricePanel) -> anyhow::Result<DateRange> {
        let (first, last) = panel
            .date_range()
            .ok_or_else(|| anyhow::anyhow!("price panel is empty"))?;
        let start = self.start.as_deref().map(parse_date).transpose()?.unwrap_or(first);
        let end = self.end.as_deref().map(parse_date).transpose()?.unwrap_or(last);
        Ok(DateRange::new(start, end)?)
    }
}

/// Parses a date string.
pub fn parse_date(s: &str) -> CliResult<NaiveDate> {
    equiscope_core::types::parse_date(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses a `TICKER=WEIGHT` pair, weight in percent.
pub fn parse_weight(s: &str) -> CliResult<(Ticker, f64)> {
    let (ticker, weight) = s
        .split_once('=')
        .ok_or_else(|| CliError::InvalidWeight(s.to_string()))?;
    let ticker = Ticker::new(ticker);
    if ticker.is_empty() {
        return Err(CliError::InvalidWeight(s.to_string()));
    }
    let weight: f64 = weight
        .trim()
        .trim_end_matches('%')
        .parse()
        .map_err(|_| CliError::InvalidWeight(s.to_string()))?;
    Ok((ticker, weight))
}

/// Builds a validated allocation from `TICKER=WEIGHT` specs.
pub fn parse_allocation(specs: &[String]) -> anyhow::Result<Allocation> {
    let pairs = specs
        .iter()
        .map(|s| parse_weight(s))
        .collect::<CliResult<Vec<_>>>()?;
    Ok(Allocation::new(pairs)?)
}

/// Fails with the first allocation ticker missing from the panel.
pub fn require_tickers(panel: &PricePanel, allocation: &Allocation) -> CliResult<()> {
    match allocation.tickers().into_iter().find(|t| !panel.contains(t.as_str())) {
        Some(missing) => Err(CliError::UnknownTicker(missing.to_string())),
        None => Ok(()),
    }
}

/// One dated value of a series.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct SeriesRow {
    #[tabled(rename = "Date")]
    pub date: NaiveDate,
    #[tabled(rename = "Value", display_with = "display_value")]
    pub value: f64,
}

fn display_value(value: &f64) -> String {
    format_number(*value, 6)
}

/// Rows of a series for tabular output.
pub fn series_rows(series: &TimeSeries) -> Vec<SeriesRow> {
    series
        .iter()
        .map(|(date, value)| SeriesRow { date, value })
        .collect()
}

/// Two series side by side, joined on date.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ComparisonRow {
    #[tabled(rename = "Date")]
    pub date: NaiveDate,
    #[tabled(rename = "Base", display_with = "display_value")]
    pub base: f64,
    #[tabled(rename = "Overlay", display_with = "display_value")]
    pub overlay: f64,
}

/// Joins two series on their common dates.
pub fn comparison_rows(base: &TimeSeries, overlay: &TimeSeries) -> Vec<ComparisonRow> {
    base.inner_join(overlay)
        .into_iter()
        .map(|(date, base, overlay)| ComparisonRow {
            date,
            base,
            overlay,
        })
        .collect()
}

/// Metric label, accessor and whether it reads as a percentage.
type MetricLine = (&'static str, fn(&MetricsRecord) -> f64, bool);

const METRIC_LINES: [MetricLine; 5] = [
    ("Cumulative Return", |m: &MetricsRecord| m.cumulative_return, true),
    ("CAGR", |m: &MetricsRecord| m.cagr, true),
    ("Annualized Volatility", |m: &MetricsRecord| m.annualized_volatility, true),
    ("Max Drawdown", |m: &MetricsRecord| m.max_drawdown, true),
    ("Sharpe Ratio", |m: &MetricsRecord| m.sharpe_ratio, false),
];

/// Metrics of several series side by side: one row per metric, one column per series.
///
/// A column without a record renders as `N/A`.
pub fn metrics_grid(columns: &[(&str, Option<&MetricsRecord>)]) -> (Vec<String>, Vec<Vec<String>>) {
    let headers = std::iter::once("Metric".to_string())
        .chain(columns.iter().map(|(label, _)| (*label).to_string()))
        .collect();
    let rows = METRIC_LINES
        .iter()
        .map(|(label, get, percent)| {
            std::iter::once((*label).to_string())
                .chain(columns.iter().map(|(_, record)| {
                    let value = record.map_or(f64::NAN, *get);
                    if *percent {
                        format_percent(value)
                    } else {
                        format_number(value, 2)
                    }
                }))
                .collect()
        })
        .collect();
    (headers, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weight() {
        let (t, w) = parse_weight("AAPL.OQ=40").unwrap();
        assert_eq!(t.as_str(), "AAPL.OQ");
        assert_eq!(w, 40.0);

        let (_, w) = parse_weight(" MSFT.OQ = 12.5% ").unwrap();
        assert_eq!(w, 12.5);

        assert!(matches!(parse_weight("AAPL.OQ"), Err(CliError::InvalidWeight(_))));
        assert!(matches!(parse_weight("=40"), Err(CliError::InvalidWeight(_))));
        assert!(matches!(parse_weight("AAPL.OQ=abc"), Err(CliError::InvalidWeight(_))));
    }

    #[test]
    fn test_parse_allocation_rejects_overweight() {
        let specs = vec!["A=60".to_string(), "B=50".to_string()];
        assert!(parse_allocation(&specs).is_err());

        let specs = vec!["A=60".to_string(), "B=30".to_string()];
        let alloc = parse_allocation(&specs).unwrap();
        assert!((alloc.cash_weight() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_metrics_grid_layout() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        let nav = TimeSeries::from_pairs("nav", [(d(2), 1.0), (d(3), 1.1), (d(4), 1.21)]).unwrap();
        let record =
            equiscope_portfolio::compute_metrics(&nav, &equiscope_portfolio::AnalyticsConfig::default())
                .unwrap();

        let (headers, rows) = metrics_grid(&[("Portfolio", Some(&record)), ("SPY", None)]);
        assert_eq!(headers, vec!["Metric", "Portfolio", "SPY"]);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], vec!["Cumulative Return", "21.00%", "N/A"]);
        assert_eq!(rows[4][2], "N/A");
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert!(matches!(parse_date("March"), Err(CliError::InvalidDate(_))));
    }

    #[test]
    fn test_range_defaults_to_panel() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        let panel = PricePanel::from_observations(vec![
            (d(2), Ticker::from("A"), 1.0),
            (d(9), Ticker::from("A"), 2.0),
        ])
        .unwrap();

        let range = RangeArgs::default().resolve(&panel).unwrap();
        assert_eq!((range.start(), range.end()), (d(2), d(9)));

        let args = RangeArgs {
            start: Some("2024-01-05".into()),
            end: None,
        };
        assert!(args.is_set());
        assert_eq!(args.resolve(&panel).unwrap().start(), d(5));

        let inverted = RangeArgs {
            start: Some("2024-01-09".into()),
            end: Some("2024-01-02".into()),
        };
        assert!(inverted.resolve(&panel).is_err());
    }
}
