//! Portfolio command implementation.
//!
//! Buy-and-hold NAV of a weighted selection with metrics, allocation summary,
//! benchmark comparison and optional attribute breakdown.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use equiscope_core::{DateRange, Ticker, TimeSeries};
use equiscope_portfolio::{
    bucket_by_attribute, compute_nav, drawdown_series, AllocationSlice, AttributeDistribution,
    MetricsComparison,
};

use crate::cli::OutputFormat;
use crate::commands::{
    metrics_grid, parse_allocation, require_tickers, series_rows, RangeArgs, Session,
};
use crate::error::CliError;
use crate::output::{
    format_number, format_percent, print_grid, print_json, print_output, print_warning, KeyValue,
};

/// Arguments for the portfolio command.
#[derive(Args, Debug)]
pub struct PortfolioArgs {
    /// Weights as TICKER=WEIGHT in percent, e.g. AAPL.OQ=40 MSFT.OQ=30 (rest is cash)
    #[arg(required = true, num_args = 1..)]
    pub weights: Vec<String>,

    #[command(flatten)]
    pub range: RangeArgs,

    /// Benchmark ticker (overrides the configured one)
    #[arg(short, long)]
    pub benchmark: Option<String>,

    /// Skip the benchmark comparison
    #[arg(long, conflicts_with = "benchmark")]
    pub no_benchmark: bool,

    /// Group the allocation by a metadata attribute (Sector, Industry, Exchange, ...)
    #[arg(long)]
    pub by: Option<String>,

    /// Show the NAV series
    #[arg(long)]
    pub nav: bool,

    /// Show daily portfolio returns
    #[arg(long)]
    pub returns: bool,

    /// Show the drawdown series
    #[arg(long)]
    pub drawdown: bool,
}

/// One allocation slice for display.
#[derive(Debug, Serialize, Tabled)]
struct SliceLine {
    #[tabled(rename = "Holding")]
    label: String,
    #[tabled(rename = "Weight")]
    weight: String,
}

/// One attribute bucket for display.
#[derive(Debug, Serialize, Tabled)]
struct BucketLine {
    #[tabled(rename = "Bucket")]
    label: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Tickers")]
    tickers: String,
}

/// NAV with the benchmark alongside.
#[derive(Debug, Serialize, Tabled)]
struct NavLine {
    #[tabled(rename = "Date")]
    date: NaiveDate,
    #[tabled(rename = "Portfolio")]
    portfolio: String,
    #[tabled(rename = "Benchmark")]
    benchmark: String,
}

/// JSON document for the whole command.
#[derive(Debug, Serialize)]
struct PortfolioDocument<'a> {
    range: &'a DateRange,
    allocation: Vec<AllocationSlice>,
    metrics: &'a MetricsComparison,
    #[serde(skip_serializing_if = "Option::is_none")]
    distribution: Option<&'a AttributeDistribution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nav: Option<&'a TimeSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    benchmark: Option<&'a TimeSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    daily_returns: Option<&'a TimeSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    drawdown: Option<&'a TimeSeries>,
}

fn weight_label(weight_pct: f64) -> String {
    format!("{:.2}%", weight_pct)
}

/// Execute the portfolio command.
pub fn execute(args: PortfolioArgs, session: &Session) -> Result<()> {
    let allocation = parse_allocation(&args.weights)?;

    let cache = session.open_data();
    let panel = session.load_prices(&cache)?;
    require_tickers(&panel, &allocation)?;
    let range = args.range.resolve(&panel)?;

    let analytics = &session.config.analytics;
    let benchmark: Option<Ticker> = match (&args.benchmark, args.no_benchmark) {
        (_, true) => None,
        (Some(explicit), false) => {
            if !panel.contains(explicit) {
                return Err(CliError::UnknownTicker(explicit.clone()).into());
            }
            Some(Ticker::new(explicit))
        }
        (None, false) if panel.contains(analytics.benchmark.as_str()) => {
            Some(analytics.benchmark.clone())
        }
        (None, false) => {
            if !session.quiet {
                print_warning(&format!(
                    "benchmark {} not in price data, comparison skipped",
                    analytics.benchmark
                ));
            }
            None
        }
    };

    let report = compute_nav(&panel, &allocation, &range, benchmark.as_ref())?;
    let comparison = MetricsComparison::from_report(&report, analytics)?;

    let distribution = match &args.by {
        Some(attribute) => {
            let metadata = cache.metadata()?;
            Some(bucket_by_attribute(&allocation, &metadata, attribute))
        }
        None => None,
    };
    let daily_returns = args.returns.then(|| report.daily_returns());
    let drawdown = args.drawdown.then(|| drawdown_series(&report.nav));

    match session.format {
        OutputFormat::Minimal => {
            println!("{}", format_percent(comparison.portfolio.cumulative_return));
        }
        OutputFormat::Json => {
            let document = PortfolioDocument {
                range: &report.range,
                allocation: allocation.summary(),
                metrics: &comparison,
                distribution: distribution.as_ref(),
                nav: args.nav.then_some(&report.nav),
                benchmark: args.nav.then_some(report.benchmark.as_ref()).flatten(),
                daily_returns: daily_returns.as_ref(),
                drawdown: drawdown.as_ref(),
            };
            print_json(&document)?;
        }
        OutputFormat::Csv => {
            // one table per invocation: the most specific series requested, else the metrics
            if args.nav {
                print_output(&nav_lines(&report.nav, report.benchmark.as_ref()), session.format)?;
            } else if let Some(returns) = &daily_returns {
                print_output(&series_rows(returns), session.format)?;
            } else if let Some(dd) = &drawdown {
                print_output(&series_rows(dd), session.format)?;
            } else {
                let (headers, rows) = comparison_grid(&comparison);
                print_grid(&headers, &rows, session.format)?;
            }
        }
        OutputFormat::Table => {
            let format = session.format;

            session.header("Allocation");
            let slices: Vec<SliceLine> = allocation
                .summary()
                .into_iter()
                .map(|s| SliceLine {
                    weight: weight_label(s.weight_pct),
                    label: s.label,
                })
                .collect();
            print_output(&slices, format)?;

            session.header(&format!("Performance {}", report.range));
            let (headers, rows) = comparison_grid(&comparison);
            print_grid(&headers, &rows, format)?;

            let holding = comparison.portfolio.holding;
            let period = vec![
                KeyValue::new("Start", holding.start.to_string()),
                KeyValue::new("End", holding.end.to_string()),
                KeyValue::new("Holding Days", holding.days.to_string()),
                KeyValue::new("Holding Years", format_number(holding.years, 2)),
            ];
            print_output(&period, format)?;

            if let Some(dist) = &distribution {
                session.header(&format!("Allocation by {}", dist.attribute));
                let lines: Vec<BucketLine> = dist
                    .buckets
                    .iter()
                    .map(|b| BucketLine {
                        label: b.label.clone(),
                        weight: weight_label(b.weight_pct),
                        tickers: b
                            .tickers
                            .iter()
                            .map(Ticker::as_str)
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
                    .collect();
                print_output(&lines, format)?;
            }

            if args.nav {
                session.header("NAV");
                print_output(&nav_lines(&report.nav, report.benchmark.as_ref()), format)?;
            }
            if let Some(returns) = &daily_returns {
                session.header("Daily Returns");
                print_output(&series_rows(returns), format)?;
            }
            if let Some(dd) = &drawdown {
                session.header("Drawdown");
                print_output(&series_rows(dd), format)?;
            }
        }
    }
    Ok(())
}

fn comparison_grid(comparison: &MetricsComparison) -> (Vec<String>, Vec<Vec<String>>) {
    match (&comparison.benchmark_name, &comparison.benchmark) {
        (Some(name), record) => metrics_grid(&[
            ("Portfolio", Some(&comparison.portfolio)),
            (name.as_str(), record.as_ref()),
        ]),
        (None, _) => metrics_grid(&[("Portfolio", Some(&comparison.portfolio))]),
    }
}

fn nav_lines(nav: &TimeSeries, benchmark: Option<&TimeSeries>) -> Vec<NavLine> {
    nav.iter()
        .map(|(date, value)| NavLine {
            date,
            portfolio: format_number(value, 6),
            benchmark: format_number(
                benchmark.and_then(|b| b.value_at(date)).unwrap_or(f64::NAN),
                6,
            ),
        })
        .collect()
}
