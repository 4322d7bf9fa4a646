//! Rebalance command implementation.
//!
//! Compares buy-and-hold with a portfolio held at target weights every day.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use equiscope_portfolio::{
    compute_metrics, compute_nav, compute_rebalanced_nav, MetricsRecord, RebalancedNav,
};

use crate::cli::OutputFormat;
use crate::commands::{
    comparison_rows, metrics_grid, parse_allocation, require_tickers, RangeArgs, Session,
};
use crate::output::{format_percent, print_grid, print_json, print_output};

/// Arguments for the rebalance command.
#[derive(Args, Debug)]
pub struct RebalanceArgs {
    /// Weights as TICKER=WEIGHT in percent, e.g. AAPL.OQ=40 MSFT.OQ=30 (rest is cash)
    #[arg(required = true, num_args = 1..)]
    pub weights: Vec<String>,

    #[command(flatten)]
    pub range: RangeArgs,

    /// Show both NAV series side by side
    #[arg(long)]
    pub nav: bool,
}

#[derive(Debug, Serialize)]
struct RebalanceDocument<'a> {
    buy_and_hold: &'a MetricsRecord,
    rebalanced: &'a MetricsRecord,
    #[serde(flatten)]
    series: &'a RebalancedNav,
}

/// Execute the rebalance command.
pub fn execute(args: RebalanceArgs, session: &Session) -> Result<()> {
    let allocation = parse_allocation(&args.weights)?;

    let cache = session.open_data();
    let panel = session.load_prices(&cache)?;
    require_tickers(&panel, &allocation)?;
    let range = args.range.resolve(&panel)?;

    let analytics = &session.config.analytics;
    let base = compute_nav(&panel, &allocation, &range, None)?;
    let rebalanced = compute_rebalanced_nav(&panel, &allocation, &range)?;
    let base_metrics = compute_metrics(&base.nav, analytics)?;
    let rebalanced_metrics = compute_metrics(&rebalanced.nav, analytics)?;

    match session.format {
        OutputFormat::Minimal => {
            println!("{}", format_percent(rebalanced_metrics.cumulative_return));
        }
        OutputFormat::Json => print_json(&RebalanceDocument {
            buy_and_hold: &base_metrics,
            rebalanced: &rebalanced_metrics,
            series: &rebalanced,
        })?,
        OutputFormat::Csv if args.nav => {
            print_output(&comparison_rows(&base.nav, &rebalanced.nav), session.format)?;
        }
        format => {
            session.header(&format!("Buy & Hold vs Monthly Rebalanced {}", range));
            let (headers, rows) = metrics_grid(&[
                ("Buy & Hold", Some(&base_metrics)),
                ("Rebalanced", Some(&rebalanced_metrics)),
            ]);
            print_grid(&headers, &rows, format)?;

            if format == OutputFormat::Table && !session.quiet {
                let dates: Vec<String> = rebalanced
                    .rebalance_dates
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                println!("Rebalance dates ({}): {}", dates.len(), dates.join(", "));
            }

            if args.nav && format == OutputFormat::Table {
                session.header("NAV (Base = Buy & Hold, Overlay = Rebalanced)");
                print_output(&comparison_rows(&base.nav, &rebalanced.nav), format)?;
            }
        }
    }
    Ok(())
}
