//! Stress command implementation.
//!
//! Market stress score from a reference ticker's volatility and momentum.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use equiscope_portfolio::{compute_stress, StressSnapshot};

use crate::cli::OutputFormat;
use crate::commands::{RangeArgs, Session};
use crate::error::CliError;
use crate::output::{format_number, print_json, print_output, print_warning, KeyValue, NOT_AVAILABLE};

/// Arguments for the stress command.
#[derive(Args, Debug)]
pub struct StressArgs {
    /// Reference ticker (defaults to the configured benchmark)
    pub reference: Option<String>,

    // the indicator warms up inside the range, so a short range stays undefined
    #[command(flatten)]
    pub range: RangeArgs,

    /// Number of most recent snapshots to list
    #[arg(long, default_value = "20")]
    pub tail: usize,
}

/// One snapshot for display.
#[derive(Debug, Serialize, Tabled)]
struct SnapshotLine {
    #[tabled(rename = "Date")]
    date: NaiveDate,
    #[tabled(rename = "Volatility %")]
    volatility: String,
    #[tabled(rename = "Momentum %")]
    momentum: String,
    #[tabled(rename = "Vol Percentile")]
    percentile: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Level")]
    level: String,
}

impl From<&StressSnapshot> for SnapshotLine {
    fn from(s: &StressSnapshot) -> Self {
        Self {
            date: s.date,
            volatility: format_number(s.volatility, 2),
            momentum: format_number(s.momentum, 2),
            percentile: format_number(s.volatility_percentile, 1),
            score: format_number(s.score, 1),
            level: level_label(s),
        }
    }
}

fn level_label(s: &StressSnapshot) -> String {
    s.level()
        .map_or_else(|| NOT_AVAILABLE.to_string(), |l| l.to_string())
}

/// Execute the stress command.
pub fn execute(args: StressArgs, session: &Session) -> Result<()> {
    let reference = args
        .reference
        .clone()
        .unwrap_or_else(|| session.config.analytics.benchmark.to_string());

    let cache = session.open_data();
    let panel = session.load_prices(&cache)?;
    if !panel.contains(&reference) {
        return Err(CliError::UnknownTicker(reference).into());
    }

    let mut series = panel.series(&reference)?;
    if args.range.is_set() {
        series = series.restrict(&args.range.resolve(&panel)?);
    }
    let shown = compute_stress(&series, &session.config.stress)?.snapshots;
    let latest = shown.iter().rev().find(|s| s.is_defined()).copied();
    if latest.is_none() && !session.quiet {
        print_warning(&format!(
            "not enough history for {reference}: the score needs {} trading days",
            session.config.stress.volatility_window + session.config.stress.percentile_window
        ));
    }

    match session.format {
        OutputFormat::Minimal => {
            println!("{}", latest.map_or_else(|| NOT_AVAILABLE.to_string(), |s| format_number(s.score, 1)));
        }
        OutputFormat::Json => print_json(&shown)?,
        OutputFormat::Csv => print_output(&lines(&shown, shown.len()), session.format)?,
        OutputFormat::Table => {
            session.header(&format!("Market Stress ({reference})"));
            if let Some(s) = latest {
                let summary = vec![
                    KeyValue::new("Date", s.date.to_string()),
                    KeyValue::new("Score", format_number(s.score, 1)),
                    KeyValue::new("Level", level_label(&s)),
                    KeyValue::new("Volatility %", format_number(s.volatility, 2)),
                    KeyValue::new("Momentum %", format_number(s.momentum, 2)),
                    KeyValue::new("Vol Percentile", format_number(s.volatility_percentile, 1)),
                ];
                print_output(&summary, session.format)?;
            }
            session.header("Recent Snapshots");
            print_output(&lines(&shown, args.tail), session.format)?;
        }
    }
    Ok(())
}

/// The last `n` defined snapshots, oldest first.
fn lines(snapshots: &[StressSnapshot], n: usize) -> Vec<SnapshotLine> {
    let defined: Vec<&StressSnapshot> = snapshots.iter().filter(|s| s.is_defined()).collect();
    defined[defined.len().saturating_sub(n)..]
        .iter()
        .map(|s| SnapshotLine::from(*s))
        .collect()
}
