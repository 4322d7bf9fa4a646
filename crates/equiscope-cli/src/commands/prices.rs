//! Prices command implementation.
//!
//! Shows the close price history of a single ticker.

use anyhow::Result;
use clap::Args;

use crate::cli::OutputFormat;
use crate::commands::{series_rows, RangeArgs, Session};
use crate::error::CliError;
use crate::output::{format_number, print_output};

/// Ticker shown when none is given.
pub const DEFAULT_TICKER: &str = "AAPL.OQ";

/// Arguments for the prices command.
#[derive(Args, Debug)]
pub struct PricesArgs {
    /// Ticker to show
    #[arg(default_value = DEFAULT_TICKER)]
    pub ticker: String,

    #[command(flatten)]
    pub range: RangeArgs,

    /// Show only the last N observations
    #[arg(long)]
    pub tail: Option<usize>,
}

/// Execute the prices command.
pub fn execute(args: PricesArgs, session: &Session) -> Result<()> {
    let cache = session.open_data();
    let panel = session.load_prices(&cache)?;

    if !panel.contains(&args.ticker) {
        return Err(CliError::UnknownTicker(args.ticker).into());
    }

    let mut series = panel.series(&args.ticker)?;
    if args.range.is_set() {
        series = series.restrict(&args.range.resolve(&panel)?);
    }

    let mut rows = series_rows(&series);
    if let Some(n) = args.tail {
        rows.drain(..rows.len().saturating_sub(n));
    }

    match session.format {
        OutputFormat::Minimal => {
            if let Some(last) = rows.last() {
                println!("{}", format_number(last.value, 4));
            }
        }
        format => {
            session.header(&format!("{} close prices", args.ticker));
            print_output(&rows, format)?;
        }
    }
    Ok(())
}
