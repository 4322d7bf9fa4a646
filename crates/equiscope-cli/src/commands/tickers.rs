//! Tickers command implementation.
//!
//! Lists the tickers in the price panel with their metadata attributes.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use equiscope_core::types::{ATTR_EXCHANGE, ATTR_INDUSTRY, ATTR_NAME, ATTR_SECTOR};
use equiscope_core::{PricePanel, TickerMetadata};

use crate::cli::OutputFormat;
use crate::commands::Session;
use crate::output::print_output;

/// Arguments for the tickers command.
#[derive(Args, Debug)]
pub struct TickersArgs {
    /// Case-insensitive substring matched against ticker and name
    pub filter: Option<String>,
}

/// One ticker with its descriptive attributes.
#[derive(Debug, Serialize, Tabled)]
pub struct TickerRow {
    #[tabled(rename = "Ticker")]
    pub ticker: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Sector")]
    pub sector: String,
    #[tabled(rename = "Industry")]
    pub industry: String,
    #[tabled(rename = "Exchange")]
    pub exchange: String,
    #[tabled(rename = "Observations")]
    pub observations: usize,
}

/// Builds the ticker rows, optionally filtered.
pub fn ticker_rows(panel: &PricePanel, metadata: &TickerMetadata, filter: Option<&str>) -> Vec<TickerRow> {
    let needle = filter.map(str::to_lowercase);
    let attr = |ticker: &str, name: &str| metadata.attribute(ticker, name).unwrap_or_default().to_string();

    panel
        .tickers()
        .iter()
        .map(|t| {
            let ticker = t.as_str();
            TickerRow {
                ticker: ticker.to_string(),
                name: attr(ticker, ATTR_NAME),
                sector: attr(ticker, ATTR_SECTOR),
                industry: attr(ticker, ATTR_INDUSTRY),
                exchange: attr(ticker, ATTR_EXCHANGE),
                observations: panel
                    .column(ticker)
                    .map_or(0, |c| c.iter().filter(|p| !p.is_nan()).count()),
            }
        })
        .filter(|row| match &needle {
            Some(n) => row.ticker.to_lowercase().contains(n) || row.name.to_lowercase().contains(n),
            None => true,
        })
        .collect()
}

/// Execute the tickers command.
pub fn execute(args: TickersArgs, session: &Session) -> Result<()> {
    let cache = session.open_data();
    let panel = session.load_prices(&cache)?;
    let metadata = cache.metadata()?;

    let rows = ticker_rows(&panel, &metadata, args.filter.as_deref());

    match session.format {
        OutputFormat::Minimal => println!("{}", rows.len()),
        format => {
            session.header(&format!("Tickers ({} of {})", rows.len(), panel.n_tickers()));
            print_output(&rows, format)?;
        }
    }
    Ok(())
}
