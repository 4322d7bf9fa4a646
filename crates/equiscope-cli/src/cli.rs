//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::commands::{
    ConfigArgs, PortfolioArgs, PricesArgs, RebalanceArgs, StressArgs, TickersArgs, VolTargetArgs,
};

/// Equiscope - Equity price exploration and portfolio analytics CLI
#[derive(Parser)]
#[command(name = "equiscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Long-format price CSV (Date, Ticker, Price Close)
    #[arg(long, env = "EQUISCOPE_PRICES", global = true)]
    pub prices: Option<PathBuf>,

    /// Ticker metadata CSV (Ticker plus attribute columns)
    #[arg(long, env = "EQUISCOPE_METADATA", global = true)]
    pub metadata: Option<PathBuf>,

    /// Configuration file (defaults to ./equiscope.toml when present)
    #[arg(long, env = "EQUISCOPE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// List tickers in the price panel with their metadata
    Tickers(TickersArgs),

    /// Show the price history of one ticker
    Prices(PricesArgs),

    /// Buy-and-hold portfolio NAV, metrics and benchmark comparison
    Portfolio(PortfolioArgs),

    /// Monthly rebalanced portfolio against buy-and-hold
    Rebalance(RebalanceArgs),

    /// Volatility-targeted overlay on the buy-and-hold portfolio
    VolTarget(VolTargetArgs),

    /// Market stress indicator from a reference ticker
    Stress(StressArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the headline value)
    Minimal,
}

impl Cli {
    /// Default log filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
