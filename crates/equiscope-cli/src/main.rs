//! Equiscope CLI - Command-line interface for equity price exploration and
//! portfolio analytics.
//!
//! # Usage
//!
//! ```bash
//! # Browse tickers
//! equiscope --prices data/sp500.csv --metadata data/metadata.csv tickers apple
//!
//! # Price history
//! equiscope prices MSFT.OQ --start 2023-01-01
//!
//! # 60/30 portfolio against SPY, grouped by sector
//! equiscope portfolio AAPL.OQ=60 MSFT.OQ=30 --start 2022-01-01 --by Sector
//!
//! # Strategy overlays and market stress
//! equiscope rebalance AAPL.OQ=60 MSFT.OQ=30
//! equiscope vol-target AAPL.OQ=60 MSFT.OQ=30 --target 0.12
//! equiscope stress SPY
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Session;
use config::AppConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();

    let config = AppConfig::resolve(cli.config.as_deref(), cli.prices, cli.metadata)?;
    let session = Session {
        format: cli.format,
        quiet: cli.quiet,
        config,
    };

    // Execute command
    match cli.command {
        Commands::Tickers(args) => commands::tickers::execute(args, &session)?,
        Commands::Prices(args) => commands::prices::execute(args, &session)?,
        Commands::Portfolio(args) => commands::portfolio::execute(args, &session)?,
        Commands::Rebalance(args) => commands::rebalance::execute(args, &session)?,
        Commands::VolTarget(args) => commands::vol_target::execute(args, &session)?,
        Commands::Stress(args) => commands::stress::execute(args, &session)?,
        Commands::Config(args) => commands::config::execute(args, &session)?,
    }

    Ok(())
}
