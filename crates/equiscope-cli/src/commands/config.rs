//! Config command implementation.
//!
//! Shows the effective configuration or writes a default `equiscope.toml`.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::commands::Session;
use crate::config::{AppConfig, DEFAULT_CONFIG_FILE};
use crate::error::CliError;
use crate::output::{print_json, print_success};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration (file, env and flags combined)
    Show,

    /// Write a configuration file with default settings
    Init(InitArgs),
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the file
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, session: &Session) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(session),
        ConfigCommand::Init(init_args) => init(&init_args, session),
    }
}

fn show(session: &Session) -> Result<()> {
    match session.format {
        OutputFormat::Json => print_json(&session.config)?,
        _ => print!("{}", session.config.to_toml()?),
    }
    Ok(())
}

fn init(args: &InitArgs, session: &Session) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            args.path.display()
        ))
        .into());
    }

    let text = AppConfig::default().to_toml()?;
    std::fs::write(&args.path, text).map_err(CliError::from)?;

    if !session.quiet {
        print_success(&format!("Wrote {}", args.path.display()));
    }
    Ok(())
}
