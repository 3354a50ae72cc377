//! Auric CLI - monthly gold and bond returns and their relative strength.
//!
//! # Usage
//!
//! ```bash
//! # Monthly gold returns from daily closes
//! auric gold --input xauusd_m.csv --start-date 1961-01-01
//!
//! # Monthly 10-year bond returns from daily yields
//! auric bond --input DGS10.csv --maturity 10
//!
//! # Ratio of the two cumulative series with an 84-month average
//! auric ratio --gold gold_monthly_returns.csv --bonds bonds_monthly_returns.csv
//!
//! # Everything at once, driven by auric.toml
//! auric run --output-dir reports
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;
use config::RunConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::print_error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(verbose: bool, quiet: bool) {
    let default = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config_source = RunConfig::locate(cli.config.as_deref());
    let config = RunConfig::resolve(config_source.as_deref())?;
    tracing::debug!("effective configuration: {config:?}");

    let ctx = Context {
        format: cli.format,
        quiet: cli.quiet,
        config,
        config_source,
    };

    match cli.command {
        Commands::Gold(args) => commands::gold::execute(args, &ctx)?,
        Commands::Bond(args) => commands::bond::execute(args, &ctx)?,
        Commands::Ratio(args) => commands::ratio::execute(args, &ctx)?,
        Commands::Run(args) => commands::run::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}
