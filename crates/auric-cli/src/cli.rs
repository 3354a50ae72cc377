//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{BondArgs, ConfigArgs, GoldArgs, RatioArgs, RunArgs};

/// Auric - Gold versus 10-year government bond relative strength
#[derive(Parser)]
#[command(name = "auric")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Configuration file (defaults to ./auric.toml when present)
    #[arg(short, long, global = true, env = "AURIC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Monthly gold returns from daily closing prices
    Gold(GoldArgs),

    /// Monthly bond total returns from daily 10-year yields
    Bond(BondArgs),

    /// Rebased gold/bond ratio and its moving average from two return reports
    Ratio(RatioArgs),

    /// Run gold, bond and ratio in one pass
    Run(RunArgs),

    /// Show or create the configuration file
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
    /// Minimal output (just the final value)
    Minimal,
}
