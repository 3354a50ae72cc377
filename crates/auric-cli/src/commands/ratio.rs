//! Ratio command implementation.
//!
//! Reads the cumulative return columns of a gold and a bond report, joins
//! them on date and writes the rebased ratio with its moving average.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;

use auric_analytics::prelude::*;
use auric_core::types::CumulativeReturn;
use auric_ext_file::{load_report_pair, save_ratio};

use crate::cli::OutputFormat;
use crate::commands::{headline, Context};
use crate::config::RunConfig;
use crate::output::{
    print_header, print_output, print_success, print_table, print_warning, tail, KeyValue,
    RatioRow,
};

/// Arguments for the ratio command.
#[derive(Args, Debug, Default)]
pub struct RatioArgs {
    /// Gold report with a "Cumul Monthly Returns" column
    #[arg(short, long)]
    pub gold: Option<PathBuf>,

    /// Bond report with a "Cumul Monthly Returns" column
    #[arg(short, long)]
    pub bonds: Option<PathBuf>,

    /// Ratio report to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Moving average window in months
    #[arg(short, long)]
    pub window: Option<usize>,

    /// Treatment of undefined cumulative values: neutral or carry-forward
    #[arg(long)]
    pub missing: Option<MissingValuePolicy>,

    /// Only display the last N months
    #[arg(long, value_name = "N")]
    pub last: Option<usize>,

    /// Compute and display without writing the report
    #[arg(long)]
    pub no_save: bool,
}

impl RatioArgs {
    /// Applies command-line overrides to a configuration.
    pub fn apply(&self, config: &mut RunConfig) {
        if let Some(ref gold) = self.gold {
            config.files.gold_output = gold.clone();
        }
        if let Some(ref bonds) = self.bonds {
            config.files.bond_output = bonds.clone();
        }
        if let Some(ref output) = self.output {
            config.files.ratio_output = output.clone();
        }
        if let Some(window) = self.window {
            config.ratio.window = window;
        }
        if let Some(missing) = self.missing {
            config.ratio.missing = missing;
        }
    }
}

/// Composes the ratio from two cumulative return series.
pub fn compose(
    config: &RunConfig,
    gold: &[CumulativeReturn],
    bonds: &[CumulativeReturn],
) -> Result<Vec<RatioPoint>> {
    let composer = config.ratio.composer()?;
    let points = composer.compose(gold, bonds)?;
    tracing::debug!(
        "{} gold and {} bond months joined into {} ratio points",
        gold.len(),
        bonds.len(),
        points.len()
    );
    Ok(points)
}

/// Prints ratio rows and, in table mode, a summary.
pub(crate) fn report(points: &[RatioPoint], last: Option<usize>, ctx: &Context) -> Result<()> {
    let rows: Vec<RatioRow> = tail(points, last).iter().map(RatioRow::from).collect();

    match ctx.format {
        OutputFormat::Minimal => println!("{}", headline(points.last().map(|p| p.ratio))),
        format => {
            if ctx.chatty() {
                print_header("Gold / Bond Ratio");
            }
            print_output(&rows, format)?;
        }
    }

    if ctx.chatty() {
        let latest = points.last();
        let summary = vec![
            KeyValue::new("Months", points.len().to_string()),
            KeyValue::new("Latest", latest.map(|p| p.date.to_string()).unwrap_or_default()),
            KeyValue::from_opt("Ratio", latest.map(|p| p.ratio)),
            KeyValue::from_opt("Moving Average", latest.and_then(|p| p.moving_average)),
        ];
        print_table(&summary)?;
    }
    Ok(())
}

/// Execute the ratio command.
pub fn execute(args: RatioArgs, ctx: &Context) -> Result<()> {
    let mut config = ctx.config.clone();
    args.apply(&mut config);

    let (gold, bonds) = load_report_pair(&config.files.gold_output, &config.files.bond_output)
        .context("loading return reports")?;
    let points = compose(&config, &gold, &bonds)?;

    if points.len() < config.ratio.window && !ctx.quiet {
        print_warning(&format!(
            "only {} joined months, the {}-month moving average is undefined",
            points.len(),
            config.ratio.window
        ));
    }

    if !args.no_save {
        save_ratio(&config.files.ratio_output, &points)?;
    }

    report(&points, args.last, ctx)?;
    if ctx.chatty() && !args.no_save {
        print_success(&format!("Wrote {}", config.files.ratio_output.display()));
    }

    Ok(())
}
