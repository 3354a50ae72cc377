//! Bond command implementation.
//!
//! Daily 10-year yields are resampled to month-end and priced as a
//! constant-maturity par bond: each month earns the prior yield's carry plus
//! the duration and convexity effect of the yield change.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;

use auric_analytics::prelude::*;
use auric_core::prelude::*;
use auric_ext_file::{save_bond_returns, CsvYieldSource};

use crate::cli::OutputFormat;
use crate::commands::{headline, Context};
use crate::config::RunConfig;
use crate::output::{print_header, print_output, print_success, print_table, tail, BondRow, KeyValue};

/// Arguments for the bond command.
#[derive(Args, Debug, Default)]
pub struct BondArgs {
    /// Daily yield CSV with Date and YTM (percent) columns
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Monthly report to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maturity of the constant-maturity bond in years
    #[arg(short, long)]
    pub maturity: Option<f64>,

    /// Yields at or below this level earn no return
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Only display the last N months
    #[arg(long, value_name = "N")]
    pub last: Option<usize>,

    /// Compute and display without writing the report
    #[arg(long)]
    pub no_save: bool,
}

impl BondArgs {
    /// Applies command-line overrides to a configuration.
    pub fn apply(&self, config: &mut RunConfig) {
        if let Some(ref input) = self.input {
            config.files.bond_input = input.clone();
        }
        if let Some(ref output) = self.output {
            config.files.bond_output = output.clone();
        }
        if let Some(maturity) = self.maturity {
            config.bond.maturity_years = maturity;
        }
        if let Some(epsilon) = self.epsilon {
            config.bond.epsilon = epsilon;
        }
    }
}

/// Loads daily yields and computes monthly bond returns.
pub fn compute(config: &RunConfig) -> Result<BondReturns> {
    let model = config.bond.model()?;

    let path = &config.files.bond_input;
    let raw = CsvYieldSource::new(path)
        .with_decimals(config.bond.ytm_decimals)
        .load()
        .with_context(|| format!("loading yields from {}", path.display()))?;

    let monthly = resample_monthly(&raw, config.bond.aggregation)?;
    tracing::debug!(
        "{} months of yields, maturity {}y",
        monthly.len(),
        model.maturity_years()
    );

    Ok(model.returns(&monthly))
}

/// Execute the bond command.
pub fn execute(args: BondArgs, ctx: &Context) -> Result<()> {
    let mut config = ctx.config.clone();
    args.apply(&mut config);

    let returns = compute(&config)?;
    if !args.no_save {
        save_bond_returns(&config.files.bond_output, &returns)?;
    }

    let rows: Vec<BondRow> = tail(returns.records(), args.last)
        .iter()
        .map(BondRow::from)
        .collect();

    match ctx.format {
        OutputFormat::Minimal => println!("{}", headline(returns.final_cumulative())),
        format => {
            if ctx.chatty() {
                print_header("Bond Monthly Returns");
            }
            print_output(&rows, format)?;
        }
    }

    if ctx.chatty() {
        let records = returns.records();
        let summary = vec![
            KeyValue::new("Months", records.len().to_string()),
            KeyValue::new("Maturity (years)", config.bond.maturity_years.to_string()),
            KeyValue::from_opt("Latest YTM", records.last().map(|r| r.ytm)),
            KeyValue::from_opt("Latest Duration", records.last().and_then(|r| r.modified_duration)),
            KeyValue::from_opt("Cumulative Return", returns.final_cumulative()),
        ];
        print_table(&summary)?;
        if !args.no_save {
            print_success(&format!("Wrote {}", config.files.bond_output.display()));
        }
    }

    Ok(())
}
