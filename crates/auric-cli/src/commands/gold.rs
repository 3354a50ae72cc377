//! Gold command implementation.
//!
//! Daily closes are resampled to the first observation of each month and
//! turned into monthly changes and compounded growth.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;

use auric_analytics::prelude::*;
use auric_core::prelude::*;
use auric_ext_file::{save_gold_returns, CsvPriceSource};

use crate::cli::OutputFormat;
use crate::commands::{headline, Context};
use crate::config::RunConfig;
use crate::output::{print_header, print_output, print_success, print_table, tail, GoldRow, KeyValue};

/// Arguments for the gold command.
#[derive(Args, Debug, Default)]
pub struct GoldArgs {
    /// Daily price CSV with Date and Close columns
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Monthly report to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Ignore prices before this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub start_date: Option<Date>,

    /// Only display the last N months
    #[arg(long, value_name = "N")]
    pub last: Option<usize>,

    /// Compute and display without writing the report
    #[arg(long)]
    pub no_save: bool,
}

impl GoldArgs {
    /// Applies command-line overrides to a configuration.
    pub fn apply(&self, config: &mut RunConfig) {
        if let Some(ref input) = self.input {
            config.files.gold_input = input.clone();
        }
        if let Some(ref output) = self.output {
            config.files.gold_output = output.clone();
        }
        if let Some(start) = self.start_date {
            config.gold.start_date = Some(start);
        }
    }
}

/// Loads daily prices and computes monthly gold returns.
pub fn compute(config: &RunConfig) -> Result<PriceReturns> {
    let path = &config.files.gold_input;
    let raw = CsvPriceSource::new(path)
        .load()
        .with_context(|| format!("loading gold prices from {}", path.display()))?;

    let raw = match config.gold.start_date {
        Some(start) => {
            let kept = raw.filter_from(start);
            tracing::debug!("{} of {} daily prices on or after {start}", kept.len(), raw.len());
            kept
        }
        None => raw,
    };

    let monthly = resample_monthly(&raw, config.gold.aggregation)?;
    Ok(price_returns(&monthly))
}

/// Execute the gold command.
pub fn execute(args: GoldArgs, ctx: &Context) -> Result<()> {
    let mut config = ctx.config.clone();
    args.apply(&mut config);

    let returns = compute(&config)?;
    if !args.no_save {
        save_gold_returns(&config.files.gold_output, &returns)?;
    }

    let rows: Vec<GoldRow> = tail(returns.records(), args.last)
        .iter()
        .map(GoldRow::from)
        .collect();

    match ctx.format {
        OutputFormat::Minimal => println!("{}", headline(returns.final_cumulative())),
        format => {
            if ctx.chatty() {
                print_header("Gold Monthly Returns");
            }
            print_output(&rows, format)?;
        }
    }

    if ctx.chatty() {
        let records = returns.records();
        let summary = vec![
            KeyValue::new("Months", records.len().to_string()),
            KeyValue::new("First", records.first().map(|r| r.date.to_string()).unwrap_or_default()),
            KeyValue::new("Last", records.last().map(|r| r.date.to_string()).unwrap_or_default()),
            KeyValue::from_opt("Cumulative Return", returns.final_cumulative()),
        ];
        print_table(&summary)?;
        if !args.no_save {
            print_success(&format!("Wrote {}", config.files.gold_output.display()));
        }
    }

    Ok(())
}
