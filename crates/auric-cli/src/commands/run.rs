//! Run command implementation.
//!
//! Computes gold and bond returns, writes both reports and composes the
//! ratio from the in-memory cumulative series.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use auric_ext_file::{save_bond_returns, save_gold_returns, save_ratio};

use crate::commands::{bond, gold, ratio, Context};
use crate::config::RunConfig;
use crate::output::{print_success, print_table, KeyValue};

/// Arguments for the run command.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Directory for the three reports (file names from the configuration)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Ignore gold prices before this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub start_date: Option<auric_core::Date>,

    /// Moving average window in months
    #[arg(short, long)]
    pub window: Option<usize>,

    /// Only display the last N ratio months
    #[arg(long, value_name = "N")]
    pub last: Option<usize>,

    /// Compute and display without writing any report
    #[arg(long)]
    pub no_save: bool,
}

impl RunArgs {
    /// Applies command-line overrides to a configuration.
    pub fn apply(&self, config: &mut RunConfig) {
        if let Some(ref dir) = self.output_dir {
            let files = &mut config.files;
            for path in [
                &mut files.gold_output,
                &mut files.bond_output,
                &mut files.ratio_output,
            ] {
                if let Some(joined) = path.file_name().map(|name| dir.join(name)) {
                    *path = joined;
                }
            }
        }
        if let Some(start) = self.start_date {
            config.gold.start_date = Some(start);
        }
        if let Some(window) = self.window {
            config.ratio.window = window;
        }
    }
}

/// Execute the run command.
pub fn execute(args: RunArgs, ctx: &Context) -> Result<()> {
    let mut config = ctx.config.clone();
    args.apply(&mut config);

    tracing::info!("gold: {}", config.files.gold_input.display());
    let gold_returns = gold::compute(&config)?;
    tracing::info!("bonds: {}", config.files.bond_input.display());
    let bond_returns = bond::compute(&config)?;

    let points = ratio::compose(
        &config,
        &gold_returns.cumulative_series(),
        &bond_returns.cumulative_series(),
    )?;

    let files = &config.files;
    if !args.no_save {
        save_gold_returns(&files.gold_output, &gold_returns)?;
        save_bond_returns(&files.bond_output, &bond_returns)?;
        save_ratio(&files.ratio_output, &points)?;
    }

    if ctx.chatty() {
        let summary = vec![
            KeyValue::new("Gold Months", gold_returns.len().to_string()),
            KeyValue::from_opt("Gold Cumulative", gold_returns.final_cumulative()),
            KeyValue::new("Bond Months", bond_returns.len().to_string()),
            KeyValue::from_opt("Bond Cumulative", bond_returns.final_cumulative()),
        ];
        print_table(&summary)?;
    }

    ratio::report(&points, args.last, ctx)?;

    if ctx.chatty() && !args.no_save {
        for path in [&files.gold_output, &files.bond_output, &files.ratio_output] {
            print_success(&format!("Wrote {}", path.display()));
        }
    }

    Ok(())
}
