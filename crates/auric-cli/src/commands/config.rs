//! Config command implementation.
//!
//! Shows the effective configuration or writes a default `auric.toml`.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::config::{RunConfig, DEFAULT_CONFIG_FILE};
use crate::error::CliError;
use crate::output::{print_header, print_json, print_success};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write a configuration file with every default spelled out
    Init(InitArgs),

    /// Show which configuration file is in use
    Path,
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// File to create
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Init(init_args) => init(init_args, ctx),
        ConfigCommand::Path => {
            match &ctx.config_source {
                Some(path) => println!("{}", path.display()),
                None => println!("(defaults, no {DEFAULT_CONFIG_FILE} found)"),
            }
            Ok(())
        }
    }
}

fn show(ctx: &Context) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => print_json(&ctx.config),
        _ => {
            if ctx.chatty() {
                print_header("Configuration");
            }
            print!("{}", ctx.config.to_toml()?);
            Ok(())
        }
    }
}

fn init(args: InitArgs, ctx: &Context) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(CliError::AlreadyExists(args.path).into());
    }
    std::fs::write(&args.path, RunConfig::default().to_toml()?)?;
    if !ctx.quiet {
        print_success(&format!("Wrote {}", args.path.display()));
    }
    Ok(())
}
