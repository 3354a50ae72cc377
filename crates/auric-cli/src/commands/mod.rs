//! CLI command implementations.

pub mod bond;
pub mod config;
pub mod gold;
pub mod ratio;
pub mod run;

// Re-export submodules for convenience
pub use bond::BondArgs;
pub use config::ConfigArgs;
pub use gold::GoldArgs;
pub use ratio::RatioArgs;
pub use run::RunArgs;

use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::config::RunConfig;

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output format for stdout.
    pub format: OutputFormat,
    /// Suppress headers, summaries and status lines.
    pub quiet: bool,
    /// Effective configuration before command-line overrides.
    pub config: RunConfig,
    /// File the configuration was read from, if any.
    pub config_source: Option<PathBuf>,
}

impl Context {
    /// Whether decorations around the data should be printed.
    pub fn chatty(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Table
    }
}

/// Formats an optional value for a headline line.
pub(crate) fn headline(value: Option<f64>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| format!("{v:.5}"))
}
