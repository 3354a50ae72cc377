//! Run configuration.
//!
//! Settings come from a TOML file with four optional tables. Every key has a
//! default, so an empty file (or no file at all) reproduces the standard run:
//!
//! ```toml
//! [files]
//! gold_input = "xauusd_m.csv"
//! bond_input = "DGS10.csv"
//! gold_output = "gold_monthly_returns.csv"
//! bond_output = "bonds_monthly_returns.csv"
//! ratio_output = "ratio_monthly.csv"
//!
//! [gold]
//! start_date = "1961-01-01"
//! aggregation = "first"
//!
//! [bond]
//! maturity_years = 10.0
//! epsilon = 1e-6
//! aggregation = "last"
//! ytm_decimals = 4
//!
//! [ratio]
//! window = 84
//! missing = "neutral"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use auric_analytics::prelude::*;
use auric_core::types::Date;

use crate::error::{CliError, CliResult};

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "auric.toml";

/// Complete run configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Input and output paths.
    pub files: FileSettings,
    /// Gold series settings.
    pub gold: GoldSettings,
    /// Bond series settings.
    pub bond: BondSettings,
    /// Ratio settings.
    pub ratio: RatioSettings,
}

/// Input and output paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSettings {
    /// Daily gold prices.
    pub gold_input: PathBuf,
    /// Daily 10-year yields in percent.
    pub bond_input: PathBuf,
    /// Monthly gold report.
    pub gold_output: PathBuf,
    /// Monthly bond report.
    pub bond_output: PathBuf,
    /// Ratio report.
    pub ratio_output: PathBuf,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            gold_input: PathBuf::from("xauusd_m.csv"),
            bond_input: PathBuf::from("DGS10.csv"),
            gold_output: PathBuf::from("gold_monthly_returns.csv"),
            bond_output: PathBuf::from("bonds_monthly_returns.csv"),
            ratio_output: PathBuf::from("ratio_monthly.csv"),
        }
    }
}

/// Gold series settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GoldSettings {
    /// Daily prices before this date are ignored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,
    /// Observation kept per month.
    pub aggregation: Aggregation,
}

impl Default for GoldSettings {
    fn default() -> Self {
        Self {
            start_date: Date::from_ymd(1961, 1, 1).ok(),
            aggregation: Aggregation::First,
        }
    }
}

/// Bond series settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BondSettings {
    /// Maturity of the synthetic constant-maturity bond in years.
    pub maturity_years: f64,
    /// Yields at or below this value have no sensitivity.
    pub epsilon: f64,
    /// Observation kept per month.
    pub aggregation: Aggregation,
    /// Decimal places kept from the percent quote.
    pub ytm_decimals: u32,
}

impl Default for BondSettings {
    fn default() -> Self {
        Self {
            maturity_years: DEFAULT_MATURITY_YEARS,
            epsilon: DEFAULT_YIELD_EPSILON,
            aggregation: Aggregation::Last,
            ytm_decimals: auric_ext_file::DEFAULT_YTM_DECIMALS,
        }
    }
}

impl BondSettings {
    /// Builds the bond model these settings describe.
    pub fn model(&self) -> AnalyticsResult<BondModel> {
        BondModel::new(self.maturity_years, self.epsilon)
    }
}

/// Ratio settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RatioSettings {
    /// Moving average window in months.
    pub window: usize,
    /// Resolution of undefined cumulative values.
    pub missing: MissingValuePolicy,
}

impl Default for RatioSettings {
    fn default() -> Self {
        Self {
            window: DEFAULT_MA_WINDOW,
            missing: MissingValuePolicy::Neutral,
        }
    }
}

impl RatioSettings {
    /// Builds the ratio composer these settings describe.
    pub fn composer(&self) -> AnalyticsResult<RatioComposer> {
        RatioComposer::new(RatioConfig {
            window: self.window,
            missing: self.missing,
            ..RatioConfig::default()
        })
    }
}

impl RunConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml(content: &str, origin: &Path) -> CliResult<Self> {
        toml::from_str(content).map_err(|source| CliError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Loads a configuration file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Err(CliError::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content, path)
    }

    /// Finds the configuration file for a run.
    ///
    /// An explicit path is always returned, whether or not it exists.
    /// Without one, `auric.toml` in the working directory is used when present.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                fallback.exists().then(|| fallback.to_path_buf())
            }
        }
    }

    /// Resolves the configuration for a run, falling back to the defaults.
    pub fn resolve(explicit: Option<&Path>) -> CliResult<Self> {
        match Self::locate(explicit) {
            Some(path) => {
                tracing::debug!("loading configuration from {}", path.display());
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
