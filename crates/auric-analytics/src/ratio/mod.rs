//! Relative strength between two cumulative return series.
//!
//! Both series are joined on date (dates present in both), the ratio of
//! their cumulative growth is rebased to 100 on the first joined date and a
//! trailing moving average is laid over it. The default window of 84 months
//! is seven years of monthly data.

mod moving_average;

pub use moving_average::trailing_mean;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use auric_core::types::{CumulativeReturn, Date};
use auric_core::CoreError;

use crate::error::{AnalyticsError, AnalyticsResult};

/// Default moving average window in months.
pub const DEFAULT_MA_WINDOW: usize = 84;

/// Base value of the rebased ratio.
pub const RATIO_BASE: f64 = 100.0;

/// How undefined cumulative values are resolved before dividing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingValuePolicy {
    /// Always use 1.0, i.e. "no growth yet".
    #[default]
    Neutral,
    /// Repeat the last defined value, falling back to 1.0 before any.
    CarryForward,
}

impl fmt::Display for MissingValuePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingValuePolicy::Neutral => write!(f, "neutral"),
            MissingValuePolicy::CarryForward => write!(f, "carry-forward"),
        }
    }
}

impl FromStr for MissingValuePolicy {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "neutral" => Ok(MissingValuePolicy::Neutral),
            "carry-forward" | "carry_forward" | "ffill" => Ok(MissingValuePolicy::CarryForward),
            other => Err(AnalyticsError::InvalidInput(format!(
                "unknown missing value policy '{other}'"
            ))),
        }
    }
}

/// Ratio composition settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioConfig {
    /// Moving average window in periods.
    pub window: usize,
    /// Resolution of undefined cumulative values.
    pub missing: MissingValuePolicy,
    /// Name of the numerator series, used in errors.
    pub numerator_label: String,
    /// Name of the denominator series, used in errors.
    pub denominator_label: String,
}

impl Default for RatioConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_MA_WINDOW,
            missing: MissingValuePolicy::Neutral,
            numerator_label: "gold".to_string(),
            denominator_label: "bonds".to_string(),
        }
    }
}

/// One joined date of the ratio series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioPoint {
    /// Joined date.
    pub date: Date,
    /// Rebased ratio, 100 on the first date.
    pub ratio: f64,
    /// Trailing moving average of `ratio`.
    pub moving_average: Option<f64>,
}

/// Rejects a series that holds the same date twice.
pub fn ensure_unique_dates(label: &str, series: &[CumulativeReturn]) -> AnalyticsResult<()> {
    let mut seen = HashSet::with_capacity(series.len());
    for point in series {
        if !seen.insert(point.date) {
            return Err(CoreError::duplicate_date(label, point.date).into());
        }
    }
    Ok(())
}

/// Builds rebased relative strength series.
#[derive(Debug, Clone, Default)]
pub struct RatioComposer {
    config: RatioConfig,
}

impl RatioComposer {
    /// Creates a composer.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidParameter` for a zero window.
    pub fn new(config: RatioConfig) -> AnalyticsResult<Self> {
        if config.window == 0 {
            return Err(AnalyticsError::invalid_parameter(
                "window",
                0.0,
                "moving average window must be at least one period",
            ));
        }
        Ok(Self { config })
    }

    /// Composer settings.
    #[must_use]
    pub fn config(&self) -> &RatioConfig {
        &self.config
    }

    /// Composes `numerator / denominator`, rebased to 100.
    ///
    /// # Errors
    ///
    /// - `CoreError::DuplicateDate` if either input repeats a date
    /// - `AnalyticsError::CalculationFailed` on a zero denominator or a zero
    ///   first ratio
    pub fn compose(
        &self,
        numerator: &[CumulativeReturn],
        denominator: &[CumulativeReturn],
    ) -> AnalyticsResult<Vec<RatioPoint>> {
        ensure_unique_dates(&self.config.numerator_label, numerator)?;
        ensure_unique_dates(&self.config.denominator_label, denominator)?;

        let lookup: HashMap<Date, Option<f64>> =
            denominator.iter().map(|p| (p.date, p.value)).collect();

        let mut joined: Vec<(Date, Option<f64>, Option<f64>)> = numerator
            .iter()
            .filter_map(|p| lookup.get(&p.date).map(|d| (p.date, p.value, *d)))
            .collect();
        joined.sort_by_key(|(date, _, _)| *date);

        log::debug!(
            "joined {} of {} {} and {} {} dates",
            joined.len(),
            numerator.len(),
            self.config.numerator_label,
            denominator.len(),
            self.config.denominator_label
        );

        let num = self.resolve(joined.iter().map(|(_, n, _)| *n));
        let den = self.resolve(joined.iter().map(|(_, _, d)| *d));

        let mut raw = Vec::with_capacity(joined.len());
        for ((date, _, _), (n, d)) in joined.iter().zip(num.iter().zip(den.iter())) {
            if *d == 0.0 {
                return Err(AnalyticsError::CalculationFailed(format!(
                    "{} cumulative return is zero on {date}",
                    self.config.denominator_label
                )));
            }
            raw.push(n / d * RATIO_BASE);
        }

        let ratios = rebase(&raw)?;
        let averages = trailing_mean(&ratios, self.config.window);

        Ok(joined
            .iter()
            .zip(ratios.iter().zip(averages))
            .map(|((date, _, _), (ratio, moving_average))| RatioPoint {
                date: *date,
                ratio: *ratio,
                moving_average,
            })
            .collect())
    }

    /// Replaces missing and non-finite values according to the policy.
    fn resolve(&self, values: impl Iterator<Item = Option<f64>>) -> Vec<f64> {
        let mut last = 1.0;
        values
            .map(|v| match (v.filter(|x| x.is_finite()), self.config.missing) {
                (Some(v), _) => {
                    last = v;
                    v
                }
                (None, MissingValuePolicy::Neutral) => 1.0,
                (None, MissingValuePolicy::CarryForward) => last,
            })
            .collect()
    }
}

/// Rescales so the first value is exactly [`RATIO_BASE`].
fn rebase(raw: &[f64]) -> AnalyticsResult<Vec<f64>> {
    let Some(&first) = raw.first() else {
        return Ok(Vec::new());
    };
    if first == 0.0 || !first.is_finite() {
        return Err(AnalyticsError::CalculationFailed(format!(
            "cannot rebase a ratio series starting at {first}"
        )));
    }

    Ok(raw
        .iter()
        .enumerate()
        .map(|(i, v)| if i == 0 { RATIO_BASE } else { v / first * RATIO_BASE })
        .collect())
}
