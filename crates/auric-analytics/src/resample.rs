//! Calendar-month resampling.
//!
//! Turns an irregular daily or intraday series into one observation per
//! calendar month. Every month between the first and the last observation is
//! present; months without data repeat the previous month's value.
//!
//! Each output observation is labelled with its month-end date, so series
//! resampled from different sources line up on the same dates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use auric_core::types::{MonthlySeries, Observation, TimeSeries};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Which observation represents a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// First observation of the month (used for gold closes).
    First,
    /// Last observation of the month (used for yields).
    #[default]
    Last,
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aggregation::First => write!(f, "first"),
            Aggregation::Last => write!(f, "last"),
        }
    }
}

impl FromStr for Aggregation {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(Aggregation::First),
            "last" => Ok(Aggregation::Last),
            other => Err(AnalyticsError::InvalidInput(format!(
                "unknown aggregation '{other}', expected 'first' or 'last'"
            ))),
        }
    }
}

/// Resamples an ordered series to calendar months.
///
/// # Arguments
///
/// * `series` - Ordered, duplicate-free observations
/// * `aggregation` - Whether the first or last observation of a month is kept
///
/// # Returns
///
/// A gap-free monthly series labelled with month-end dates. Empty input gives
/// an empty series.
pub fn resample_monthly(
    series: &TimeSeries,
    aggregation: Aggregation,
) -> AnalyticsResult<MonthlySeries> {
    let picked = pick_per_month(series, aggregation);

    let (Some(first), Some(last)) = (picked.first(), picked.last()) else {
        return Ok(MonthlySeries::default());
    };

    let span = last.date.month_index() - first.date.month_index() + 1;
    let mut monthly = Vec::with_capacity(usize::try_from(span).unwrap_or(picked.len()));
    let mut filled = 0usize;

    let mut cursor = first.date;
    let mut carried = first.value;
    let mut raw = picked.iter().peekable();

    while cursor <= last.date {
        match raw.peek() {
            Some(obs) if obs.date == cursor => {
                carried = obs.value;
                raw.next();
            }
            _ => filled += 1,
        }
        monthly.push(Observation::new(cursor, carried));
        cursor = cursor.next_month_end()?;
    }

    log::debug!(
        "resampled {} observations into {} months ({} forward-filled, aggregation={})",
        series.len(),
        monthly.len(),
        filled,
        aggregation
    );

    Ok(MonthlySeries::new(monthly)?)
}

/// One observation per month that has data, relabelled to the month end.
fn pick_per_month(series: &TimeSeries, aggregation: Aggregation) -> Vec<Observation> {
    let mut picked: Vec<Observation> = Vec::new();

    for obs in series {
        let month_end = obs.date.end_of_month();
        match picked.last_mut() {
            Some(current) if current.date == month_end => {
                if aggregation == Aggregation::Last {
                    current.value = obs.value;
                }
            }
            _ => picked.push(Observation::new(month_end, obs.value)),
        }
    }

    picked
}
