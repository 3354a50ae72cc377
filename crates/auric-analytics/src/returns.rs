//! Price returns for a monthly price series (gold).
//!
//! ```text
//! change[i]     = price[i] / price[i-1] - 1        (i > 0)
//! cumulative[i] = Π (1 + change[k]),  k = 1..=i
//! ```
//!
//! The first month has no change and no cumulative value. A month whose
//! change cannot be computed (zero previous price) also reports `None`, and
//! the running product carries on as if that month were flat.

use serde::Serialize;

use auric_core::types::{CumulativeReturn, Date, MonthlySeries};

/// Return record for one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceReturn {
    /// Month-end date.
    pub date: Date,
    /// Price selected for the month.
    pub price: f64,
    /// Simple change from the previous month.
    pub change: Option<f64>,
    /// Compounded growth since the first month.
    pub cumulative: Option<f64>,
}

/// Monthly price returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceReturns {
    records: Vec<PriceReturn>,
}

impl PriceReturns {
    /// Per-month records in date order.
    #[must_use]
    pub fn records(&self) -> &[PriceReturn] {
        &self.records
    }

    /// Number of months.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no months.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cumulative values as a stand-alone series.
    #[must_use]
    pub fn cumulative_series(&self) -> Vec<CumulativeReturn> {
        self.records
            .iter()
            .map(|r| CumulativeReturn::new(r.date, r.cumulative))
            .collect()
    }

    /// Last defined cumulative value.
    #[must_use]
    pub fn final_cumulative(&self) -> Option<f64> {
        self.records.iter().rev().find_map(|r| r.cumulative)
    }
}

/// Simple change between two prices.
///
/// Returns `None` when the ratio is not a finite number.
#[must_use]
pub fn simple_change(previous: f64, current: f64) -> Option<f64> {
    let ratio = current / previous;
    ratio.is_finite().then(|| ratio - 1.0)
}

/// Computes monthly changes and compounded growth for a price series.
#[must_use]
pub fn price_returns(series: &MonthlySeries) -> PriceReturns {
    let mut records = Vec::with_capacity(series.len());
    let mut previous: Option<f64> = None;
    let mut growth = 1.0;

    for obs in series {
        let change = previous.and_then(|p| simple_change(p, obs.value));
        let cumulative = change.map(|c| {
            growth *= 1.0 + c;
            growth
        });

        if previous.is_some() && change.is_none() {
            log::warn!("no price change defined for {} (previous price is zero)", obs.date);
        }

        records.push(PriceReturn {
            date: obs.date,
            price: obs.value,
            change,
            cumulative,
        });
        previous = Some(obs.value);
    }

    PriceReturns { records }
}
