//! Dated observations.

use serde::{Deserialize, Serialize};

use super::Date;

/// A single dated value: a closing price or an annualised yield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Observation date.
    pub date: Date,
    /// Observed value.
    pub value: f64,
}

impl Observation {
    /// Creates a new observation.
    #[must_use]
    pub fn new(date: Date, value: f64) -> Self {
        Self { date, value }
    }
}

/// A point of a cumulative return series.
///
/// `value` is `None` where no return is defined yet, e.g. the first month of
/// a price series. Consumers decide how to resolve it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CumulativeReturn {
    /// Period date.
    pub date: Date,
    /// Compounded growth of one unit, if defined.
    pub value: Option<f64>,
}

impl CumulativeReturn {
    /// Creates a new cumulative return point.
    #[must_use]
    pub fn new(date: Date, value: Option<f64>) -> Self {
        Self { date, value }
    }
}
