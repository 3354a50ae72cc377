//! Domain types for monthly return series.
//!
//! - [`Date`]: Calendar date with month-end arithmetic
//! - [`Observation`]: Dated price or yield
//! - [`CumulativeReturn`]: Dated compounded growth, possibly undefined
//! - [`TimeSeries`]: Ordered, duplicate-free observations
//! - [`MonthlySeries`]: One observation per month, no gaps

mod date;
mod observation;
mod series;

pub use date::Date;
pub use observation::{CumulativeReturn, Observation};
pub use series::{MonthlySeries, TimeSeries};
