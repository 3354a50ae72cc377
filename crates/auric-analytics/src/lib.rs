//! # Auric Analytics
//!
//! Monthly return analytics for gold and a constant-maturity government bond.
//!
//! - **Resample**: calendar-month resampling with forward-fill
//! - **Returns**: simple and compounded price returns
//! - **Bond**: closed-form duration and convexity, carry plus price-effect returns
//! - **Ratio**: rebased relative strength with a trailing moving average
//!
//! ## Usage
//!
//! ```rust
//! use auric_analytics::prelude::*;
//! use auric_core::types::{Date, Observation, TimeSeries};
//!
//! let raw = TimeSeries::from_unsorted(vec![
//!     Observation::new(Date::from_ymd(2024, 1, 10).unwrap(), 0.041),
//!     Observation::new(Date::from_ymd(2024, 2, 12).unwrap(), 0.043),
//! ]);
//! let monthly = resample_monthly(&raw, Aggregation::Last).unwrap();
//! let bonds = BondModel::default().returns(&monthly);
//! assert_eq!(bonds.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;

pub use error::{AnalyticsError, AnalyticsResult};

pub mod bond;
pub mod ratio;
pub mod resample;
pub mod returns;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bond::{
        convexity, modified_duration, monthly_yield, period_return, BondModel, BondPeriod,
        BondReturns, Sensitivity, DEFAULT_MATURITY_YEARS, DEFAULT_YIELD_EPSILON,
    };
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::ratio::{
        ensure_unique_dates, trailing_mean, MissingValuePolicy, RatioComposer, RatioConfig,
        RatioPoint, DEFAULT_MA_WINDOW,
    };
    pub use crate::resample::{resample_monthly, Aggregation};
    pub use crate::returns::{price_returns, simple_change, PriceReturn, PriceReturns};
}
