//! # Auric Core
//!
//! Core types and abstractions for comparing gold and government bond
//! returns month by month.
//!
//! - **Types**: `Date`, `Observation`, `CumulativeReturn`, `TimeSeries`, `MonthlySeries`
//! - **Traits**: `SeriesSource` for anything that yields raw observations
//!
//! ## Example
//!
//! ```rust
//! use auric_core::prelude::*;
//!
//! let series = TimeSeries::from_unsorted(vec![
//!     Observation::new(Date::from_ymd(2024, 1, 3).unwrap(), 2050.0),
//!     Observation::new(Date::from_ymd(2024, 1, 2).unwrap(), 2060.0),
//! ]);
//! assert_eq!(series.first().unwrap().value, 2060.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::traits::SeriesSource;
    pub use crate::types::{CumulativeReturn, Date, MonthlySeries, Observation, TimeSeries};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{CumulativeReturn, Date, MonthlySeries, Observation, TimeSeries};
