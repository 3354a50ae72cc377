//! Error types for the Auric core.
//!
//! Structural problems with a series (bad dates, ordering, duplicates) are
//! reported here. Per-row value problems are not errors at this level; they
//! are filtered out by the loaders before a series is built.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Error in date parsing or an invalid calendar date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Observations are not in strictly increasing date order.
    #[error("Series is not ordered: {current} follows {previous}")]
    Unordered {
        /// Date of the preceding observation.
        previous: String,
        /// Date of the offending observation.
        current: String,
    },

    /// The same date appears more than once in a series.
    #[error("Duplicated date {date} in {series} series")]
    DuplicateDate {
        /// Name of the series holding the duplicate.
        series: String,
        /// The duplicated date.
        date: String,
    },

    /// A monthly series violates its one-observation-per-month shape.
    #[error("Invalid monthly series: {reason}")]
    InvalidMonthlySeries {
        /// Description of the violation.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an ordering error.
    #[must_use]
    pub fn unordered(previous: impl ToString, current: impl ToString) -> Self {
        Self::Unordered {
            previous: previous.to_string(),
            current: current.to_string(),
        }
    }

    /// Creates a duplicate date error.
    #[must_use]
    pub fn duplicate_date(series: impl Into<String>, date: impl ToString) -> Self {
        Self::DuplicateDate {
            series: series.into(),
            date: date.to_string(),
        }
    }

    /// Creates a monthly series shape error.
    #[must_use]
    pub fn invalid_monthly(reason: impl Into<String>) -> Self {
        Self::InvalidMonthlySeries {
            reason: reason.into(),
        }
    }
}
