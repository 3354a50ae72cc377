//! Error types for the analytics engine.

use auric_core::CoreError;
use thiserror::Error;

/// Unified error type for all analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Invalid input parameter
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Parameter outside its valid range
    #[error("{name} value {value} is invalid: {reason}")]
    InvalidParameter {
        /// Name of the parameter.
        name: String,
        /// The value that was provided.
        value: f64,
        /// Why the value was rejected.
        reason: String,
    },

    /// General calculation failure
    #[error("calculation failed: {0}")]
    CalculationFailed(String),

    /// Structural problem with an input series
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl AnalyticsError {
    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(name: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value,
            reason: reason.into(),
        }
    }
}

/// Result type alias for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
