//! Core abstractions.

use crate::types::TimeSeries;

/// A source of raw dated observations.
///
/// Implementations are responsible for cleaning: rows with missing or
/// unparseable values are dropped and the result is ordered and
/// duplicate-free.
pub trait SeriesSource {
    /// Error raised when the source cannot be read.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Short name of the series, used in logs and error messages.
    fn name(&self) -> &str;

    /// Loads the full series.
    fn load(&self) -> Result<TimeSeries, Self::Error>;
}
