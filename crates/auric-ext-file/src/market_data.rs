//! File-based market data sources.
//!
//! Both sources read a `Date` column plus one value column. Rows with a
//! blank, non-numeric or unparseable field are dropped and counted; the
//! surviving rows are sorted and de-duplicated by [`TimeSeries::from_unsorted`].

use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use auric_core::prelude::*;

use crate::error::{FileError, FileResult};

/// Name of the date column in every input file.
pub const DATE_COLUMN: &str = "Date";

/// Default price column of the gold file.
pub const CLOSE_COLUMN: &str = "Close";

/// Default yield column of the bond file.
pub const YTM_COLUMN: &str = "YTM";

/// Decimal places kept from quoted percent yields.
pub const DEFAULT_YTM_DECIMALS: u32 = 4;

// =============================================================================
// SHARED READER
// =============================================================================

/// Removes a UTF-8 byte order mark left on the first header.
pub(crate) fn strip_bom(header: &str) -> &str {
    header.trim_start_matches('\u{feff}')
}

/// A raw `(line, date, value)` cell pair.
struct RawRow {
    line: u64,
    date: String,
    value: String,
}

/// Reads the date and value columns of a CSV file as trimmed strings.
fn read_raw(path: &Path, value_column: &str) -> FileResult<Vec<RawRow>> {
    if !path.exists() {
        return Err(FileError::not_found(path));
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let position = |name: &str| {
        headers
            .iter()
            .position(|h| strip_bom(h) == name)
            .ok_or_else(|| FileError::missing_column(path, name))
    };
    let date_idx = position(DATE_COLUMN)?;
    let value_idx = position(value_column)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        rows.push(RawRow {
            line,
            date: record.get(date_idx).unwrap_or_default().to_string(),
            value: record.get(value_idx).unwrap_or_default().to_string(),
        });
    }
    Ok(rows)
}

/// Converts raw rows into a series, dropping rows `parse` rejects.
fn collect_series(
    name: &str,
    path: &Path,
    rows: Vec<RawRow>,
    parse: impl Fn(&str) -> Option<f64>,
) -> TimeSeries {
    let total = rows.len();
    let mut observations = Vec::with_capacity(total);

    for row in rows {
        let Ok(date) = Date::parse_flexible(&row.date) else {
            log::debug!("{}:{}: unparseable date '{}'", path.display(), row.line, row.date);
            continue;
        };
        match parse(&row.value) {
            Some(value) if value.is_finite() => observations.push(Observation::new(date, value)),
            _ => log::debug!("{}:{}: no value in '{}'", path.display(), row.line, row.value),
        }
    }

    let dropped = total - observations.len();
    if dropped > 0 {
        log::warn!(
            "{name}: dropped {dropped} of {total} rows from {} with missing or invalid data",
            path.display()
        );
    }

    TimeSeries::from_unsorted(observations)
}

// =============================================================================
// CSV PRICE SOURCE
// =============================================================================

/// CSV source of daily closing prices.
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    file_path: PathBuf,
    column: String,
}

impl CsvPriceSource {
    /// Creates a price source reading the `Close` column.
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            column: CLOSE_COLUMN.to_string(),
        }
    }

    /// Reads prices from a different column.
    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl SeriesSource for CsvPriceSource {
    type Error = FileError;

    fn name(&self) -> &str {
        "gold"
    }

    fn load(&self) -> FileResult<TimeSeries> {
        let rows = read_raw(&self.file_path, &self.column)?;
        let series = collect_series(self.name(), &self.file_path, rows, |s| s.parse().ok());
        log::info!(
            "loaded {} price observations from {}",
            series.len(),
            self.file_path.display()
        );
        Ok(series)
    }
}

// =============================================================================
// CSV YIELD SOURCE
// =============================================================================

/// Parses a percent yield quote into a decimal fraction.
///
/// The quote is rounded half-to-even to `decimals` places before scaling, so
/// `"4.123456"` with four decimals becomes `0.041235`. Exponent notation such
/// as `"4.5e0"` is accepted. Blank cells and placeholders such as FRED's `"."`
/// give `None`.
pub fn parse_percent_yield(raw: &str, decimals: u32) -> Option<f64> {
    let raw = raw.trim();
    let quote = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()?;
    let rounded = quote.round_dp(decimals);
    (rounded / Decimal::ONE_HUNDRED).to_f64()
}

/// CSV source of daily yields quoted in percent.
#[derive(Debug, Clone)]
pub struct CsvYieldSource {
    file_path: PathBuf,
    column: String,
    decimals: u32,
}

impl CsvYieldSource {
    /// Creates a yield source reading the `YTM` column.
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            column: YTM_COLUMN.to_string(),
            decimals: DEFAULT_YTM_DECIMALS,
        }
    }

    /// Reads yields from a different column.
    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    /// Sets the rounding applied to the percent quote.
    #[must_use]
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl SeriesSource for CsvYieldSource {
    type Error = FileError;

    fn name(&self) -> &str {
        "bonds"
    }

    fn load(&self) -> FileResult<TimeSeries> {
        let rows = read_raw(&self.file_path, &self.column)?;
        let decimals = self.decimals;
        let series = collect_series(self.name(), &self.file_path, rows, |s| {
            parse_percent_yield(s, decimals)
        });
        log::info!(
            "loaded {} yield observations from {}",
            series.len(),
            self.file_path.display()
        );
        Ok(series)
    }
}
