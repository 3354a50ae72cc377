//! Monthly return report files.
//!
//! Reports are plain CSV with a `Date` column in `YYYY-MM-DD` form and every
//! number written with five decimals. Undefined values are left blank, which
//! is also how [`CsvCumulativeSource`] reads them back.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use auric_analytics::bond::BondReturns;
use auric_analytics::ratio::RatioPoint;
use auric_analytics::returns::PriceReturns;
use auric_core::types::{CumulativeReturn, Date};

use crate::error::{FileError, FileResult};
use crate::market_data::{strip_bom, DATE_COLUMN};

/// Column holding the compounded growth factor in gold and bond reports.
pub const CUMULATIVE_COLUMN: &str = "Cumul Monthly Returns";

/// Formats a value the way every report column is written.
pub fn format_value(value: f64) -> String {
    format!("{value:.5}")
}

fn format_opt(value: Option<f64>) -> Option<String> {
    value.map(format_value)
}

// =============================================================================
// RECORDS
// =============================================================================

#[derive(Debug, Serialize)]
struct GoldRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Monthly Change")]
    change: Option<String>,
    #[serde(rename = "Cumul Monthly Returns")]
    cumulative: Option<String>,
}

#[derive(Debug, Serialize)]
struct BondRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "YTM")]
    ytm: String,
    #[serde(rename = "Duration")]
    duration: Option<String>,
    #[serde(rename = "Convexity")]
    convexity: Option<String>,
    #[serde(rename = "Investment Return")]
    period_return: String,
    #[serde(rename = "Investment Return (%)")]
    period_return_pct: String,
    #[serde(rename = "Cumul Monthly Returns")]
    cumulative: String,
}

#[derive(Debug, Serialize)]
struct RatioRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Cumul Ratio")]
    ratio: String,
    #[serde(rename = "Cumul Ratio MA")]
    moving_average: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CumulativeRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Cumul Monthly Returns")]
    cumulative: Option<f64>,
}

// =============================================================================
// WRITERS
// =============================================================================

fn write_rows<W: io::Write, R: Serialize>(
    writer: W,
    rows: impl IntoIterator<Item = R>,
) -> FileResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn create(path: &Path) -> FileResult<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}

/// Writes gold returns as `Date, Monthly Change, Cumul Monthly Returns`.
pub fn write_gold_returns<W: io::Write>(writer: W, returns: &PriceReturns) -> FileResult<()> {
    write_rows(
        writer,
        returns.records().iter().map(|r| GoldRow {
            date: r.date.to_string(),
            change: format_opt(r.change),
            cumulative: format_opt(r.cumulative),
        }),
    )
}

/// Writes bond returns with yield, sensitivities and both return forms.
pub fn write_bond_returns<W: io::Write>(writer: W, returns: &BondReturns) -> FileResult<()> {
    write_rows(
        writer,
        returns.records().iter().map(|r| BondRow {
            date: r.date.to_string(),
            ytm: format_value(r.ytm),
            duration: format_opt(r.modified_duration),
            convexity: format_opt(r.convexity),
            period_return: format_value(r.period_return),
            period_return_pct: format_value(r.period_return_pct()),
            cumulative: format_value(r.cumulative_return),
        }),
    )
}

/// Writes the ratio as `Date, Cumul Ratio, Cumul Ratio MA`.
pub fn write_ratio<W: io::Write>(writer: W, points: &[RatioPoint]) -> FileResult<()> {
    write_rows(
        writer,
        points.iter().map(|p| RatioRow {
            date: p.date.to_string(),
            ratio: format_value(p.ratio),
            moving_average: format_opt(p.moving_average),
        }),
    )
}

/// Saves gold returns to `path`, creating parent directories.
pub fn save_gold_returns(path: impl AsRef<Path>, returns: &PriceReturns) -> FileResult<()> {
    let path = path.as_ref();
    write_gold_returns(create(path)?, returns)?;
    log::info!("wrote {} gold rows to {}", returns.len(), path.display());
    Ok(())
}

/// Saves bond returns to `path`, creating parent directories.
pub fn save_bond_returns(path: impl AsRef<Path>, returns: &BondReturns) -> FileResult<()> {
    let path = path.as_ref();
    write_bond_returns(create(path)?, returns)?;
    log::info!("wrote {} bond rows to {}", returns.len(), path.display());
    Ok(())
}

/// Saves the ratio to `path`, creating parent directories.
pub fn save_ratio(path: impl AsRef<Path>, points: &[RatioPoint]) -> FileResult<()> {
    let path = path.as_ref();
    write_ratio(create(path)?, points)?;
    log::info!("wrote {} ratio rows to {}", points.len(), path.display());
    Ok(())
}

// =============================================================================
// CUMULATIVE SOURCE
// =============================================================================

/// Reads the `Date` and `Cumul Monthly Returns` columns of a report.
///
/// Rows are returned in file order without de-duplication so that the
/// ratio step can reject repeated dates.
#[derive(Debug, Clone)]
pub struct CsvCumulativeSource {
    file_path: PathBuf,
}

impl CsvCumulativeSource {
    /// Creates a source for the report at `file_path`.
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Loads every row.
    ///
    /// # Errors
    ///
    /// - `FileError::NotFound` if the file is absent
    /// - `FileError::MissingColumn` if either column is absent
    /// - `FileError::InvalidRecord` for an unparseable date
    /// - `FileError::Csv` for a non-numeric cumulative value
    pub fn load(&self) -> FileResult<Vec<CumulativeReturn>> {
        let path = self.file_path.as_path();
        if !path.exists() {
            return Err(FileError::not_found(path));
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;

        let headers: csv::StringRecord = reader.headers()?.iter().map(strip_bom).collect();
        for column in [DATE_COLUMN, CUMULATIVE_COLUMN] {
            if !headers.iter().any(|h| h == column) {
                return Err(FileError::missing_column(path, column));
            }
        }
        reader.set_headers(headers);

        let mut out = Vec::new();
        for result in reader.deserialize::<CumulativeRow>() {
            let row = result?;
            let date = Date::parse_flexible(&row.date).map_err(|e| FileError::InvalidRecord {
                path: path.to_path_buf(),
                line: out.len() as u64 + 2,
                reason: e.to_string(),
            })?;
            out.push(CumulativeReturn::new(date, row.cumulative));
        }

        log::info!("loaded {} cumulative returns from {}", out.len(), path.display());
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use auric_analytics::bond::BondModel;
    use auric_analytics::ratio::RatioComposer;
    use auric_analytics::returns::price_returns;
    use auric_core::types::{MonthlySeries, Observation};
    use tempfile::TempDir;

    fn monthly(values: &[f64]) -> MonthlySeries {
        let mut date = Date::from_ymd(2024, 1, 31).unwrap();
        let mut observations = Vec::new();
        for v in values {
            observations.push(Observation::new(date, *v));
            date = date.next_month_end().unwrap();
        }
        MonthlySeries::new(observations).unwrap()
    }

    fn to_string(f: impl FnOnce(&mut Vec<u8>) -> FileResult<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    // =========================================================================
    // Writers
    // =========================================================================

    #[test]
    fn test_gold_report_layout() {
        let returns = price_returns(&monthly(&[100.0, 110.0, 99.0]));
        let text = to_string(|w| write_gold_returns(w, &returns));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Date,Monthly Change,Cumul Monthly Returns");
        assert_eq!(lines[1], "2024-01-31,,");
        assert_eq!(lines[2], "2024-02-29,0.10000,1.10000");
        assert_eq!(lines[3], "2024-03-31,-0.10000,0.99000");
    }

    #[test]
    fn test_bond_report_layout() {
        let returns = BondModel::default().returns(&monthly(&[0.04, 0.045, 0.0]));
        let text = to_string(|w| write_bond_returns(w, &returns));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Date,YTM,Duration,Convexity,Investment Return,Investment Return (%),Cumul Monthly Returns"
        );
        assert_eq!(lines[1], "2024-01-31,0.04000,8.17572,78.89793,0.00000,0.00000,1.00000");
        assert!(lines[2].starts_with("2024-02-29,0.04500,7.98186,76.20900,-0.03568,-3.56829,"));
        // zero yield: no sensitivities, no return
        assert!(lines[3].starts_with("2024-03-31,0.00000,,,0.00000,0.00000,"));
    }

    #[test]
    fn test_ratio_report_layout() {
        let gold = vec![
            CumulativeReturn::new(Date::from_ymd(2024, 1, 31).unwrap(), None),
            CumulativeReturn::new(Date::from_ymd(2024, 2, 29).unwrap(), Some(1.1)),
        ];
        let bonds = vec![
            CumulativeReturn::new(Date::from_ymd(2024, 1, 31).unwrap(), Some(1.0)),
            CumulativeReturn::new(Date::from_ymd(2024, 2, 29).unwrap(), Some(1.0)),
        ];
        let points = RatioComposer::default().compose(&gold, &bonds).unwrap();
        let text = to_string(|w| write_ratio(w, &points));

        assert_eq!(
            text,
            "Date,Cumul Ratio,Cumul Ratio MA\n2024-01-31,100.00000,\n2024-02-29,110.00000,\n"
        );
    }

    // =========================================================================
    // Files
    // =========================================================================

    #[test]
    fn test_save_and_load_cumulative() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("gold_monthly_returns.csv");
        let returns = price_returns(&monthly(&[100.0, 110.0, 121.0]));

        save_gold_returns(&path, &returns).unwrap();
        let loaded = CsvCumulativeSource::new(&path).load().unwrap();

        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0].value, None);
        assert_relative_eq!(loaded[2].value.unwrap(), 1.21, epsilon = 1e-12);
        assert_eq!(loaded[2].date, Date::from_ymd(2024, 3, 31).unwrap());
    }

    #[test]
    fn test_nan_cells_count_as_missing_in_ratio() {
        let dir = TempDir::new().unwrap();
        let gold_path = dir.path().join("gold.csv");
        let bonds_path = dir.path().join("bonds.csv");
        std::fs::write(
            &gold_path,
            "Date,Monthly Change,Cumul Monthly Returns\n2024-01-31,NaN,NaN\n2024-02-29,0.1,1.1\n",
        )
        .unwrap();
        std::fs::write(
            &bonds_path,
            "Date,Cumul Monthly Returns\n2024-01-31,1.0\n2024-02-29,1.0\n",
        )
        .unwrap();

        let gold = CsvCumulativeSource::new(&gold_path).load().unwrap();
        assert!(gold[0].value.unwrap().is_nan());

        let bonds = CsvCumulativeSource::new(&bonds_path).load().unwrap();
        let points = RatioComposer::default().compose(&gold, &bonds).unwrap();
        assert_eq!(points[0].ratio, 100.0);
        assert_relative_eq!(points[1].ratio, 110.0, epsilon = 1e-10);
    }

    #[test]
    fn test_load_accepts_byte_order_mark() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bom.csv");
        std::fs::write(&path, "\u{feff}Date,Cumul Monthly Returns\n2024-01-31,1.0\n").unwrap();

        let loaded = CsvCumulativeSource::new(&path).load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].date, Date::from_ymd(2024, 1, 31).unwrap());
    }

    #[test]
    fn test_load_keeps_duplicates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dup.csv");
        std::fs::write(
            &path,
            "Date,Cumul Monthly Returns\n2024-01-31,1.0\n2024-01-31,1.1\n",
        )
        .unwrap();

        let loaded = CsvCumulativeSource::new(&path).load().unwrap();
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn test_load_errors() {
        let dir = TempDir::new().unwrap();

        let missing = CsvCumulativeSource::new(dir.path().join("nope.csv")).load();
        assert!(matches!(missing, Err(FileError::NotFound { .. })));

        let path = dir.path().join("ratio.csv");
        std::fs::write(&path, "Date,Cumul Ratio\n2024-01-31,100\n").unwrap();
        let no_column = CsvCumulativeSource::new(&path).load();
        assert!(matches!(no_column, Err(FileError::MissingColumn { .. })));

        std::fs::write(&path, "Date,Cumul Monthly Returns\nJanuary,1.0\n").unwrap();
        let bad_date = CsvCumulativeSource::new(&path).load();
        assert!(matches!(bad_date, Err(FileError::InvalidRecord { line: 2, .. })));
    }
}
