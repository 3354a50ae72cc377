//! # Auric Ext File
//!
//! File-based inputs and outputs for Auric:
//! - CSV daily gold price source
//! - CSV daily yield source (percent quotes, FRED style)
//! - Monthly return reports and a reader for their cumulative column

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod market_data;
mod reports;

pub use error::{FileError, FileResult};
pub use market_data::*;
pub use reports::*;

use std::path::Path;

use auric_core::types::CumulativeReturn;

/// Loads the cumulative return columns of a gold and a bond report.
pub fn load_report_pair(
    gold_csv: impl AsRef<Path>,
    bonds_csv: impl AsRef<Path>,
) -> FileResult<(Vec<CumulativeReturn>, Vec<CumulativeReturn>)> {
    let gold = CsvCumulativeSource::new(gold_csv).load()?;
    let bonds = CsvCumulativeSource::new(bonds_csv).load()?;
    Ok((gold, bonds))
}
