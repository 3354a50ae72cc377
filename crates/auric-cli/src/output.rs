//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use auric_analytics::bond::BondPeriod;
use auric_analytics::ratio::RatioPoint;
use auric_analytics::returns::PriceReturn;
use auric_core::types::Date;

use crate::cli::OutputFormat;

/// Formats and prints rows based on the specified format.
///
/// `Minimal` is not handled here; each command prints its own headline value.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
        OutputFormat::Minimal => Ok(()),
    }
}

/// Keeps the last `n` rows, or all of them.
pub fn tail<T>(rows: &[T], n: Option<usize>) -> &[T] {
    match n {
        Some(n) if n < rows.len() => &rows[rows.len() - n..],
        _ => rows,
    }
}

/// Prints data as a formatted table.
pub fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints data as JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Four decimals, as shown in every table.
pub fn fmt_value(value: &f64) -> String {
    format!("{:.4}", value)
}

/// Four decimals, or a dash when undefined.
pub fn fmt_opt(value: &Option<f64>) -> String {
    value.as_ref().map_or_else(|| "-".to_string(), fmt_value)
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

// =============================================================================
// ROWS
// =============================================================================

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair from an optional number.
    pub fn from_opt(key: impl Into<String>, value: Option<f64>) -> Self {
        Self::new(key, fmt_opt(&value))
    }
}

/// One month of gold returns.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct GoldRow {
    #[tabled(rename = "Date")]
    pub date: Date,
    #[tabled(rename = "Close", display_with = "fmt_value")]
    pub close: f64,
    #[tabled(rename = "Monthly Change", display_with = "fmt_opt")]
    pub change: Option<f64>,
    #[tabled(rename = "Cumulative", display_with = "fmt_opt")]
    pub cumulative: Option<f64>,
}

impl From<&PriceReturn> for GoldRow {
    fn from(r: &PriceReturn) -> Self {
        Self {
            date: r.date,
            close: r.price,
            change: r.change,
            cumulative: r.cumulative,
        }
    }
}

/// One month of bond returns.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct BondRow {
    #[tabled(rename = "Date")]
    pub date: Date,
    #[tabled(rename = "YTM", display_with = "fmt_value")]
    pub ytm: f64,
    #[tabled(rename = "Duration", display_with = "fmt_opt")]
    pub duration: Option<f64>,
    #[tabled(rename = "Convexity", display_with = "fmt_opt")]
    pub convexity: Option<f64>,
    #[tabled(rename = "Return (%)", display_with = "fmt_value")]
    pub return_pct: f64,
    #[tabled(rename = "Cumulative", display_with = "fmt_value")]
    pub cumulative: f64,
}

impl From<&BondPeriod> for BondRow {
    fn from(r: &BondPeriod) -> Self {
        Self {
            date: r.date,
            ytm: r.ytm,
            duration: r.modified_duration,
            convexity: r.convexity,
            return_pct: r.period_return_pct(),
            cumulative: r.cumulative_return,
        }
    }
}

/// One month of the gold/bond ratio.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct RatioRow {
    #[tabled(rename = "Date")]
    pub date: Date,
    #[tabled(rename = "Ratio", display_with = "fmt_value")]
    pub ratio: f64,
    #[tabled(rename = "Moving Average", display_with = "fmt_opt")]
    pub moving_average: Option<f64>,
}

impl From<&RatioPoint> for RatioRow {
    fn from(p: &RatioPoint) -> Self {
        Self {
            date: p.date,
            ratio: p.ratio,
            moving_average: p.moving_average,
        }
    }
}
