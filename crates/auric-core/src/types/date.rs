//! Date type for monthly return calculations.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Date-only formats accepted by [`Date::parse_flexible`].
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Date-time formats accepted by [`Date::parse_flexible`]; the time part is dropped.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// A calendar date.
///
/// Newtype wrapper around `chrono::NaiveDate` with the month arithmetic the
/// resampler needs.
///
/// # Example
///
/// ```rust
/// use auric_core::types::Date;
///
/// let date = Date::from_ymd(2024, 2, 10).unwrap();
/// assert_eq!(date.end_of_month(), Date::from_ymd(2024, 2, 29).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Parses a date from the formats found in daily and intraday price files.
    ///
    /// Accepts `YYYY-MM-DD`, `YYYY/MM/DD` and date-times with a time part,
    /// which is discarded.
    pub fn parse_flexible(s: &str) -> CoreResult<Self> {
        let s = s.trim();
        for fmt in DATE_FORMATS {
            if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
                return Ok(Date(d));
            }
        }
        for fmt in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(Date(dt.date()));
            }
        }
        Err(CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the number of days in the date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the end of month for the current date.
    #[must_use]
    pub fn end_of_month(&self) -> Self {
        Date(self.0.with_day(self.days_in_month()).unwrap_or(self.0))
    }

    /// Checks if the date is the end of month.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        self.day() == self.days_in_month()
    }

    /// Returns the last day of the following month.
    pub fn next_month_end(&self) -> CoreResult<Self> {
        let (year, month) = if self.month() == 12 {
            (self.year() + 1, 1)
        } else {
            (self.year(), self.month() + 1)
        };
        Self::from_ymd(year, month, days_in_month(year, month))
    }

    /// Index of the date's month counted from year zero.
    ///
    /// Two dates are in consecutive months exactly when their indices differ by one.
    #[must_use]
    pub fn month_index(&self) -> i64 {
        i64::from(self.year()) * 12 + i64::from(self.month()) - 1
    }

    /// Returns true when both dates fall in the same calendar month.
    #[must_use]
    pub fn same_month(&self, other: &Date) -> bool {
        self.month_index() == other.month_index()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_flexible(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => unreachable!(),
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_creation() {
        let date = Date::from_ymd(2025, 6, 15).unwrap();
        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), 6);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_invalid_date() {
        assert!(Date::from_ymd(2025, 2, 30).is_err());
        assert!(Date::from_ymd(2025, 13, 1).is_err());
    }

    #[test]
    fn test_end_of_month_leap_february() {
        let date = Date::from_ymd(2024, 2, 3).unwrap();
        assert_eq!(date.end_of_month(), Date::from_ymd(2024, 2, 29).unwrap());
        assert!(date.end_of_month().is_end_of_month());

        let date = Date::from_ymd(1900, 2, 3).unwrap();
        assert_eq!(date.end_of_month().day(), 28);
    }

    #[test]
    fn test_next_month_end_rolls_year() {
        let date = Date::from_ymd(2023, 12, 31).unwrap();
        assert_eq!(
            date.next_month_end().unwrap(),
            Date::from_ymd(2024, 1, 31).unwrap()
        );

        let date = Date::from_ymd(2024, 1, 31).unwrap();
        assert_eq!(
            date.next_month_end().unwrap(),
            Date::from_ymd(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_month_index() {
        let jan = Date::from_ymd(2024, 1, 5).unwrap();
        let dec = Date::from_ymd(2023, 12, 31).unwrap();
        assert_eq!(jan.month_index() - dec.month_index(), 1);
        assert!(jan.same_month(&Date::from_ymd(2024, 1, 31).unwrap()));
        assert!(!jan.same_month(&dec));
    }

    #[test]
    fn test_parse_flexible() {
        let expected = Date::from_ymd(2024, 3, 15).unwrap();
        assert_eq!(Date::parse_flexible("2024-03-15").unwrap(), expected);
        assert_eq!(Date::parse_flexible(" 2024/03/15 ").unwrap(), expected);
        assert_eq!(Date::parse_flexible("2024-03-15 16:30:00").unwrap(), expected);
        assert_eq!(Date::parse_flexible("2024-03-15T09:00:00").unwrap(), expected);
        assert!(Date::parse_flexible("15.03.2024").is_err());
        assert!(Date::parse_flexible("").is_err());
    }

    #[test]
    fn test_display() {
        let date = Date::from_ymd(2025, 6, 5).unwrap();
        assert_eq!(format!("{}", date), "2025-06-05");
    }

    #[test]
    fn test_serde() {
        let date = Date::from_ymd(2025, 6, 15).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2025-06-15\"");
        let parsed: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(date, parsed);
    }
}
