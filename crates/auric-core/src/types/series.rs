//! Ordered time series.
//!
//! [`TimeSeries`] holds raw observations in strictly increasing date order.
//! [`MonthlySeries`] additionally guarantees one observation per calendar
//! month, labelled with the month-end date, with no gaps.

use serde::Serialize;

use super::{Date, Observation};
use crate::error::{CoreError, CoreResult};

/// Ordered, duplicate-free sequence of observations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TimeSeries {
    observations: Vec<Observation>,
}

impl TimeSeries {
    /// Creates a series from observations that are already in strictly
    /// increasing date order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Unordered` if a date does not strictly follow its
    /// predecessor.
    pub fn new(observations: Vec<Observation>) -> CoreResult<Self> {
        for pair in observations.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(CoreError::unordered(pair[0].date, pair[1].date));
            }
        }
        Ok(Self { observations })
    }

    /// Creates a series from raw rows in any order.
    ///
    /// Rows are sorted by date (stable) and a date seen more than once keeps
    /// its last observation.
    #[must_use]
    pub fn from_unsorted(mut observations: Vec<Observation>) -> Self {
        observations.sort_by_key(|o| o.date);
        let raw_len = observations.len();

        let mut deduped: Vec<Observation> = Vec::with_capacity(raw_len);
        for obs in observations {
            match deduped.last_mut() {
                Some(last) if last.date == obs.date => *last = obs,
                _ => deduped.push(obs),
            }
        }

        if deduped.len() < raw_len {
            log::debug!(
                "collapsed {} duplicated dates while ordering series",
                raw_len - deduped.len()
            );
        }

        Self {
            observations: deduped,
        }
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Returns true if the series holds no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Returns the observations as a slice.
    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Iterates over the observations.
    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    /// First observation, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    /// Last observation, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// Returns the observations dated on or after `start`.
    #[must_use]
    pub fn filter_from(&self, start: Date) -> Self {
        Self {
            observations: self
                .observations
                .iter()
                .filter(|o| o.date >= start)
                .copied()
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

/// One observation per calendar month, labelled with month-end dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MonthlySeries {
    observations: Vec<Observation>,
}

impl MonthlySeries {
    /// Creates a monthly series, validating its shape.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidMonthlySeries` if a date is not a month end
    /// or two neighbouring observations are not in consecutive months.
    pub fn new(observations: Vec<Observation>) -> CoreResult<Self> {
        if let Some(obs) = observations.iter().find(|o| !o.date.is_end_of_month()) {
            return Err(CoreError::invalid_monthly(format!(
                "{} is not a month end",
                obs.date
            )));
        }
        for pair in observations.windows(2) {
            if pair[1].date.month_index() - pair[0].date.month_index() != 1 {
                return Err(CoreError::invalid_monthly(format!(
                    "{} does not follow {} by one month",
                    pair[1].date, pair[0].date
                )));
            }
        }
        Ok(Self { observations })
    }

    /// Number of months.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Returns true if the series holds no months.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Returns the monthly observations as a slice.
    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Iterates over the monthly observations.
    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    /// Month-end dates in order.
    #[must_use]
    pub fn dates(&self) -> Vec<Date> {
        self.observations.iter().map(|o| o.date).collect()
    }

    /// Values in order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }
}

impl<'a> IntoIterator for &'a MonthlySeries {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(y: i32, m: u32, d: u32, v: f64) -> Observation {
        Observation::new(Date::from_ymd(y, m, d).unwrap(), v)
    }

    #[test]
    fn test_new_rejects_unordered() {
        let err = TimeSeries::new(vec![obs(2024, 1, 2, 1.0), obs(2024, 1, 1, 2.0)]).unwrap_err();
        assert!(matches!(err, CoreError::Unordered { .. }));
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let result = TimeSeries::new(vec![obs(2024, 1, 2, 1.0), obs(2024, 1, 2, 2.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_unsorted_sorts_and_keeps_last_duplicate() {
        let series = TimeSeries::from_unsorted(vec![
            obs(2024, 1, 3, 3.0),
            obs(2024, 1, 1, 1.0),
            obs(2024, 1, 3, 4.0),
            obs(2024, 1, 2, 2.0),
        ]);

        let values: Vec<f64> = series.iter().map(|o| o.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 4.0]);
        assert!(TimeSeries::new(series.observations().to_vec()).is_ok());
    }

    #[test]
    fn test_filter_from() {
        let series = TimeSeries::from_unsorted(vec![
            obs(1960, 12, 30, 35.0),
            obs(1961, 1, 2, 35.1),
            obs(1961, 1, 3, 35.2),
        ]);
        let filtered = series.filter_from(Date::from_ymd(1961, 1, 1).unwrap());
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.first().unwrap().value, 35.1);
    }

    #[test]
    fn test_monthly_series_validation() {
        assert!(MonthlySeries::new(vec![obs(2024, 1, 31, 1.0), obs(2024, 2, 29, 1.0)]).is_ok());
        assert!(MonthlySeries::new(vec![obs(2024, 1, 30, 1.0)]).is_err());
        // gap in March
        assert!(MonthlySeries::new(vec![obs(2024, 2, 29, 1.0), obs(2024, 4, 30, 1.0)]).is_err());
        assert!(MonthlySeries::new(Vec::new()).unwrap().is_empty());
    }
}
