//! Bond total-return approximation from a yield series.
//!
//! A constant-maturity government bond is approximated from its monthly
//! yield to maturity alone: each month earns carry at last month's yield and
//! is repriced with modified duration and convexity evaluated at the current
//! yield.
//!
//! The maturity is fixed for the whole run. A real bond's duration shortens as
//! it ages; here the series stands for a rolling benchmark of constant
//! maturity, so `M` never changes.
//!
//! # Example
//!
//! ```rust
//! use auric_analytics::bond::BondModel;
//! use auric_core::types::{Date, MonthlySeries, Observation};
//!
//! let jan = Date::from_ymd(2024, 1, 31).unwrap();
//! let feb = Date::from_ymd(2024, 2, 29).unwrap();
//! let yields = MonthlySeries::new(vec![
//!     Observation::new(jan, 0.04),
//!     Observation::new(feb, 0.04),
//! ])
//! .unwrap();
//!
//! let returns = BondModel::default().returns(&yields);
//! assert_eq!(returns.records()[0].period_return, 0.0);
//! assert!(returns.records()[1].period_return > 0.0);
//! ```

mod convexity;
mod duration;
mod total_return;

pub use convexity::{convexity, convexity_adjustment};
pub use duration::{modified_duration, price_change_from_duration};
pub use total_return::{monthly_yield, period_return, PeriodReturn};

use serde::Serialize;

use auric_core::types::{CumulativeReturn, Date, MonthlySeries};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Default bond maturity in years.
pub const DEFAULT_MATURITY_YEARS: f64 = 10.0;

/// Yields at or below this value have no duration or convexity.
pub const DEFAULT_YIELD_EPSILON: f64 = 1e-6;

/// Duration and convexity at one yield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sensitivity {
    /// Modified duration.
    pub modified_duration: f64,
    /// Convexity.
    pub convexity: f64,
}

/// Constant-maturity bond model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondModel {
    maturity_years: f64,
    epsilon: f64,
}

impl Default for BondModel {
    fn default() -> Self {
        Self {
            maturity_years: DEFAULT_MATURITY_YEARS,
            epsilon: DEFAULT_YIELD_EPSILON,
        }
    }
}

impl BondModel {
    /// Creates a model with the given maturity and yield floor.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidParameter` if the maturity is not a
    /// positive finite number or the floor is negative or not finite.
    pub fn new(maturity_years: f64, epsilon: f64) -> AnalyticsResult<Self> {
        if !maturity_years.is_finite() || maturity_years <= 0.0 {
            return Err(AnalyticsError::invalid_parameter(
                "maturity_years",
                maturity_years,
                "must be a positive number of years",
            ));
        }
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(AnalyticsError::invalid_parameter(
                "epsilon",
                epsilon,
                "must be a non-negative number",
            ));
        }
        Ok(Self {
            maturity_years,
            epsilon,
        })
    }

    /// Maturity in years.
    #[must_use]
    pub fn maturity_years(&self) -> f64 {
        self.maturity_years
    }

    /// Yield floor below which sensitivities are undefined.
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Duration and convexity at `ytm`, or `None` when `ytm <= ε`.
    #[must_use]
    pub fn sensitivity(&self, ytm: f64) -> Option<Sensitivity> {
        if ytm.is_nan() || ytm <= self.epsilon {
            return None;
        }
        Some(Sensitivity {
            modified_duration: modified_duration(ytm, self.maturity_years),
            convexity: convexity(ytm, self.maturity_years),
        })
    }

    /// Computes per-month bond returns from a monthly yield series.
    ///
    /// Yields must be annual decimals (0.045 for 4.5%). The first month and
    /// any month without a defined sensitivity contribute a zero return, so
    /// the cumulative product is never interrupted.
    #[must_use]
    pub fn returns(&self, yields: &MonthlySeries) -> BondReturns {
        let mut records = Vec::with_capacity(yields.len());
        let mut previous: Option<f64> = None;
        let mut growth = 1.0;
        let mut skipped = 0usize;

        for obs in yields {
            let sensitivity = self.sensitivity(obs.value);

            let step = match (previous, sensitivity) {
                (Some(prev), Some(s)) => {
                    Some(period_return(prev, obs.value, s.modified_duration, s.convexity))
                }
                (Some(_), None) => {
                    log::debug!(
                        "yield {} on {} is at or below {}, no sensitivity",
                        obs.value,
                        obs.date,
                        self.epsilon
                    );
                    skipped += 1;
                    None
                }
                (None, _) => None,
            };

            let period_return = step.map_or(0.0, |s| s.total);
            growth *= 1.0 + period_return;

            records.push(BondPeriod {
                date: obs.date,
                ytm: obs.value,
                previous_ytm: previous,
                modified_duration: sensitivity.map(|s| s.modified_duration),
                convexity: sensitivity.map(|s| s.convexity),
                carry: previous.map(monthly_yield),
                yield_change: previous.map(|p| obs.value - p),
                period_return,
                cumulative_return: growth,
            });
            previous = Some(obs.value);
        }

        if skipped > 0 {
            log::warn!("{skipped} months had a non-positive yield and earned no return");
        }

        BondReturns { records }
    }
}

/// Derived values for one month of the yield series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BondPeriod {
    /// Month-end date.
    pub date: Date,
    /// Yield to maturity (decimal).
    pub ytm: f64,
    /// Yield of the previous month.
    pub previous_ytm: Option<f64>,
    /// Modified duration, if the yield is in domain.
    pub modified_duration: Option<f64>,
    /// Convexity, if the yield is in domain.
    pub convexity: Option<f64>,
    /// Monthly carry at the previous yield.
    pub carry: Option<f64>,
    /// Yield change since the previous month.
    pub yield_change: Option<f64>,
    /// Approximate total return for the month.
    pub period_return: f64,
    /// Compounded growth of one unit.
    pub cumulative_return: f64,
}

impl BondPeriod {
    /// Period return in percent.
    #[must_use]
    pub fn period_return_pct(&self) -> f64 {
        self.period_return * 100.0
    }
}

/// Monthly bond returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BondReturns {
    records: Vec<BondPeriod>,
}

impl BondReturns {
    /// Per-month records in date order.
    #[must_use]
    pub fn records(&self) -> &[BondPeriod] {
        &self.records
    }

    /// Number of months.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no months.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cumulative values as a stand-alone series.
    #[must_use]
    pub fn cumulative_series(&self) -> Vec<CumulativeReturn> {
        self.records
            .iter()
            .map(|r| CumulativeReturn::new(r.date, Some(r.cumulative_return)))
            .collect()
    }

    /// Cumulative growth at the last month.
    #[must_use]
    pub fn final_cumulative(&self) -> Option<f64> {
        self.records.last().map(|r| r.cumulative_return)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use auric_core::types::Observation;

    fn monthly(values: &[f64]) -> MonthlySeries {
        let mut date = Date::from_ymd(1990, 1, 31).unwrap();
        let mut obs = Vec::new();
        for v in values {
            obs.push(Observation::new(date, *v));
            date = date.next_month_end().unwrap();
        }
        MonthlySeries::new(obs).unwrap()
    }

    #[test]
    fn test_model_validation() {
        assert!(BondModel::new(10.0, 1e-6).is_ok());
        assert!(BondModel::new(0.0, 1e-6).is_err());
        assert!(BondModel::new(f64::NAN, 1e-6).is_err());
        assert!(BondModel::new(10.0, -1.0).is_err());
    }

    #[test]
    fn test_sensitivity_guard() {
        let model = BondModel::default();
        assert!(model.sensitivity(0.0).is_none());
        assert!(model.sensitivity(-0.002).is_none());
        assert!(model.sensitivity(1e-6).is_none());
        assert!(model.sensitivity(f64::NAN).is_none());
        assert!(model.sensitivity(0.01).is_some());
    }

    #[test]
    fn test_rise_then_fall() {
        let returns = BondModel::default().returns(&monthly(&[0.04, 0.045, 0.04]));
        let r = returns.records();

        assert_eq!(r[0].period_return, 0.0);
        assert_eq!(r[0].cumulative_return, 1.0);
        assert_eq!(r[0].previous_ytm, None);
        assert_relative_eq!(r[0].modified_duration.unwrap(), 8.175716672298563, epsilon = 1e-12);

        assert_eq!(r[1].previous_ytm, Some(0.04));
        assert_relative_eq!(r[1].carry.unwrap(), monthly_yield(0.04), epsilon = 1e-15);
        assert_relative_eq!(r[1].yield_change.unwrap(), 0.005, epsilon = 1e-15);
        assert_relative_eq!(r[1].period_return, -0.03568292868286862, epsilon = 1e-9);
        assert!(r[1].period_return < 0.0);

        assert_relative_eq!(r[2].period_return, 0.045539616827287466, epsilon = 1e-9);
        assert_relative_eq!(r[2].cumulative_return, 1.0082317012449256, epsilon = 1e-9);
        assert_relative_eq!(r[1].period_return_pct(), -3.568292868286862, epsilon = 1e-7);
    }

    #[test]
    fn test_constant_yield_compounds_carry() {
        let returns = BondModel::default().returns(&monthly(&[0.05; 13]));
        let carry = monthly_yield(0.05);

        for record in &returns.records()[1..] {
            assert_eq!(record.period_return, carry);
        }
        assert_relative_eq!(
            returns.final_cumulative().unwrap(),
            (1.0 + carry).powi(12),
            epsilon = 1e-12
        );
        assert_relative_eq!(returns.final_cumulative().unwrap(), 1.05, epsilon = 1e-12);
    }

    #[test]
    fn test_non_positive_yield_contributes_zero() {
        let returns = BondModel::default().returns(&monthly(&[0.01, -0.001, 0.01]));
        let r = returns.records();

        assert_eq!(r[1].modified_duration, None);
        assert_eq!(r[1].convexity, None);
        assert_eq!(r[1].period_return, 0.0);
        assert_eq!(r[1].cumulative_return, 1.0);
        // the next month is computed again from the negative yield
        assert!(r[2].modified_duration.is_some());
        assert_ne!(r[2].period_return, 0.0);
    }

    #[test]
    fn test_cumulative_series_always_defined() {
        let returns = BondModel::default().returns(&monthly(&[0.03, 0.031]));
        assert!(returns.cumulative_series().iter().all(|p| p.value.is_some()));
    }
}
