//! One-period total return of a bond held at a constant maturity.
//!
//! ```text
//! carry    = (1 + Y_{t-1})^(1/12) - 1
//! Δ        = Y_t - Y_{t-1}
//! return_t = carry - D * Δ + 0.5 * C * Δ^2
//! ```
//!
//! `carry` is the income earned over a month at last month's yield, `-D*Δ`
//! the first-order price effect of the yield move and `0.5*C*Δ^2` the
//! convexity correction.

use super::convexity::convexity_adjustment;
use super::duration::price_change_from_duration;

/// Monthly-equivalent rate of an annual yield.
#[must_use]
pub fn monthly_yield(annual_yield: f64) -> f64 {
    (1.0 + annual_yield).powf(1.0 / 12.0) - 1.0
}

/// Components of a one-period bond return.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodReturn {
    /// Income from holding at the previous yield.
    pub carry: f64,
    /// Change in yield over the period.
    pub yield_change: f64,
    /// Total approximate return.
    pub total: f64,
}

/// Approximate total return over one month.
///
/// # Arguments
///
/// * `previous_ytm` - Yield at the start of the period (decimal)
/// * `ytm` - Yield at the end of the period (decimal)
/// * `mod_duration` - Modified duration at the end-of-period yield
/// * `convexity` - Convexity at the end-of-period yield
#[must_use]
pub fn period_return(previous_ytm: f64, ytm: f64, mod_duration: f64, convexity: f64) -> PeriodReturn {
    let carry = monthly_yield(previous_ytm);
    let yield_change = ytm - previous_ytm;
    let total = carry
        + price_change_from_duration(mod_duration, yield_change)
        + convexity_adjustment(convexity, yield_change);

    PeriodReturn {
        carry,
        yield_change,
        total,
    }
}
