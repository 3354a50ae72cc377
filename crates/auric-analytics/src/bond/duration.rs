//! Closed-form modified duration of a par bond.
//!
//! ## Formula
//!
//! ```text
//! D(Y) = (1/Y) * (1 - (1 + Y/2)^(-2M))
//! ```
//!
//! where:
//! - Y = annual yield to maturity (as decimal)
//! - M = maturity in years, semi-annual compounding (2M periods)

/// Modified duration of a semi-annual par bond.
///
/// No domain check is made here; callers guard against `ytm <= ε`.
///
/// # Arguments
///
/// * `ytm` - Yield to maturity (as decimal, e.g., 0.05 for 5%)
/// * `maturity_years` - Maturity in years
#[must_use]
pub fn modified_duration(ytm: f64, maturity_years: f64) -> f64 {
    let periods = 2.0 * maturity_years;
    (1.0 / ytm) * (1.0 - (1.0 + 0.5 * ytm).powf(-periods))
}

/// Approximate relative price change from duration alone.
#[must_use]
pub fn price_change_from_duration(mod_duration: f64, yield_change: f64) -> f64 {
    -mod_duration * yield_change
}
