//! Closed-form convexity of a par bond.

/// Convexity of a semi-annual par bond.
///
/// ```text
/// C(Y) = (2/Y^2) * (1 - (1 + Y/2)^(-2M)) - 2M / (Y * (1 + Y/2)^(2M+1))
/// ```
///
/// No domain check is made here; callers guard against `ytm <= ε`.
#[must_use]
pub fn convexity(ytm: f64, maturity_years: f64) -> f64 {
    let periods = 2.0 * maturity_years;
    let base = 1.0 + 0.5 * ytm;
    (2.0 / (ytm * ytm)) * (1.0 - base.powf(-periods)) - periods / (ytm * base.powf(periods + 1.0))
}

/// Second-order price correction for a yield change.
#[must_use]
pub fn convexity_adjustment(convexity: f64, yield_change: f64) -> f64 {
    0.5 * convexity * yield_change * yield_change
}
