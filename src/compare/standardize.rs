//! Square-root equivalence scale (OECD).
//!
//! Household income is divided by `sqrt(household_size)` to estimate
//! per-person economic welfare.

/// The divisor applied to a household's income.
///
/// Non-positive sizes scale by 1.
pub fn equivalence_scale(household_size: i64) -> f64 {
    if household_size <= 0 {
        return 1.0;
    }
    (household_size as f64).sqrt()
}

/// Standardize household income by household size.
///
/// `household_size <= 0` returns `income` unchanged.
pub fn standardize_income(income: f64, household_size: i64) -> f64 {
    if household_size <= 0 {
        return income;
    }
    income / (household_size as f64).sqrt()
}
