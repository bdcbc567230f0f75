//! Normalization of the user's income input.
//!
//! The user enters one amount in a currency and a period. The report needs
//! all four annual/monthly × USD/ILS figures, raw and standardized, and the
//! comparator needs a single annual USD figure.

use serde::{Deserialize, Serialize};

use crate::compare::standardize::{equivalence_scale, standardize_income};
use crate::domain::{Currency, IncomeInput, Period};

/// Annual and monthly figures in both currencies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeFigures {
    pub annual_usd: f64,
    pub annual_ils: f64,
    pub monthly_usd: f64,
    pub monthly_ils: f64,
}

impl IncomeFigures {
    fn from_annual(annual_usd: f64, annual_ils: f64) -> Self {
        Self {
            annual_usd,
            annual_ils,
            monthly_usd: annual_usd / 12.0,
            monthly_ils: annual_ils / 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedIncome {
    pub raw: IncomeFigures,
    /// Always computed, whether or not the comparison is standardized.
    pub standardized: IncomeFigures,
    pub household_size: i64,
    /// `sqrt(household_size)` (1 for non-positive sizes).
    pub scale: f64,
    pub standardize: bool,
    /// The annual USD income fed to the comparator.
    pub calculation_income_usd: f64,
}

/// Convert an input amount into annual/monthly USD/ILS figures at `ppp_rate`.
pub fn normalize_income(input: &IncomeInput, ppp_rate: f64) -> NormalizedIncome {
    let (usd, ils) = match input.currency {
        Currency::Usd => (input.amount, input.amount * ppp_rate),
        Currency::Ils => (input.amount / ppp_rate, input.amount),
    };

    let raw = match input.period {
        Period::Annual => IncomeFigures {
            annual_usd: usd,
            annual_ils: ils,
            monthly_usd: usd / 12.0,
            monthly_ils: ils / 12.0,
        },
        Period::Monthly => IncomeFigures {
            annual_usd: usd * 12.0,
            annual_ils: ils * 12.0,
            monthly_usd: usd,
            monthly_ils: ils,
        },
    };

    let standardized = IncomeFigures::from_annual(
        standardize_income(raw.annual_usd, input.household_size),
        standardize_income(raw.annual_ils, input.household_size),
    );

    let calculation_income_usd = if input.standardize {
        standardized.annual_usd
    } else {
        raw.annual_usd
    };

    NormalizedIncome {
        raw,
        standardized,
        household_size: input.household_size,
        scale: equivalence_scale(input.household_size),
        standardize: input.standardize,
        calculation_income_usd,
    }
}

/// Default amount offered for a period/currency pair.
///
/// USD: 50,000 annual or 4,000 monthly; ILS: the same at PPP, truncated to
/// whole shekels.
pub fn default_amount(period: Period, currency: Currency, ppp_rate: f64) -> f64 {
    let usd = match period {
        Period::Annual => 50_000.0,
        Period::Monthly => 4_000.0,
    };
    match currency {
        Currency::Usd => usd,
        Currency::Ils => (usd * ppp_rate).trunc(),
    }
}

/// Upper bound accepted for an input amount (by period and currency).
pub fn max_amount(period: Period, currency: Currency) -> f64 {
    match (currency, period) {
        (Currency::Usd, Period::Annual) => 10_000_000.0,
        (Currency::Usd, Period::Monthly) => 1_000_000.0,
        (Currency::Ils, Period::Annual) => 30_000_000.0,
        (Currency::Ils, Period::Monthly) => 2_500_000.0,
    }
}
