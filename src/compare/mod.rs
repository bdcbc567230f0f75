//! Income comparison.
//!
//! Responsibilities:
//!
//! - map incomes to percentile ranks in the US and Israeli distributions
//! - derive key-percentile tables from the reference data
//! - standardize household income by household size
//! - normalize the user's amount/period/currency input

pub mod comparator;
pub mod income;
pub mod standardize;

pub use comparator::*;
pub use income::*;
pub use standardize::*;
