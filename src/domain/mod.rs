//! Domain types used throughout the calculator.
//!
//! This module defines:
//!
//! - input configuration enums (`Period`, `Currency`, `Language`)
//! - the reference table (`PercentileRow`, `PercentileTable`)
//! - query outputs (`ComparisonResult`, `PercentileSummary`)

pub mod types;

pub use types::*;
