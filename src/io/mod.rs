//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - key-percentile CSV and comparison JSON exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
