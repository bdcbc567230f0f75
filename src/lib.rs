//! `income-position` library crate.
//!
//! The binary (`ipos`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the CLI and the TUI share one comparison pipeline

pub mod app;
pub mod cli;
pub mod compare;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
pub mod tui;
