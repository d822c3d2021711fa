//! `sales-report` library crate.
//!
//! The binary (`sales`) is a thin wrapper around this library so that:
//!
//! - the pipeline is testable without spawning processes
//! - front-ends (CLI, TUI) share one implementation of load/filter/derive/export
//! - code stays easy to navigate as the project grows

pub mod analysis;
pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
pub mod tui;
