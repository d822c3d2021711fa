//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - loaded input (`SalesRecord`, `SalesDataset`, `ColumnSpec`)
//! - the user's selection (`DateRange`) and its result (`FilteredSeries`)
//! - derived outputs (`TrendLine`, `KpiSummary`)
//! - run configuration (`ReportConfig`)

pub mod types;

pub use types::*;
