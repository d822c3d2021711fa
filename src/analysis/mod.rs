//! Analysis over a selected date window.
//!
//! Responsibilities:
//!
//! - restrict a dataset to an inclusive date range (`filter`)
//! - annotate period-over-period growth (`growth`)
//! - fit a linear trend of sales over time (`trend`)
//! - aggregate KPIs (`kpi`)

pub mod filter;
pub mod growth;
pub mod kpi;
pub mod trend;

pub use filter::*;
pub use growth::*;
pub use kpi::*;
pub use trend::*;
