//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - spreadsheet report export (`export`)
//! - summary JSON write (`summary`)

pub mod export;
pub mod ingest;
pub mod summary;

pub use export::*;
pub use ingest::*;
pub use summary::*;
