//! Canned demo dataset.
//!
//! 15 consecutive days starting 2025-01-01 with fixed sales figures. The CSV
//! form is built once per process and shared.

use std::path::Path;
use std::sync::LazyLock;

use chrono::{Duration, NaiveDate};
use tracing::info;

use crate::domain::{DEFAULT_DATE_COLUMN, DEFAULT_SALES_COLUMN, SalesRecord};
use crate::error::ReportError;

/// Suggested download name for the sample file.
pub const SAMPLE_FILE_NAME: &str = "sample_sales_data.csv";

pub const SAMPLE_START: (i32, u32, u32) = (2025, 1, 1);

pub const SAMPLE_SALES: [f64; 15] = [
    1200.0, 1500.0, 1100.0, 1800.0, 1600.0, 1750.0, 1400.0, 1550.0, 1900.0, 2100.0, 2050.0,
    1980.0, 1700.0, 1650.0, 1600.0,
];

static SAMPLE_CSV: LazyLock<Vec<u8>> = LazyLock::new(build_sample_csv);

/// The sample dataset as records, in date order.
pub fn sample_records() -> Vec<SalesRecord> {
    let (y, m, d) = SAMPLE_START;
    // Constant, valid calendar date.
    let start = NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    SAMPLE_SALES
        .iter()
        .enumerate()
        .map(|(i, &sales)| SalesRecord {
            date: start + Duration::days(i as i64),
            sales,
        })
        .collect()
}

/// The sample dataset as UTF-8 CSV bytes (`date,sales` header, ISO dates).
pub fn sample_csv() -> &'static [u8] {
    &SAMPLE_CSV
}

/// Write the sample CSV to `path`.
pub fn write_sample_csv(path: &Path) -> Result<(), ReportError> {
    std::fs::write(path, sample_csv()).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "wrote sample csv");
    Ok(())
}

fn build_sample_csv() -> Vec<u8> {
    let mut out = format!("{DEFAULT_DATE_COLUMN},{DEFAULT_SALES_COLUMN}\n");
    for r in sample_records() {
        out.push_str(&format!("{},{}\n", r.date.format("%Y-%m-%d"), r.sales));
    }
    out.into_bytes()
}
