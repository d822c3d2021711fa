//! Shared domain types.
//!
//! Everything here is derived, immutable data: a new value is produced every
//! time the user loads a file or changes the date range. Nothing is cached
//! across calls.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Default header for the date column.
pub const DEFAULT_DATE_COLUMN: &str = "date";
/// Default header for the sales column.
pub const DEFAULT_SALES_COLUMN: &str = "sales";

/// Environment variable overriding the default date column header.
pub const ENV_DATE_COLUMN: &str = "SALES_DATE_COLUMN";
/// Environment variable overriding the default sales column header.
pub const ENV_SALES_COLUMN: &str = "SALES_VALUE_COLUMN";

/// Which CSV headers hold the date and the sales value.
///
/// Matching is case-insensitive (see `io::ingest`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub date: String,
    pub sales: String,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            date: DEFAULT_DATE_COLUMN.to_string(),
            sales: DEFAULT_SALES_COLUMN.to_string(),
        }
    }
}

impl ColumnSpec {
    /// Resolve column names from `.env` / the process environment, falling back
    /// to `date` and `sales`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let date = std::env::var(ENV_DATE_COLUMN)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATE_COLUMN.to_string());
        let sales = std::env::var(ENV_SALES_COLUMN)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SALES_COLUMN.to_string());
        Self { date, sales }
    }

    /// Apply explicit overrides (typically from CLI flags).
    pub fn with_overrides(mut self, date: Option<&str>, sales: Option<&str>) -> Self {
        if let Some(date) = date {
            self.date = date.to_string();
        }
        if let Some(sales) = sales {
            self.sales = sales.to_string();
        }
        self
    }
}

/// One day of sales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub date: NaiveDate,
    /// Non-negative and finite (enforced by the loader).
    pub sales: f64,
}

/// Records sorted ascending by date.
///
/// The sort is stable, so rows sharing a date keep their input order. Rows are
/// never merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesDataset {
    records: Vec<SalesRecord>,
}

impl SalesDataset {
    pub fn from_records(mut records: Vec<SalesRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        Self { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }

    /// The full date span of the dataset, or `None` when empty.
    pub fn span(&self) -> Option<DateRange> {
        let start = self.first_date()?;
        let end = self.last_date()?;
        Some(DateRange { start, end })
    }
}

/// An inclusive date interval with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if start > end {
            return Err(ReportError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A filtered record annotated with its growth versus the previous retained row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesRow {
    pub date: NaiveDate,
    pub sales: f64,
    /// Percent change from the previous row in the window.
    ///
    /// `None` for the first row, and when the previous row's sales were zero.
    pub growth_pct: Option<f64>,
}

/// The dataset restricted to a date range, with growth annotated.
///
/// An empty `rows` vector is a valid "nothing selected" state, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredSeries {
    pub range: DateRange,
    pub rows: Vec<SeriesRow>,
}

impl FilteredSeries {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn sales(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|r| r.sales)
    }
}

/// Least-squares line `sales ≈ slope * ordinal(date) + intercept`.
///
/// The ordinal is `NaiveDate::num_days_from_ce` (0001-01-01 is day 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    /// Sales change per day.
    pub slope: f64,
    pub intercept: f64,
}

/// Sales aggregates over a filtered window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub count: usize,
    pub total: f64,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

/// A full `report` run's configuration as understood by the pipeline driver.
///
/// This is derived from CLI flags, `.env`, and defaults.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub csv_path: PathBuf,
    pub columns: ColumnSpec,

    /// Defaults to the first date in the dataset.
    pub start: Option<NaiveDate>,
    /// Defaults to the last date in the dataset.
    pub end: Option<NaiveDate>,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_xlsx: Option<PathBuf>,
    pub export_summary: Option<PathBuf>,
}

/// Saved run summary (JSON).
#[derive(Debug, Clone, Serialize)]
pub struct SummaryFile {
    pub tool: String,
    pub source: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub rows: usize,
    pub kpis: Option<KpiSummary>,
    pub trend: Option<TrendLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn dataset_sort_is_stable_for_duplicate_dates() {
        let ds = SalesDataset::from_records(vec![
            SalesRecord { date: d(2025, 1, 2), sales: 1.0 },
            SalesRecord { date: d(2025, 1, 1), sales: 2.0 },
            SalesRecord { date: d(2025, 1, 2), sales: 3.0 },
        ]);
        let sales: Vec<f64> = ds.records().iter().map(|r| r.sales).collect();
        assert_eq!(sales, vec![2.0, 1.0, 3.0]);
        assert_eq!(ds.first_date(), Some(d(2025, 1, 1)));
        assert_eq!(ds.last_date(), Some(d(2025, 1, 2)));
    }

    #[test]
    fn date_range_rejects_inverted_bounds() {
        let err = DateRange::new(d(2025, 1, 3), d(2025, 1, 1)).unwrap_err();
        assert!(matches!(err, ReportError::InvalidRange { .. }));

        let single = DateRange::new(d(2025, 1, 3), d(2025, 1, 3)).unwrap();
        assert!(single.contains(d(2025, 1, 3)));
        assert!(!single.contains(d(2025, 1, 4)));
    }

    #[test]
    fn empty_dataset_has_no_span() {
        assert!(SalesDataset::default().span().is_none());
    }

    #[test]
    fn column_overrides_replace_only_given_names() {
        let cols = ColumnSpec::default().with_overrides(None, Some("revenue"));
        assert_eq!(cols.date, "date");
        assert_eq!(cols.sales, "revenue");
    }
}
