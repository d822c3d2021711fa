//! Date-range filtering.
//!
//! Growth is recomputed on every call from the rows that survive the filter,
//! so moving the window changes each row's growth (the first retained row
//! always loses its predecessor).

use chrono::NaiveDate;
use tracing::debug;

use crate::analysis::growth::compute_growth;
use crate::domain::{DateRange, FilteredSeries, SalesDataset, SeriesRow};
use crate::error::ReportError;

/// Filter by explicit bounds. Fails with `InvalidRange` when `start > end`,
/// whatever the dataset holds.
pub fn filter(dataset: &SalesDataset, start: NaiveDate, end: NaiveDate) -> Result<FilteredSeries, ReportError> {
    let range = DateRange::new(start, end)?;
    Ok(filter_range(dataset, &range))
}

/// Keep records with `start <= date <= end`, in dataset order.
pub fn filter_range(dataset: &SalesDataset, range: &DateRange) -> FilteredSeries {
    let kept: Vec<_> = dataset
        .records()
        .iter()
        .filter(|r| range.contains(r.date))
        .copied()
        .collect();

    let sales: Vec<f64> = kept.iter().map(|r| r.sales).collect();
    let growth = compute_growth(&sales);

    let rows = kept
        .into_iter()
        .zip(growth)
        .map(|(r, growth_pct)| SeriesRow {
            date: r.date,
            sales: r.sales,
            growth_pct,
        })
        .collect::<Vec<_>>();

    debug!(
        start = %range.start(),
        end = %range.end(),
        kept = rows.len(),
        total = dataset.len(),
        "filtered dataset"
    );

    FilteredSeries { range: *range, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SalesRecord;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn scenario_a() -> SalesDataset {
        SalesDataset::from_records(vec![
            SalesRecord { date: d(2025, 1, 1), sales: 100.0 },
            SalesRecord { date: d(2025, 1, 2), sales: 150.0 },
            SalesRecord { date: d(2025, 1, 3), sales: 120.0 },
        ])
    }

    #[test]
    fn full_span_growth() {
        let s = filter(&scenario_a(), d(2025, 1, 1), d(2025, 1, 3)).unwrap();
        let growth: Vec<Option<f64>> = s.rows.iter().map(|r| r.growth_pct).collect();
        assert_eq!(growth.len(), 3);
        assert_eq!(growth[0], None);
        assert!((growth[1].unwrap() - 50.0).abs() < 1e-12);
        assert!((growth[2].unwrap() + 20.0).abs() < 1e-12);
    }

    #[test]
    fn bounds_are_inclusive() {
        let s = filter(&scenario_a(), d(2025, 1, 2), d(2025, 1, 3)).unwrap();
        let dates: Vec<NaiveDate> = s.rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d(2025, 1, 2), d(2025, 1, 3)]);
    }

    #[test]
    fn window_changes_first_row_growth() {
        let s = filter(&scenario_a(), d(2025, 1, 2), d(2025, 1, 3)).unwrap();
        assert_eq!(s.rows[0].growth_pct, None);
        assert!((s.rows[1].growth_pct.unwrap() + 20.0).abs() < 1e-12);
    }

    #[test]
    fn range_outside_data_is_empty_selection() {
        let s = filter(&scenario_a(), d(2025, 1, 5), d(2025, 1, 10)).unwrap();
        assert!(s.is_empty());
        assert_eq!(s.range.start(), d(2025, 1, 5));
    }

    #[test]
    fn inverted_range_is_error_even_for_empty_dataset() {
        for ds in [scenario_a(), SalesDataset::default()] {
            let err = filter(&ds, d(2025, 1, 3), d(2025, 1, 1)).unwrap_err();
            assert!(matches!(err, ReportError::InvalidRange { .. }));
        }
    }
}
