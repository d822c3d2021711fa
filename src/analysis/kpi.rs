//! KPI aggregation.

use crate::domain::{FilteredSeries, KpiSummary};

/// Total, mean, max and min of sales. `None` for an empty window, which keeps
/// "no data" distinct from "all zeros".
pub fn summarize(series: &FilteredSeries) -> Option<KpiSummary> {
    if series.is_empty() {
        return None;
    }

    let mut total = 0.0;
    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;
    for v in series.sales() {
        total += v;
        max = max.max(v);
        min = min.min(v);
    }

    let count = series.len();
    Some(KpiSummary {
        count,
        total,
        mean: total / count as f64,
        max,
        min,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::domain::{DateRange, SeriesRow};

    fn series(values: &[f64]) -> FilteredSeries {
        let d0 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        FilteredSeries {
            range: DateRange::new(d0, d0 + chrono::Duration::days(30)).unwrap(),
            rows: values
                .iter()
                .enumerate()
                .map(|(i, &sales)| SeriesRow {
                    date: d0 + chrono::Duration::days(i as i64),
                    sales,
                    growth_pct: None,
                })
                .collect(),
        }
    }

    #[test]
    fn scenario_a_kpis() {
        let k = summarize(&series(&[100.0, 150.0, 120.0])).unwrap();
        assert_eq!(k.count, 3);
        assert_eq!(k.total, 370.0);
        assert!((k.mean - 123.333_333_333).abs() < 1e-6);
        assert_eq!(k.max, 150.0);
        assert_eq!(k.min, 100.0);
    }

    #[test]
    fn empty_is_absent_but_zeros_are_not() {
        assert!(summarize(&series(&[])).is_none());
        let k = summarize(&series(&[0.0, 0.0])).unwrap();
        assert_eq!(k.total, 0.0);
        assert_eq!(k.max, 0.0);
    }
}
