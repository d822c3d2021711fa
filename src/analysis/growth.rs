//! Period-over-period growth.
//!
//! `growth[i] = (sales[i] - sales[i-1]) / sales[i-1] * 100` over adjacent rows
//! of the window passed in. The first row has no predecessor and gets `None`.
//! A zero predecessor also yields `None`: the ratio is undefined, and an
//! infinity must never reach the report.

use tracing::debug;

/// Growth (%) for each value relative to the one before it.
pub fn compute_growth(sales: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(sales.len());
    let mut prev: Option<f64> = None;
    for (i, &cur) in sales.iter().enumerate() {
        let growth = match prev {
            None => None,
            Some(p) if p == 0.0 => {
                debug!(index = i, "previous sales are zero; growth left blank");
                None
            }
            Some(p) => Some((cur - p) / p * 100.0),
        };
        out.push(growth);
        prev = Some(cur);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_matches_pct_change() {
        let g = compute_growth(&[100.0, 150.0, 120.0]);
        assert_eq!(g[0], None);
        assert!((g[1].unwrap() - 50.0).abs() < 1e-12);
        assert!((g[2].unwrap() + 20.0).abs() < 1e-12);
    }

    #[test]
    fn zero_predecessor_is_blank_not_infinite() {
        let g = compute_growth(&[0.0, 50.0, 0.0, 10.0]);
        assert_eq!(g[0], None);
        assert_eq!(g[1], None);
        assert!((g[2].unwrap() + 100.0).abs() < 1e-12);
        assert_eq!(g[3], None);
    }

    #[test]
    fn empty_and_single() {
        assert!(compute_growth(&[]).is_empty());
        assert_eq!(compute_growth(&[42.0]), vec![None]);
    }
}
