//! Ordinary least squares for a single regressor.
//!
//! We fit `y = slope * x + intercept` with the closed-form estimator:
//!
//! ```text
//! slope     = Σ (x - x̄)(y - ȳ) / Σ (x - x̄)²
//! intercept = ȳ - slope · x̄
//! ```
//!
//! Implementation choices:
//! - Inputs are centered before the dot products. Date ordinals are ~7.4e5, so
//!   forming raw `Σx²` would throw away most of the mantissa.
//! - A zero `Σ (x - x̄)²` (every x identical) has no defined slope and
//!   returns `None` rather than a NaN line.

use nalgebra::DVector;

/// Fit a line through `(x, y)` pairs.
///
/// Returns `(slope, intercept)`, or `None` if there are fewer than two points,
/// the lengths differ, or all `x` values coincide.
pub fn fit_line(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let x = DVector::from_column_slice(x);
    let y = DVector::from_column_slice(y);
    let x_mean = x.mean();
    let y_mean = y.mean();

    let xc = x.add_scalar(-x_mean);
    let yc = y.add_scalar(-y_mean);

    let sxx = xc.dot(&xc);
    if !sxx.is_finite() || sxx <= 0.0 {
        return None;
    }

    let slope = xc.dot(&yc) / sxx;
    let intercept = y_mean - slope * x_mean;
    if slope.is_finite() && intercept.is_finite() {
        Some((slope, intercept))
    } else {
        None
    }
}
