//! Linear sales trend.

use chrono::{Datelike, NaiveDate};

use crate::domain::{FilteredSeries, TrendLine};
use crate::math::fit_line;

/// Day ordinal used as the regressor (0001-01-01 is day 1).
pub fn date_ordinal(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

/// Fit `sales` against `date_ordinal(date)`.
///
/// `None` for fewer than two rows, or when every row shares one date.
pub fn compute_trend(series: &FilteredSeries) -> Option<TrendLine> {
    let x: Vec<f64> = series.rows.iter().map(|r| date_ordinal(r.date)).collect();
    let y: Vec<f64> = series.sales().collect();
    let (slope, intercept) = fit_line(&x, &y)?;
    Some(TrendLine { slope, intercept })
}

impl TrendLine {
    pub fn predict(&self, date: NaiveDate) -> f64 {
        self.slope * date_ordinal(date) + self.intercept
    }
}
