//! ASCII chart for `sales report`.
//!
//! A fixed-size character grid, so the same input always renders the same
//! text. Daily sales are drawn as `o` and the trend line as `-`. The x axis is
//! days since the first row of the window.

use crate::analysis::date_ordinal;
use crate::domain::{FilteredSeries, TrendLine};

const POINT: char = 'o';
const TREND: char = '-';

/// Render sales points plus an optional trend line.
pub fn render_ascii_plot(
    series: &FilteredSeries,
    trend: Option<&TrendLine>,
    width: usize,
    height: usize,
) -> String {
    let (Some(first), Some(last)) = (series.rows.first(), series.rows.last()) else {
        return "Plot: no data\n".to_string();
    };

    let points: Vec<(f64, f64)> = series
        .rows
        .iter()
        .map(|r| ((r.date - first.date).num_days() as f64, r.sales))
        .collect();

    let days = (last.date - first.date).num_days() as f64;
    let x_span = if days > 0.0 { (0.0, days) } else { (-1.0, 1.0) };

    let origin = date_ordinal(first.date);
    let trend_samples = trend.map(|t| {
        let n = width.max(10);
        (0..n)
            .map(|i| {
                let x = x_span.0 + (x_span.1 - x_span.0) * i as f64 / (n - 1) as f64;
                (x, t.slope * (origin + x) + t.intercept)
            })
            .collect::<Vec<_>>()
    });

    let y_span = padded(value_span(
        points
            .iter()
            .chain(trend_samples.iter().flatten())
            .map(|&(_, y)| y),
    ));

    let mut canvas = Canvas::new(width.max(10), height.max(5), x_span, y_span);

    // Trend first so points stay visible on top of it.
    if let Some(samples) = &trend_samples {
        canvas.polyline(samples, TREND);
    }
    for &(x, y) in &points {
        canvas.set(x, y, POINT);
    }

    format!(
        "Plot: date=[{}, {}] | sales=[{:.2}, {:.2}]\n{}",
        first.date,
        last.date,
        y_span.0,
        y_span.1,
        canvas.render()
    )
}

/// Min/max of the plotted values; a flat series opens a ±1 band.
fn value_span(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() || !hi.is_finite() {
        (0.0, 1.0)
    } else if hi <= lo {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo, hi)
    }
}

/// Widen by 5% of the span on each side.
fn padded((lo, hi): (f64, f64)) -> (f64, f64) {
    let pad = ((hi - lo).abs() * 0.05).max(1e-12);
    (lo - pad, hi + pad)
}

struct Canvas {
    cells: Vec<Vec<char>>,
    x_span: (f64, f64),
    y_span: (f64, f64),
}

impl Canvas {
    fn new(width: usize, height: usize, x_span: (f64, f64), y_span: (f64, f64)) -> Self {
        Self {
            cells: vec![vec![' '; width]; height],
            x_span,
            y_span,
        }
    }

    fn width(&self) -> usize {
        self.cells[0].len()
    }

    fn height(&self) -> usize {
        self.cells.len()
    }

    fn column(&self, x: f64) -> usize {
        let (lo, hi) = self.x_span;
        let u = ((x - lo) / (hi - lo)).clamp(0.0, 1.0);
        (u * (self.width() - 1) as f64).round() as usize
    }

    /// Row 0 is the top of the chart (largest value).
    fn row(&self, y: f64) -> usize {
        let (lo, hi) = self.y_span;
        let u = ((y - lo) / (hi - lo)).clamp(0.0, 1.0);
        let last = (self.height() - 1) as f64;
        (last - u * last).round() as usize
    }

    fn set(&mut self, x: f64, y: f64, ch: char) {
        let (c, r) = (self.column(x), self.row(y));
        self.cells[r][c] = ch;
    }

    fn polyline(&mut self, samples: &[(f64, f64)], ch: char) {
        let cells: Vec<(usize, usize)> = samples.iter().map(|&(x, y)| (self.column(x), self.row(y))).collect();
        if let Some(&(c, r)) = cells.first() {
            self.cells[r][c] = ch;
        }
        for pair in cells.windows(2) {
            self.segment(pair[0], pair[1], ch);
        }
    }

    /// Bresenham segment; only fills blank cells.
    fn segment(&mut self, from: (usize, usize), to: (usize, usize), ch: char) {
        let (mut c, mut r) = (from.0 as isize, from.1 as isize);
        let (c1, r1) = (to.0 as isize, to.1 as isize);

        let dc = (c1 - c).abs();
        let dr = -(r1 - r).abs();
        let step_c = if c < c1 { 1 } else { -1 };
        let step_r = if r < r1 { 1 } else { -1 };
        let mut err = dc + dr;

        loop {
            if let Some(cell) = self
                .cells
                .get_mut(r as usize)
                .and_then(|line| line.get_mut(c as usize))
                .filter(|cell| **cell == ' ')
            {
                *cell = ch;
            }
            if c == c1 && r == r1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dr {
                err += dr;
                c += step_c;
            }
            if e2 <= dc {
                err += dc;
                r += step_r;
            }
        }
    }

    fn render(&self) -> String {
        self.cells
            .iter()
            .map(|line| line.iter().collect::<String>() + "\n")
            .collect()
    }
}
