//! Formatted terminal output: KPI block, growth table, trend line.
//!
//! We keep formatting code in one place so:
//! - the pipeline code stays clean and testable
//! - output changes are localized

use crate::app::pipeline::RunOutput;
use crate::domain::{FilteredSeries, KpiSummary, TrendLine};

/// Format the run header plus KPIs and trend.
pub fn format_run_summary(source: &str, run: &RunOutput) -> String {
    let mut out = String::new();

    out.push_str("=== sales - Sales Report ===\n");
    out.push_str(&format!("File: {source}\n"));
    out.push_str(&format!(
        "Rows: {} loaded | {} selected\n",
        run.dataset.len(),
        run.series.len()
    ));
    out.push_str(&format!(
        "Range: {} .. {}\n",
        run.series.range.start(),
        run.series.range.end()
    ));
    out.push('\n');

    match &run.derived.kpis {
        Some(kpis) => out.push_str(&format_kpis(kpis)),
        None => out.push_str("No rows in the selected range.\n"),
    }

    if let Some(trend) = &run.derived.trend {
        out.push('\n');
        out.push_str(&format_trend(trend, &run.series));
    }

    out
}

/// Key figures, formatted the way the dashboard metrics show them.
pub fn format_kpis(kpis: &KpiSummary) -> String {
    let mut out = String::new();
    out.push_str("Key figures:\n");
    out.push_str(&format!("  {:<14} {:>14}\n", "Total sales", fmt_thousands(kpis.total, 0)));
    out.push_str(&format!("  {:<14} {:>14}\n", "Average sales", fmt_thousands(kpis.mean, 2)));
    out.push_str(&format!("  {:<14} {:>14}\n", "Max sales", fmt_thousands(kpis.max, 0)));
    out.push_str(&format!("  {:<14} {:>14}\n", "Min sales", fmt_thousands(kpis.min, 0)));
    out
}

/// Trend slope (per day) and the fitted values at the window edges.
pub fn format_trend(trend: &TrendLine, series: &FilteredSeries) -> String {
    let mut out = format!("Trend: {:+.2} per day", trend.slope);
    if let (Some(first), Some(last)) = (series.rows.first(), series.rows.last()) {
        out.push_str(&format!(
            " | fit {} = {:.2} -> {} = {:.2}",
            first.date,
            trend.predict(first.date),
            last.date,
            trend.predict(last.date),
        ));
    }
    out.push('\n');
    out
}

/// Per-row table: date, sales, growth (%).
pub fn format_table(series: &FilteredSeries) -> String {
    let mut out = String::new();
    out.push_str(format!("{:<10} {:>14} {:>12}\n", "date", "sales", "growth (%)").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<10} {:-<14} {:-<12}\n", "", "", "").trim_end());
    out.push('\n');

    for r in &series.rows {
        let growth = r
            .growth_pct
            .map(|g| format!("{g:.2}"))
            .unwrap_or_default();
        out.push_str(format!("{:<10} {:>14} {:>12}\n", r.date, fmt_sales(r.sales), growth).trim_end());
        out.push('\n');
    }

    out
}

/// Sales cells: integers print without decimals.
fn fmt_sales(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

/// Format with `,` thousands separators and a fixed number of decimals.
pub fn fmt_thousands(v: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, v.abs());
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    let is_zero = s.chars().all(|c| c == '0' || c == '.');
    if v.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}
