//! Shared pipeline logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load -> filter (+growth) -> {trend, KPIs} -> export
//!
//! Every entry point takes all of its inputs explicitly and holds no state, so
//! front-ends can rerun the whole chain on each interaction.

use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use crate::analysis::{compute_trend, summarize};
use crate::domain::{ColumnSpec, FilteredSeries, KpiSummary, ReportConfig, SalesDataset, TrendLine};
use crate::error::{AppError, ReportError};

/// Outputs derived from one filtered series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Derived {
    pub kpis: Option<KpiSummary>,
    pub trend: Option<TrendLine>,
}

/// Parse uploaded CSV bytes.
pub fn load(bytes: &[u8], columns: &ColumnSpec) -> Result<SalesDataset, ReportError> {
    crate::io::ingest::load(bytes, columns)
}

/// Restrict to `[start, end]` and annotate growth.
pub fn filter(dataset: &SalesDataset, start: NaiveDate, end: NaiveDate) -> Result<FilteredSeries, ReportError> {
    crate::analysis::filter(dataset, start, end)
}

/// Compute KPIs and the trend line. Both are `None` for an empty series.
pub fn derive_and_summarize(series: &FilteredSeries) -> Derived {
    let kpis = summarize(series);
    let trend = compute_trend(series);
    debug!(rows = series.len(), ?kpis, ?trend, "derived metrics");
    Derived { kpis, trend }
}

/// Build the spreadsheet report.
pub fn export(summary: Option<&KpiSummary>, series: &FilteredSeries) -> Result<Vec<u8>, ReportError> {
    crate::io::export::export(summary, series)
}

/// All computed outputs of a single `sales report` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub dataset: SalesDataset,
    pub series: FilteredSeries,
    pub derived: Derived,
}

/// Execute the full pipeline from a CSV file on disk.
pub fn run_report(config: &ReportConfig) -> Result<RunOutput, AppError> {
    let dataset = crate::io::ingest::load_path(&config.csv_path, &config.columns)?;
    run_report_with_dataset(config, dataset)
}

/// Execute the pipeline against an already-loaded dataset.
///
/// Missing bounds default to the dataset's first/last date.
pub fn run_report_with_dataset(config: &ReportConfig, dataset: SalesDataset) -> Result<RunOutput, AppError> {
    let Some(span) = dataset.span() else {
        return Err(AppError::new(
            3,
            format!("No data rows in '{}'.", config.csv_path.display()),
        ));
    };

    let start = config.start.unwrap_or(span.start());
    let end = config.end.unwrap_or(span.end());
    let series = filter(&dataset, start, end)?;
    let derived = derive_and_summarize(&series);

    Ok(RunOutput {
        dataset,
        series,
        derived,
    })
}

/// Write the optional exports requested by `config`.
pub fn write_exports(config: &ReportConfig, run: &RunOutput) -> Result<(), AppError> {
    if let Some(path) = &config.export_xlsx {
        export_to_path(path, &run.series, &run.derived)?;
    }
    if let Some(path) = &config.export_summary {
        let summary = crate::io::summary::build_summary(&config.csv_path, &run.series, &run.derived);
        crate::io::summary::write_summary_json(path, &summary)?;
    }
    Ok(())
}

/// Build the report and write it to `path`.
pub fn export_to_path(path: &Path, series: &FilteredSeries, derived: &Derived) -> Result<(), ReportError> {
    if series.is_empty() {
        tracing::warn!(path = %path.display(), "exporting an empty selection");
    }
    let bytes = export(derived.kpis.as_ref(), series)?;
    crate::io::export::write_report_xlsx(path, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn config(start: Option<NaiveDate>, end: Option<NaiveDate>) -> ReportConfig {
        ReportConfig {
            csv_path: PathBuf::from("memory.csv"),
            columns: ColumnSpec::default(),
            start,
            end,
            plot: false,
            plot_width: 60,
            plot_height: 10,
            export_xlsx: None,
            export_summary: None,
        }
    }

    fn scenario_a() -> SalesDataset {
        let csv = "date,sales\n2025-01-01,100\n2025-01-02,150\n2025-01-03,120\n";
        load(csv.as_bytes(), &ColumnSpec::default()).unwrap()
    }

    #[test]
    fn derive_is_pure() {
        let series = filter(&scenario_a(), d(2025, 1, 1), d(2025, 1, 3)).unwrap();
        let a = derive_and_summarize(&series);
        let b = derive_and_summarize(&series);
        assert_eq!(a, b);
        assert_eq!(a.kpis.unwrap().total, 370.0);
        assert!(a.trend.is_some());
    }

    #[test]
    fn empty_selection_has_no_kpis_or_trend() {
        let series = filter(&scenario_a(), d(2025, 1, 5), d(2025, 1, 10)).unwrap();
        let derived = derive_and_summarize(&series);
        assert_eq!(derived, Derived { kpis: None, trend: None });
    }

    #[test]
    fn single_row_has_kpis_but_no_trend() {
        let series = filter(&scenario_a(), d(2025, 1, 2), d(2025, 1, 2)).unwrap();
        let derived = derive_and_summarize(&series);
        assert_eq!(derived.kpis.unwrap().mean, 150.0);
        assert!(derived.trend.is_none());
    }

    #[test]
    fn run_defaults_to_full_span() {
        let run = run_report_with_dataset(&config(None, None), scenario_a()).unwrap();
        assert_eq!(run.series.len(), 3);
        assert_eq!(run.series.range.start(), d(2025, 1, 1));
        assert_eq!(run.series.range.end(), d(2025, 1, 3));
    }

    #[test]
    fn run_rejects_inverted_range() {
        let err = run_report_with_dataset(&config(Some(d(2025, 1, 3)), Some(d(2025, 1, 1))), scenario_a())
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("invalid date range"));
    }

    #[test]
    fn run_on_empty_dataset_is_no_data() {
        let err = run_report_with_dataset(&config(None, None), SalesDataset::default()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
