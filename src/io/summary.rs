//! Write summary JSON files.
//!
//! Summary JSON is the "portable" form of a run: the selected range, the KPIs,
//! and the trend line. The schema is defined by `domain::SummaryFile`.

use std::fs::File;
use std::path::Path;

use tracing::info;

use crate::app::pipeline::Derived;
use crate::domain::{FilteredSeries, SummaryFile};
use crate::error::AppError;

pub fn build_summary(source: &Path, series: &FilteredSeries, derived: &Derived) -> SummaryFile {
    SummaryFile {
        tool: "sales".to_string(),
        source: source.display().to_string(),
        start: series.range.start(),
        end: series.range.end(),
        rows: series.len(),
        kpis: derived.kpis,
        trend: derived.trend,
    }
}

/// Write a summary JSON file.
pub fn write_summary_json(path: &Path, summary: &SummaryFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create summary JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, summary)
        .map_err(|e| AppError::new(2, format!("Failed to write summary JSON: {e}")))?;

    info!(path = %path.display(), "wrote summary json");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::{DateRange, KpiSummary};

    #[test]
    fn summary_serializes_absent_values_as_null() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let series = FilteredSeries {
            range: DateRange::new(d, d).unwrap(),
            rows: Vec::new(),
        };
        let derived = Derived { kpis: None, trend: None };
        let summary = build_summary(Path::new("in.csv"), &series, &derived);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["start"], "2025-01-05");
        assert_eq!(json["rows"], 0);
        assert!(json["kpis"].is_null());
        assert!(json["trend"].is_null());
    }

    #[test]
    fn summary_carries_kpis() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let series = FilteredSeries {
            range: DateRange::new(d, d).unwrap(),
            rows: Vec::new(),
        };
        let kpis = KpiSummary { count: 1, total: 5.0, mean: 5.0, max: 5.0, min: 5.0 };
        let derived = Derived { kpis: Some(kpis), trend: None };
        let json = serde_json::to_value(build_summary(Path::new("x.csv"), &series, &derived)).unwrap();
        assert_eq!(json["kpis"]["total"], 5.0);
        assert_eq!(json["tool"], "sales");
    }
}
