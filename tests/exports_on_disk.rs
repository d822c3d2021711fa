use std::path::PathBuf;

use chrono::NaiveDate;

use sales_report::app::pipeline;
use sales_report::data::{SAMPLE_SALES, write_sample_csv};
use sales_report::domain::{ColumnSpec, ReportConfig};

fn config(csv_path: PathBuf, start: Option<NaiveDate>, end: Option<NaiveDate>) -> ReportConfig {
    ReportConfig {
        csv_path,
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

#[test]
fn sample_file_drives_a_full_report() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("sample.csv");
    write_sample_csv(&csv).unwrap();

    let mut cfg = config(csv, None, None);
    cfg.export_xlsx = Some(dir.path().join("report.xlsx"));
    cfg.export_summary = Some(dir.path().join("summary.json"));

    let run = pipeline::run_report(&cfg).unwrap();
    assert_eq!(run.dataset.len(), SAMPLE_SALES.len());
    assert_eq!(run.series.len(), SAMPLE_SALES.len());

    pipeline::write_exports(&cfg, &run).unwrap();

    let xlsx = std::fs::read(dir.path().join("report.xlsx")).unwrap();
    assert!(xlsx.starts_with(b"PK"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("summary.json")).unwrap()).unwrap();
    assert_eq!(json["tool"], "sales");
    assert_eq!(json["start"], "2025-01-01");
    assert_eq!(json["end"], "2025-01-15");
    assert_eq!(json["rows"], SAMPLE_SALES.len());
    let total: f64 = SAMPLE_SALES.iter().sum();
    assert_eq!(json["kpis"]["total"].as_f64().unwrap(), total);
    assert!(json["trend"]["slope"].is_number());
}

#[test]
fn empty_window_writes_null_kpis() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("sample.csv");
    write_sample_csv(&csv).unwrap();

    let mut cfg = config(
        csv,
        NaiveDate::from_ymd_opt(2024, 6, 1),
        NaiveDate::from_ymd_opt(2024, 6, 30),
    );
    cfg.export_summary = Some(dir.path().join("summary.json"));

    let run = pipeline::run_report(&cfg).unwrap();
    assert!(run.series.is_empty());
    pipeline::write_exports(&cfg, &run).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("summary.json")).unwrap()).unwrap();
    assert_eq!(json["rows"], 0);
    assert!(json["kpis"].is_null());
    assert!(json["trend"].is_null());
}

#[test]
fn missing_file_and_header_only_file_fail_with_exit_codes() {
    let dir = tempfile::tempdir().unwrap();

    let err = pipeline::run_report(&config(dir.path().join("nope.csv"), None, None)).unwrap_err();
    assert_eq!(err.exit_code(), 2);

    let csv = dir.path().join("empty.csv");
    std::fs::write(&csv, "date,sales\n").unwrap();
    let err = pipeline::run_report(&config(csv, None, None)).unwrap_err();
    assert_eq!(err.exit_code(), 3);
}
