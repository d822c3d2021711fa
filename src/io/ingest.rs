//! CSV ingest and validation.
//!
//! Turns raw CSV bytes into a date-sorted `SalesDataset`.
//!
//! Design goals:
//! - **Strict schema**: both configured columns must exist
//! - **All-or-nothing**: one bad row rejects the upload, with its line number
//! - **Deterministic behavior**: stable sort, no merging of duplicate dates
//! - **Separation of concerns**: no filtering or metrics here

use std::collections::HashMap;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use tracing::info;

use crate::domain::{ColumnSpec, SalesDataset, SalesRecord};
use crate::error::ReportError;

/// Parse CSV bytes into a sorted dataset.
pub fn load(bytes: &[u8], columns: &ColumnSpec) -> Result<SalesDataset, ReportError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| ReportError::schema(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    let date_idx = require_column(&header_map, &columns.date)?;
    let sales_idx = require_column(&header_map, &columns.sales)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header, and lines are 1-based.
        let line = idx + 2;
        let record = result.map_err(|e| ReportError::schema_at(line, format!("CSV parse error: {e}")))?;
        let row = parse_row(&record, date_idx, sales_idx, columns)
            .map_err(|message| ReportError::schema_at(line, message))?;
        records.push(row);
    }

    let dataset = SalesDataset::from_records(records);
    info!(
        rows = dataset.len(),
        first = ?dataset.first_date(),
        last = ?dataset.last_date(),
        "loaded sales dataset"
    );
    Ok(dataset)
}

/// Read and parse a CSV file.
pub fn load_path(path: &Path, columns: &ColumnSpec) -> Result<SalesDataset, ReportError> {
    let bytes = std::fs::read(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load(&bytes, columns)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // First occurrence wins when a header is repeated.
        map.entry(normalize_header_name(name)).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, schema validation will incorrectly
    // report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_lowercase()
}

fn require_column(header_map: &HashMap<String, usize>, name: &str) -> Result<usize, ReportError> {
    header_map
        .get(&normalize_header_name(name))
        .copied()
        .ok_or_else(|| ReportError::schema(format!("Missing required column: `{name}`")))
}

fn parse_row(
    record: &StringRecord,
    date_idx: usize,
    sales_idx: usize,
    columns: &ColumnSpec,
) -> Result<SalesRecord, String> {
    let date = parse_date(get_required(record, date_idx, &columns.date)?)?;
    let sales = parse_sales(get_required(record, sales_idx, &columns.sales)?)?;
    Ok(SalesRecord { date, sales })
}

fn get_required<'a>(record: &'a StringRecord, idx: usize, name: &str) -> Result<&'a str, String> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // ISO dates are the norm, but hand-edited exports often use `DD/MM/YYYY`
    // or carry a midnight timestamp.
    const FMTS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];
    const DATETIME_FMTS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, DD/MM/YYYY, DD-MM-YYYY, YYYY/MM/DD."
    ))
}

fn parse_sales(s: &str) -> Result<f64, String> {
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid sales value '{s}' (not a number)."))?;
    if !v.is_finite() {
        return Err(format!("Invalid sales value '{s}' (must be finite)."));
    }
    if v < 0.0 {
        return Err(format!("Invalid sales value '{s}' (must be >= 0)."));
    }
    Ok(v)
}
