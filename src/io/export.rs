//! Spreadsheet report export.
//!
//! The workbook has a single sheet, `Report`:
//!
//! ```text
//! KPI            | Value
//! Total sales    | <total>
//! Average sales  | <mean>
//! Max sales      | <max>
//! Min sales      | <min>
//! (blank)
//! Date           | Sales  | Growth (%)
//! YYYY-MM-DD     | <sales>| <growth, 2dp, or blank>
//! ```
//!
//! `export` only builds bytes; writing them somewhere is the caller's choice.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};
use tracing::info;

use crate::domain::{FilteredSeries, KpiSummary};
use crate::error::ReportError;

pub const SHEET_NAME: &str = "Report";

pub const KPI_LABELS: [&str; 4] = ["Total sales", "Average sales", "Max sales", "Min sales"];
pub const TABLE_HEADER: [&str; 3] = ["Date", "Sales", "Growth (%)"];

/// Zero-based row of the table header (after the KPI block and a blank row).
pub const TABLE_HEADER_ROW: u32 = 6;

/// Build the `.xlsx` report for a filtered series.
///
/// With `summary = None` the KPI labels are still written, with blank values.
pub fn export(summary: Option<&KpiSummary>, series: &FilteredSeries) -> Result<Vec<u8>, ReportError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    sheet.set_column_width(0, 16)?;
    sheet.set_column_width(2, 12)?;

    sheet.write_string_with_format(0, 0, "KPI", &bold)?;
    sheet.write_string_with_format(0, 1, "Value", &bold)?;

    let values = summary.map(|s| [s.total, s.mean, s.max, s.min]);
    for (i, label) in KPI_LABELS.iter().enumerate() {
        let row = 1 + i as u32;
        sheet.write_string(row, 0, *label)?;
        if let Some(values) = values {
            sheet.write_number(row, 1, values[i])?;
        }
    }

    for (col, header) in TABLE_HEADER.iter().enumerate() {
        sheet.write_string_with_format(TABLE_HEADER_ROW, col as u16, *header, &bold)?;
    }

    for (i, r) in series.rows.iter().enumerate() {
        let row = TABLE_HEADER_ROW + 1 + i as u32;
        sheet.write_string(row, 0, r.date.format("%Y-%m-%d").to_string())?;
        sheet.write_number(row, 1, r.sales)?;
        if let Some(g) = r.growth_pct {
            sheet.write_number(row, 2, round2(g))?;
        }
    }

    let bytes = workbook.save_to_buffer()?;
    info!(rows = series.len(), bytes = bytes.len(), "built xlsx report");
    Ok(bytes)
}

/// Write report bytes to disk.
pub fn write_report_xlsx(path: &Path, bytes: &[u8]) -> Result<(), ReportError> {
    std::fs::write(path, bytes).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "wrote xlsx report");
    Ok(())
}

/// Round to 2 decimal places, as shown in the report's growth column.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
