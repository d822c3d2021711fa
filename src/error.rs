//! Error types.
//!
//! - `ReportError` is what the library pipeline returns. Front-ends match on it
//!   to tell a rejected upload apart from an inverted date range.
//! - `AppError` is the binary boundary: a message plus a process exit code.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors produced by the load → filter → derive → export pipeline.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The input is missing a required column or contains a bad cell.
    ///
    /// The whole upload is rejected; there is no partial load.
    #[error("schema error: {message}")]
    Schema {
        /// 1-based CSV line, when the problem is tied to a row.
        line: Option<usize>,
        message: String,
    },

    /// The requested range has its start after its end.
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("spreadsheet export failed: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    #[error("failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            line: None,
            message: message.into(),
        }
    }

    pub fn schema_at(line: usize, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Schema {
            line: Some(line),
            message: format!("line {line}: {message}"),
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        AppError::new(2, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_at_prefixes_line() {
        let err = ReportError::schema_at(4, "Invalid date 'x'.");
        assert_eq!(err.to_string(), "schema error: line 4: Invalid date 'x'.");
        assert!(matches!(err, ReportError::Schema { line: Some(4), .. }));
    }

    #[test]
    fn report_error_maps_to_usage_exit_code() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let app: AppError = ReportError::InvalidRange { start, end }.into();
        assert_eq!(app.exit_code(), 2);
        assert_eq!(
            app.to_string(),
            "invalid date range: start 2025-01-03 is after end 2025-01-01"
        );
    }
}
