//! Command-line parsing for the sales report tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the pipeline code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sales", version, about = "Sales CSV report generator (KPIs, trend, xlsx export)")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` wins.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load a CSV, print KPIs, growth table and trend, and optionally export.
    Report(ReportArgs),
    /// Write the built-in 15-day sample CSV.
    Sample(SampleArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying pipeline as `sales report`, but lets you
    /// move the date range and re-renders KPIs and the chart on every change.
    Tui(TuiArgs),
}

/// Input file and column options shared by `report` and `tui`.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Input CSV. When omitted, pick one from the current directory.
    #[arg(short = 'f', long, value_name = "CSV")]
    pub file: Option<PathBuf>,

    /// Header of the date column (default: $SALES_DATE_COLUMN or `date`).
    #[arg(long, value_name = "NAME")]
    pub date_column: Option<String>,

    /// Header of the sales column (default: $SALES_VALUE_COLUMN or `sales`).
    #[arg(long, value_name = "NAME")]
    pub sales_column: Option<String>,
}

/// Options for `sales report`.
#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// First date to include (YYYY-MM-DD). Defaults to the first date in the file.
    #[arg(long, value_parser = parse_iso_date)]
    pub start: Option<NaiveDate>,

    /// Last date to include (YYYY-MM-DD). Defaults to the last date in the file.
    #[arg(long, value_parser = parse_iso_date)]
    pub end: Option<NaiveDate>,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,

    /// Export the report workbook (.xlsx).
    #[arg(long, value_name = "XLSX")]
    pub export: Option<PathBuf>,

    /// Export KPIs + trend to JSON.
    #[arg(long = "export-summary", value_name = "JSON")]
    pub export_summary: Option<PathBuf>,
}

/// Options for `sales sample`.
#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    /// Output path, or `-` for stdout.
    #[arg(short, long, default_value = crate::data::SAMPLE_FILE_NAME)]
    pub output: PathBuf,
}

/// Options for `sales tui`.
#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Where `e` writes the workbook.
    #[arg(long, value_name = "XLSX", default_value = "sales_report.xlsx")]
    pub export: PathBuf,
}

pub fn parse_iso_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_report_flags() {
        let cli = Cli::parse_from([
            "sales", "-vv", "report", "-f", "in.csv", "--start", "2025-01-02", "--end", "2025-01-03",
            "--sales-column", "revenue", "--export", "out.xlsx",
        ]);
        assert_eq!(cli.verbose, 2);
        let Command::Report(args) = cli.command else {
            panic!("expected report subcommand");
        };
        assert_eq!(args.input.file, Some(PathBuf::from("in.csv")));
        assert_eq!(args.start, NaiveDate::from_ymd_opt(2025, 1, 2));
        assert_eq!(args.input.sales_column.as_deref(), Some("revenue"));
        assert_eq!(args.export, Some(PathBuf::from("out.xlsx")));
        assert!(!args.no_plot);
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(Cli::try_parse_from(["sales", "report", "--start", "01/02/2025"]).is_err());
    }

    #[test]
    fn sample_defaults_to_download_name() {
        let cli = Cli::parse_from(["sales", "sample"]);
        let Command::Sample(args) = cli.command else {
            panic!("expected sample subcommand");
        };
        assert_eq!(args.output, PathBuf::from("sample_sales_data.csv"));
    }
}
