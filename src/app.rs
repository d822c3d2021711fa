//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - loads the CSV and runs the pipeline
//! - prints KPIs, the growth table and the plot
//! - writes optional exports

use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, InputArgs, ReportArgs, SampleArgs};
use crate::domain::{ColumnSpec, ReportConfig};
use crate::error::AppError;

pub mod pipeline;

const SUBCOMMANDS: [&str; 4] = ["report", "sample", "tui", "help"];

/// Entry point for the `sales` binary.
pub fn run() -> Result<(), AppError> {
    // We want `sales` and `sales -f data.csv` to behave like `sales tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    init_tracing(cli.verbose);

    match cli.command {
        Command::Report(args) => handle_report(args),
        Command::Sample(args) => handle_sample(args),
        Command::Tui(args) => crate::tui::run(args),
    }
}

/// Install the global `tracing` subscriber (stderr).
///
/// `RUST_LOG` takes precedence; otherwise `-v` raises the level from `warn`.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let config = report_config_from_args(&args)?;
    let run = pipeline::run_report(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&config.csv_path.display().to_string(), &run)
    );

    if !run.series.is_empty() {
        println!("{}", crate::report::format_table(&run.series));
    }

    if config.plot && !run.series.is_empty() {
        let plot = crate::plot::render_ascii_plot(
            &run.series,
            run.derived.trend.as_ref(),
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    pipeline::write_exports(&config, &run)
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    if args.output.as_os_str() == "-" {
        let mut stdout = std::io::stdout();
        stdout
            .write_all(crate::data::sample_csv())
            .and_then(|_| stdout.flush())
            .map_err(|e| AppError::new(2, format!("Failed to write sample CSV: {e}")))?;
        return Ok(());
    }

    crate::data::write_sample_csv(&args.output)?;
    println!("Wrote {}", args.output.display());
    Ok(())
}

pub fn report_config_from_args(args: &ReportArgs) -> Result<ReportConfig, AppError> {
    Ok(ReportConfig {
        csv_path: resolve_csv_path(&args.input)?,
        columns: columns_from_args(&args.input),
        start: args.start,
        end: args.end,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_xlsx: args.export.clone(),
        export_summary: args.export_summary.clone(),
    })
}

pub fn columns_from_args(input: &InputArgs) -> ColumnSpec {
    ColumnSpec::from_env().with_overrides(input.date_column.as_deref(), input.sales_column.as_deref())
}

/// Use `-f` when given, otherwise fall back to the interactive picker.
pub fn resolve_csv_path(input: &InputArgs) -> Result<PathBuf, AppError> {
    if let Some(path) = &input.file {
        return crate::cli::picker::validate_csv_path(path);
    }
    if !std::io::stdin().is_terminal() {
        return Err(AppError::new(2, "No input file. Pass one with `-f <file.csv>`."));
    }
    crate::cli::picker::prompt_for_csv_path()
}

/// Rewrite argv so `sales` defaults to `sales tui`.
///
/// Rules:
/// - `sales`                      -> `sales tui`
/// - `sales -f x.csv ...`         -> `sales tui -f x.csv ...`
/// - `sales --help/--version/-h`  -> unchanged (show top-level help/version)
/// - anything naming a subcommand -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version");
    if is_top_level_help_or_version {
        return argv;
    }

    if argv.iter().skip(1).any(|a| SUBCOMMANDS.contains(&a.as_str())) {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(argv(&["sales"])), argv(&["sales", "tui"]));
    }

    #[test]
    fn leading_flags_go_to_tui() {
        assert_eq!(
            rewrite_args(argv(&["sales", "-f", "x.csv"])),
            argv(&["sales", "tui", "-f", "x.csv"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        for args in [
            &["sales", "report", "-f", "x.csv"][..],
            &["sales", "-v", "report"][..],
            &["sales", "--help"][..],
            &["sales", "sample"][..],
        ] {
            assert_eq!(rewrite_args(argv(args)), argv(args));
        }
    }

    #[test]
    fn report_config_keeps_flags() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("in.csv");
        std::fs::write(&csv, "date,sales\n").unwrap();

        let cli = crate::cli::Cli::parse_from([
            "sales",
            "report",
            "-f",
            csv.to_str().unwrap(),
            "--date-column",
            "day",
            "--no-plot",
        ]);
        let Command::Report(args) = cli.command else {
            panic!("expected report subcommand");
        };
        let config = report_config_from_args(&args).unwrap();
        assert_eq!(config.csv_path, csv);
        assert_eq!(config.columns.date, "day");
        assert!(!config.plot);
        assert!(config.export_xlsx.is_none());
    }
}
