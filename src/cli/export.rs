//! CLI command for report export

use std::path::PathBuf;

use clap::Args;

use crate::config::settings::Settings;
use crate::error::DutchResult;
use crate::export::{default_report_path, write_report, Report, ReportFormat};
use crate::services::{ExpenseService, SplitMode};
use crate::storage::Storage;

/// Export arguments
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output path: a directory for CSV, a file for JSON/YAML
    /// (default: exports/Family_Expenses_<date>)
    pub path: Option<PathBuf>,

    /// Report format (default: from settings)
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

/// Handle the export command
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    split_mode: SplitMode,
    args: ExportArgs,
) -> DutchResult<()> {
    let format = args.format.unwrap_or(settings.report_format);
    let path = args.path.unwrap_or_else(|| {
        default_report_path(
            &storage.paths().export_dir(),
            chrono::Local::now().date_naive(),
            format,
        )
    });

    let snapshot = ExpenseService::new(storage, split_mode).snapshot()?;
    let report = Report::build(&snapshot, &settings.report_date_format);
    write_report(&report, format, &path)?;

    println!(
        "Exported {} expense(s) and {} settlement(s) to {}",
        snapshot.expenses.len(),
        snapshot.settlements.len(),
        path.display()
    );

    Ok(())
}
