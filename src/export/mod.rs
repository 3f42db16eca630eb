//! Export module for Go Dutch
//!
//! Provides the multi-sheet family expense report in several formats:
//! - CSV: a directory with one spreadsheet-compatible file per sheet
//! - JSON: a single machine-readable document
//! - YAML: a single human-readable document

pub mod csv;
pub mod json;
pub mod report;
pub mod yaml;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{DutchError, DutchResult};

pub use self::csv::{export_report_csv, write_sheet_csv};
pub use self::json::export_report_json;
pub use self::report::{Cell, Report, Sheet, SETTLED_MESSAGE};
pub use self::yaml::export_report_yaml;

/// Output format for the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
    Yaml,
}

impl ReportFormat {
    /// File extension for single-file formats; CSV reports are directories
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            Self::Csv => None,
            Self::Json => Some("json"),
            Self::Yaml => Some("yaml"),
        }
    }
}

/// Default report name for a given day, e.g. `Family_Expenses_2024-05-01`
pub fn default_report_name(date: NaiveDate) -> String {
    format!("Family_Expenses_{}", date.format("%Y-%m-%d"))
}

/// Default report location inside `dir` for a given day and format
pub fn default_report_path(dir: &Path, date: NaiveDate, format: ReportFormat) -> PathBuf {
    let path = dir.join(default_report_name(date));
    match format.extension() {
        Some(ext) => path.with_extension(ext),
        None => path,
    }
}

/// Write the report to `path` in the given format
///
/// For CSV `path` is the directory that receives the sheet files.
pub fn write_report(report: &Report, format: ReportFormat, path: &Path) -> DutchResult<()> {
    match format {
        ReportFormat::Csv => {
            export_report_csv(report, path)?;
        }
        ReportFormat::Json | ReportFormat::Yaml => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| {
                    DutchError::Export(format!("Failed to create {}: {}", parent.display(), e))
                })?;
            }
            let file = File::create(path).map_err(|e| {
                DutchError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            if format == ReportFormat::Json {
                export_report_json(report, &mut writer)?;
            } else {
                export_report_yaml(report, &mut writer)?;
            }
            writer
                .flush()
                .map_err(|e| DutchError::Export(e.to_string()))?;
        }
    }

    tracing::info!(path = %path.display(), ?format, "report exported");
    Ok(())
}
