//! YAML Export functionality
//!
//! Writes the whole report as a human-readable YAML document.

use std::io::Write;

use crate::error::{DutchError, DutchResult};

use super::report::Report;

/// Export the report to YAML format
pub fn export_report_yaml<W: Write>(report: &Report, writer: &mut W) -> DutchResult<()> {
    let export_err = |e: std::io::Error| DutchError::Export(e.to_string());

    writeln!(writer, "# Go Dutch Family Expense Report").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", report.generated_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", report.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, report).map_err(|e| DutchError::Export(e.to_string()))?;

    Ok(())
}
