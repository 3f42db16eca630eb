//! JSON Export functionality
//!
//! Writes the whole report as a single JSON document.

use std::io::Write;

use crate::error::{DutchError, DutchResult};

use super::report::Report;

/// Export the report to JSON format
pub fn export_report_json<W: Write>(report: &Report, writer: &mut W) -> DutchResult<()> {
    serde_json::to_writer_pretty(&mut *writer, report)
        .map_err(|e| DutchError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| DutchError::Export(e.to_string()))?;
    Ok(())
}
