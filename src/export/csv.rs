//! CSV Export functionality
//!
//! Writes each report sheet to its own CSV file inside a report directory.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{DutchError, DutchResult};

use super::report::{Report, Sheet};

/// Write one sheet as CSV, header row first
pub fn write_sheet_csv<W: Write>(sheet: &Sheet, writer: W) -> DutchResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(&sheet.headers)?;
    for row in &sheet.rows {
        csv_writer.write_record(row.iter().map(|cell| cell.render()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| DutchError::Export(e.to_string()))?;
    Ok(())
}

/// Export the report as a directory with one `<sheet name>.csv` per sheet
///
/// Returns the written files in sheet order.
pub fn export_report_csv(report: &Report, dir: &Path) -> DutchResult<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| {
        DutchError::Export(format!("Failed to create {}: {}", dir.display(), e))
    })?;

    let mut written = Vec::with_capacity(report.sheets.len());
    for sheet in &report.sheets {
        let path = dir.join(format!("{}.csv", sheet.name));
        let file = fs::File::create(&path).map_err(|e| {
            DutchError::Export(format!("Failed to create {}: {}", path.display(), e))
        })?;
        write_sheet_csv(sheet, file)?;
        written.push(path);
    }

    Ok(written)
}
