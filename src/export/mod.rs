pub mod excel;
pub mod json;
pub mod terminal;

use crate::error::{Result, ToxError};
use crate::search::SearchReport;
use pesticide_tox_common::Record;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Excel,
}

impl ExportFormat {
    /// Chosen from the output file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(ExportFormat::Json),
            "xlsx" => Ok(ExportFormat::Excel),
            _ => Err(ToxError::InvalidInput(format!(
                "unsupported output '{}': use a .json or .xlsx file",
                path.display()
            ))),
        }
    }
}

/// Write the filtered table (and its ingredient list) to `output`
pub fn export_filtered(records: &[Record], keywords: &[String], output: &Path) -> Result<()> {
    match ExportFormat::from_path(output)? {
        ExportFormat::Json => json::write_filtered(records, keywords, output)?,
        ExportFormat::Excel => excel::write_filtered(records, output)?,
    }
    println!("✔ Saved: {}", output.display());
    Ok(())
}

/// Write both search result tables to `output`
pub fn export_report(report: &SearchReport, output: &Path) -> Result<()> {
    match ExportFormat::from_path(output)? {
        ExportFormat::Json => json::write_report(report, output)?,
        ExportFormat::Excel => excel::write_report(report, output)?,
    }
    println!("✔ Saved: {}", output.display());
    Ok(())
}
