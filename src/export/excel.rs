//! Excel output
//!
//! Tables are rendered by `pesticide_tox_common::export::excel_core`.

use crate::error::Result;
use crate::search::SearchReport;
use pesticide_tox_common::export::{self, excel_core};
use pesticide_tox_common::Record;
use std::path::Path;

pub fn write_filtered(records: &[Record], output_path: &Path) -> Result<()> {
    let buffer = excel_core::generate_excel_buffer(&[export::records_table(records)])?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}

pub fn write_report(report: &SearchReport, output_path: &Path) -> Result<()> {
    let tables = [
        export::results_table(&report.results),
        export::extracted_table(&report.extracted),
    ];
    let buffer = excel_core::generate_excel_buffer(&tables)?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}
