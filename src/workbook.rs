//! Registration workbook loader
//!
//! Reads every sheet without headers and converts cells to text so the
//! filters in `pesticide_tox_common::filter` can run on them.

use crate::error::{Result, ToxError};
use calamine::{open_workbook_auto, Data, Range, Reader};
use pesticide_tox_common::{Record, SheetRows};
use std::path::Path;

/// Open a workbook (xlsx/xls/ods) and read all of its sheets
pub fn load_workbook(path: &Path) -> Result<Vec<SheetRows>> {
    if !path.exists() {
        return Err(ToxError::FileNotFound(path.display().to_string()));
    }

    let mut workbook = open_workbook_auto(path)?;
    let mut sheets = Vec::new();

    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name)?;
        let sheet = sheet_from_range(&name, &range);
        log::debug!(
            "sheet '{}': {} rows, {} columns{}",
            sheet.name,
            sheet.rows.len(),
            sheet.width,
            if sheet.is_eligible() { "" } else { " (skipped)" }
        );
        sheets.push(sheet);
    }

    Ok(sheets)
}

/// Keyword vocabulary of the workbook at `path`
pub fn list_keywords(path: &Path) -> Result<Vec<String>> {
    let sheets = load_workbook(path)?;
    Ok(pesticide_tox_common::list_keywords(&sheets))
}

/// Rows of the workbook at `path` whose product class matches any keyword.
/// The workbook is read again on every call.
pub fn filter_rows(path: &Path, keywords: &[String]) -> Result<Vec<Record>> {
    let sheets = load_workbook(path)?;
    Ok(pesticide_tox_common::filter_rows(&sheets, keywords))
}

fn sheet_from_range(name: &str, range: &Range<Data>) -> SheetRows {
    let Some((_, start_col)) = range.start() else {
        return SheetRows::new(name, Vec::new());
    };

    // calamine ranges begin at the first used cell; keep column indexes absolute
    let offset = start_col as usize;
    let rows = range
        .rows()
        .map(|row| {
            let mut cells: Vec<Option<String>> = vec![None; offset];
            cells.extend(row.iter().map(cell_text));
            cells
        })
        .collect();

    SheetRows {
        name: name.to_string(),
        width: offset + range.width(),
        rows,
    }
}

fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_number(*f),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| format_number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    };

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Integral values (phone numbers, document IDs) are printed without a decimal part
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}
