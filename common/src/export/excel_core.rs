//! Excel generation
//!
//! Writes each [`Table`] to its own worksheet.

use super::{Cell, Table};
use crate::error::Result;
use rust_xlsxwriter::{Format, Workbook};

/// Worksheet names are limited to 31 characters
const MAX_SHEET_NAME: usize = 31;

fn sheet_name(title: &str) -> String {
    title
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(MAX_SHEET_NAME)
        .collect()
}

/// Render the tables into an xlsx buffer
pub fn generate_excel_buffer(tables: &[Table]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for table in tables {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name(&table.title))?;

        for (col, header) in table.headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
        }

        for (i, row) in table.rows.iter().enumerate() {
            let r = (i + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                let c = col as u16;
                match cell {
                    Cell::Text(s) => {
                        worksheet.write_string(r, c, s)?;
                    }
                    Cell::Number(n) => {
                        worksheet.write_number(r, c, *n)?;
                    }
                    Cell::Empty => {}
                }
            }
        }

        worksheet.autofit();
    }

    Ok(workbook.save_to_buffer()?)
}
