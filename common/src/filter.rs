//! Keyword index and row filter
//!
//! Works on sheets that were already converted to text cells, so the
//! matching rules can be tested without a workbook on disk.

use crate::types::Record;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Column holding the product class (0-based)
pub const CLASS_COLUMN: usize = 9;

/// One worksheet as text cells. Column positions are absolute (column A is index 0).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetRows {
    pub name: String,
    /// Number of columns spanned by the sheet
    pub width: usize,
    pub rows: Vec<Vec<Option<String>>>,
}

impl SheetRows {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        Self {
            name: name.into(),
            width,
            rows,
        }
    }

    /// Only sheets that reach the product class column take part in filtering.
    pub fn is_eligible(&self) -> bool {
        self.width > CLASS_COLUMN
    }

    fn class_values(&self) -> impl Iterator<Item = (&Vec<Option<String>>, &str)> {
        self.rows.iter().filter_map(|row| {
            row.get(CLASS_COLUMN)
                .and_then(|c| c.as_deref())
                .map(|class| (row, class))
        })
    }
}

/// Distinct non-blank product class values across all eligible sheets, sorted.
pub fn list_keywords(sheets: &[SheetRows]) -> Vec<String> {
    let mut keywords = BTreeSet::new();

    for sheet in sheets.iter().filter(|s| s.is_eligible()) {
        for (_, class) in sheet.class_values() {
            if !class.trim().is_empty() {
                keywords.insert(class.to_string());
            }
        }
    }

    keywords.into_iter().collect()
}

/// Rows whose product class contains any keyword (case-insensitive).
///
/// Each row appears at most once, even when it matches several keywords.
/// Blank keywords are ignored, so an empty selection yields no rows.
pub fn filter_rows(sheets: &[SheetRows], keywords: &[String]) -> Vec<Record> {
    let needles: Vec<String> = keywords
        .iter()
        .filter(|k| !k.trim().is_empty())
        .map(|k| k.to_lowercase())
        .collect();

    if needles.is_empty() {
        return Vec::new();
    }

    let mut records = Vec::new();
    for sheet in sheets.iter().filter(|s| s.is_eligible()) {
        for (row, class) in sheet.class_values() {
            let class = class.to_lowercase();
            if needles.iter().any(|n| class.contains(n.as_str())) {
                records.push(Record::from_cells(row));
            }
        }
    }

    records
}

/// Distinct active ingredients in first-appearance order
pub fn unique_ingredients(records: &[Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|r| r.active_ingredient.trim())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.to_string()))
        .map(|name| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(company: &str, ingredient: &str, class: &str) -> Vec<Option<String>> {
        let mut cells: Vec<Option<String>> = (0..12).map(|i| Some(format!("c{}", i))).collect();
        cells[0] = Some(company.to_string());
        cells[6] = Some(ingredient.to_string());
        cells[CLASS_COLUMN] = if class.is_empty() { None } else { Some(class.to_string()) };
        cells
    }

    fn sample_sheets() -> Vec<SheetRows> {
        vec![
            SheetRows::new(
                "Hoja1",
                vec![
                    row("A", "GLIFOSATO", "HERBICIDA"),
                    row("B", "IMIDACLOPRID", "INSECTICIDA"),
                    row("C", "MANCOZEB", "FUNGICIDA"),
                    row("D", "PARAQUAT", ""),
                ],
            ),
            SheetRows::new(
                "Hoja2",
                vec![
                    row("E", "2,4-D", "Herbicida selectivo"),
                    row("F", "GLIFOSATO", "HERBICIDA"),
                ],
            ),
            // narrow sheet: never eligible
            SheetRows::new(
                "Notas",
                vec![vec![Some("x".to_string()); 5]],
            ),
        ]
    }

    #[test]
    fn test_list_keywords_sorted_and_unique() {
        let keywords = list_keywords(&sample_sheets());
        assert_eq!(
            keywords,
            vec!["FUNGICIDA", "HERBICIDA", "Herbicida selectivo", "INSECTICIDA"]
        );
    }

    #[test]
    fn test_list_keywords_skips_narrow_sheets() {
        let narrow = SheetRows::new("n", vec![vec![Some("HERBICIDA".to_string()); 9]]);
        assert!(!narrow.is_eligible());
        assert!(list_keywords(&[narrow]).is_empty());
    }

    #[test]
    fn test_list_keywords_drops_blank_cells() {
        let sheet = SheetRows::new("s", vec![row("A", "X", "   ")]);
        assert!(list_keywords(&[sheet]).is_empty());
    }

    #[test]
    fn test_filter_rows_case_insensitive_substring() {
        let records = filter_rows(&sample_sheets(), &["herbicida".to_string()]);
        let companies: Vec<_> = records.iter().map(|r| r.company_name.as_str()).collect();
        assert_eq!(companies, vec!["A", "E", "F"]);
    }

    #[test]
    fn test_filter_rows_matching_two_keywords_appears_once() {
        let keywords = vec!["HERBICIDA".to_string(), "selectivo".to_string()];
        let records = filter_rows(&sample_sheets(), &keywords);
        let companies: Vec<_> = records.iter().map(|r| r.company_name.as_str()).collect();
        assert_eq!(companies, vec!["A", "E", "F"]);
    }

    #[test]
    fn test_filter_rows_no_match_is_empty() {
        let records = filter_rows(&sample_sheets(), &["NEMATICIDA".to_string()]);
        assert!(records.is_empty());
    }

    #[test]
    fn test_filter_rows_blank_keywords_ignored() {
        assert!(filter_rows(&sample_sheets(), &[]).is_empty());
        assert!(filter_rows(&sample_sheets(), &["  ".to_string()]).is_empty());
    }

    #[test]
    fn test_filter_rows_every_output_row_matches() {
        let keywords = vec!["CIDA".to_string()];
        let records = filter_rows(&sample_sheets(), &keywords);
        assert_eq!(records.len(), 5);
        for record in &records {
            assert!(record.product_class.to_lowercase().contains("cida"));
        }
    }

    #[test]
    fn test_unique_ingredients_first_appearance_order() {
        let records = filter_rows(&sample_sheets(), &["herbicida".to_string()]);
        assert_eq!(unique_ingredients(&records), vec!["GLIFOSATO", "2,4-D"]);
    }
}
