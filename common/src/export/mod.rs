//! Result tables
//!
//! Tabular views of the three outputs (filtered rows, toxicity units,
//! raw reference values) shared by the terminal printer and the Excel writer.

pub mod excel_core;

use crate::types::{ExtractedValues, Record, ReferenceField, ToxicityResult};

/// A single table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Empty => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

fn text_or_empty(value: Option<&str>) -> Cell {
    value.map_or(Cell::Empty, |v| Cell::Text(v.to_string()))
}

pub const RESULT_HEADERS: [&str; 6] = [
    "Ingrediente activo",
    "Mammals - Acute oral LD₅₀ (mg kg⁻¹)",
    "Contact acute LD₅₀ (μg bee⁻¹)",
    "Dosis ingresada",
    "UTm (Unidades Toxicológicas para mamíferos)",
    "UTi (Unidades Toxicológicas para insectos)",
];

pub fn records_table(records: &[Record]) -> Table {
    Table {
        title: "Tabla filtrada".to_string(),
        headers: Record::HEADERS.iter().map(|h| h.to_string()).collect(),
        rows: records
            .iter()
            .map(|r| r.values().iter().map(|v| Cell::Text(v.to_string())).collect())
            .collect(),
    }
}

pub fn results_table(results: &[ToxicityResult]) -> Table {
    Table {
        title: "Resultados toxicologicos".to_string(),
        headers: RESULT_HEADERS.iter().map(|h| h.to_string()).collect(),
        rows: results
            .iter()
            .map(|r| {
                vec![
                    Cell::Text(r.ingredient.clone()),
                    Cell::Text(r.mammal_ld50.clone()),
                    Cell::Text(r.bee_ld50.clone()),
                    Cell::Number(r.dose),
                    Cell::Number(r.utm),
                    Cell::Number(r.uti),
                ]
            })
            .collect(),
    }
}

pub fn extracted_table(extracted: &[ExtractedValues]) -> Table {
    let mut headers = vec!["Ingrediente activo".to_string(), "Dosis ingresada".to_string()];
    headers.extend(ReferenceField::ALL.iter().map(|f| f.label().to_string()));
    headers.push("Enlace".to_string());

    Table {
        title: "Valores de referencia".to_string(),
        headers,
        rows: extracted
            .iter()
            .map(|e| {
                let mut row = vec![Cell::Text(e.ingredient.clone()), Cell::Number(e.dose)];
                row.extend(ReferenceField::ALL.iter().map(|f| text_or_empty(e.values.get(*f))));
                row.push(Cell::Text(e.link.clone()));
                row
            })
            .collect(),
    }
}
