//! JSON / Excel output tests

use calamine::{open_workbook_auto, Data, Reader};
use pesticide_tox::error::ToxError;
use pesticide_tox::export;
use pesticide_tox::search::SearchReport;
use pesticide_tox_common::{ExtractedValues, Record, ReferenceValues, ToxicityResult};
use tempfile::tempdir;

fn record(company: &str, ingredient: &str) -> Record {
    Record {
        company_name: company.to_string(),
        active_ingredient: ingredient.to_string(),
        product_class: "HERBICIDA".to_string(),
        ..Default::default()
    }
}

fn sample_report() -> SearchReport {
    SearchReport {
        results: vec![ToxicityResult {
            ingredient: "GLIFOSATO".to_string(),
            mammal_ld50: "2000".to_string(),
            bee_ld50: "100".to_string(),
            dose: 5.0,
            utm: 0.0025,
            uti: 0.05,
        }],
        extracted: vec![
            ExtractedValues {
                ingredient: "GLIFOSATO".to_string(),
                dose: 5.0,
                values: ReferenceValues {
                    mammal_ld50: Some("2000".to_string()),
                    bee_ld50: Some("100".to_string()),
                    ..Default::default()
                },
                link: "https://ppdb.example.org/en/reports/373.htm".to_string(),
            },
            ExtractedValues {
                ingredient: "PARAQUAT".to_string(),
                dose: 1.0,
                values: ReferenceValues::default(),
                link: "https://ppdb.example.org/en/reports/506.htm".to_string(),
            },
        ],
        ..Default::default()
    }
}

#[test]
fn test_export_filtered_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("filtrado.json");
    let records = vec![record("A", "GLIFOSATO"), record("B", "PARAQUAT"), record("C", "GLIFOSATO")];

    export::export_filtered(&records, &["HERBICIDA".to_string()], &output).unwrap();

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["keywords"], serde_json::json!(["HERBICIDA"]));
    assert_eq!(json["ingredients"], serde_json::json!(["GLIFOSATO", "PARAQUAT"]));
    assert_eq!(json["records"].as_array().unwrap().len(), 3);
    assert_eq!(json["records"][1]["NOMBRE EMPRESA"], "B");
    assert_eq!(json["records"][1]["INGREDIENTE ACTIVO"], "PARAQUAT");
    assert!(json["generatedAt"].is_string());
}

#[test]
fn test_export_filtered_excel() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("filtrado.xlsx");
    let records = vec![record("A", "GLIFOSATO"), record("B", "PARAQUAT")];

    export::export_filtered(&records, &["HERBICIDA".to_string()], &output).unwrap();

    let mut book = open_workbook_auto(&output).unwrap();
    assert_eq!(book.sheet_names(), vec!["Tabla filtrada".to_string()]);
    let range = book.worksheet_range("Tabla filtrada").unwrap();
    assert_eq!(range.height(), 3);
    assert_eq!(range.get_value((0, 0)), Some(&Data::String("NOMBRE EMPRESA".to_string())));
    assert_eq!(range.get_value((2, 6)), Some(&Data::String("PARAQUAT".to_string())));
}

#[test]
fn test_export_report_excel_has_both_tables() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("resultados.xlsx");

    export::export_report(&sample_report(), &output).unwrap();

    let mut book = open_workbook_auto(&output).unwrap();
    assert_eq!(
        book.sheet_names(),
        vec!["Resultados toxicologicos".to_string(), "Valores de referencia".to_string()]
    );

    let results = book.worksheet_range("Resultados toxicologicos").unwrap();
    assert_eq!(results.height(), 2);
    assert_eq!(results.get_value((1, 0)), Some(&Data::String("GLIFOSATO".to_string())));
    assert_eq!(results.get_value((1, 5)), Some(&Data::Float(0.05)));

    let extracted = book.worksheet_range("Valores de referencia").unwrap();
    assert_eq!(extracted.height(), 3);
    assert_eq!(extracted.get_value((2, 0)), Some(&Data::String("PARAQUAT".to_string())));
    assert_eq!(extracted.get_value((0, 7)), Some(&Data::String("Enlace".to_string())));
    assert_eq!(
        extracted.get_value((2, 7)),
        Some(&Data::String("https://ppdb.example.org/en/reports/506.htm".to_string()))
    );
}

#[test]
fn test_export_report_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("resultados.json");

    export::export_report(&sample_report(), &output).unwrap();

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["results"][0]["ingredient"], "GLIFOSATO");
    assert_eq!(json["extracted"].as_array().unwrap().len(), 2);
    assert_eq!(json["extracted"][1]["link"], "https://ppdb.example.org/en/reports/506.htm");
    assert!(json["warnings"].as_array().unwrap().is_empty());
}

#[test]
fn test_export_rejects_unknown_extension() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("resultados.csv");

    let err = export::export_report(&sample_report(), &output).unwrap_err();
    assert!(matches!(err, ToxError::InvalidInput(_)));
    assert!(!output.exists());
}

#[test]
fn test_export_to_missing_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("no/such/dir/resultados.json");

    let err = export::export_report(&sample_report(), &output).unwrap_err();
    assert!(matches!(err, ToxError::Io(_)));
}
