use crate::error::Result;
use crate::search::SearchReport;
use pesticide_tox_common::{unique_ingredients, Record};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FilteredExport<'a> {
    generated_at: String,
    keywords: &'a [String],
    ingredients: Vec<String>,
    records: &'a [Record],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportExport<'a> {
    generated_at: String,
    #[serde(flatten)]
    report: &'a SearchReport,
}

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

pub fn write_filtered(records: &[Record], keywords: &[String], output_path: &Path) -> Result<()> {
    let payload = FilteredExport {
        generated_at: timestamp(),
        keywords,
        ingredients: unique_ingredients(records),
        records,
    };
    let json = serde_json::to_string_pretty(&payload)?;
    std::fs::write(output_path, json)?;
    Ok(())
}

pub fn write_report(report: &SearchReport, output_path: &Path) -> Result<()> {
    let payload = ReportExport {
        generated_at: timestamp(),
        report,
    };
    let json = serde_json::to_string_pretty(&payload)?;
    std::fs::write(output_path, json)?;
    Ok(())
}
