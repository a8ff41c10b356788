//! Interactive session
//!
//! `Session` holds the state carried between steps of one interactive run
//! (keyword vocabulary, filtered rows, selected ingredients, doses). The
//! prompt loop in [`run_interactive`] owns it and passes it to each step.

use crate::config::Config;
use crate::error::{Result, ToxError};
use crate::export::{self, terminal};
use crate::lookup::{LookupClient, PageFetcher};
use crate::search::{self, validate_dose, DoseEntry, SearchReport};
use crate::workbook;
use dialoguer::{Confirm, Input, MultiSelect};
use pesticide_tox_common::export::{extracted_table, records_table, results_table};
use pesticide_tox_common::{unique_ingredients, Record};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct Session {
    /// Product class vocabulary of the workbook
    pub keywords: Vec<String>,
    pub selected_keywords: Vec<String>,
    /// Rows from the last filter action
    pub records: Vec<Record>,
    /// Distinct active ingredients of `records`
    pub ingredients: Vec<String>,
    pub selected_ingredients: Vec<String>,
    doses: HashMap<String, f64>,
}

impl Session {
    pub fn new(keywords: Vec<String>) -> Self {
        Self {
            keywords,
            ..Default::default()
        }
    }

    /// Read the keyword vocabulary; failing here aborts the session
    pub fn open(workbook_path: &Path) -> Result<Self> {
        Ok(Self::new(workbook::list_keywords(workbook_path)?))
    }

    /// Filter the workbook again with `selected`. Clears ingredient and dose state.
    pub fn apply_filter(&mut self, workbook_path: &Path, selected: Vec<String>) -> Result<usize> {
        let records = workbook::filter_rows(workbook_path, &selected)?;
        self.set_records(selected, records);
        Ok(self.records.len())
    }

    pub fn set_records(&mut self, selected: Vec<String>, records: Vec<Record>) {
        self.selected_keywords = selected;
        self.ingredients = unique_ingredients(&records);
        self.records = records;
        self.selected_ingredients.clear();
        self.doses.clear();
    }

    pub fn select_ingredients(&mut self, names: Vec<String>) -> Result<()> {
        if let Some(unknown) = names.iter().find(|n| !self.ingredients.contains(*n)) {
            return Err(ToxError::InvalidInput(format!(
                "'{}' is not among the filtered ingredients",
                unknown
            )));
        }
        self.doses.retain(|name, _| names.contains(name));
        self.selected_ingredients = names;
        Ok(())
    }

    pub fn set_dose(&mut self, ingredient: &str, dose: f64) -> Result<()> {
        if !self.selected_ingredients.iter().any(|n| n == ingredient) {
            return Err(ToxError::InvalidInput(format!("'{}' is not selected", ingredient)));
        }
        validate_dose(dose)?;
        self.doses.insert(ingredient.to_string(), dose);
        Ok(())
    }

    /// Selected ingredients in selection order. Ingredients without a dose get 0.
    pub fn dose_entries(&self) -> Vec<DoseEntry> {
        self.selected_ingredients
            .iter()
            .map(|name| DoseEntry {
                ingredient: name.clone(),
                dose: self.doses.get(name).copied().unwrap_or(0.0),
            })
            .collect()
    }

    pub fn search<F: PageFetcher>(&self, client: &LookupClient<F>) -> SearchReport {
        let entries = self.dose_entries();
        let progress = search::progress_bar(entries.len());
        search::run_search(client, &entries, &progress)
    }
}

/// Print both search result tables
pub fn print_report(report: &SearchReport) {
    if report.results.is_empty() {
        println!("\n⚠ No toxicological units could be computed");
    } else {
        terminal::print_table(&results_table(&report.results));
    }
    if !report.extracted.is_empty() {
        terminal::print_table(&extracted_table(&report.extracted));
    }
}

/// Prompt-driven run: keywords -> filter -> ingredients -> doses -> search
pub fn run_interactive(config: &Config, workbook_path: &Path) -> Result<()> {
    let mut session = Session::open(workbook_path)?;
    let client = LookupClient::from_config(config)?;
    println!("✔ {} keywords in {}\n", session.keywords.len(), workbook_path.display());

    if session.keywords.is_empty() {
        println!("⚠ No sheet in the workbook has a product class column");
        return Ok(());
    }

    loop {
        step(&mut session, &client, workbook_path)?;

        let again = Confirm::new()
            .with_prompt("Start another search?")
            .default(false)
            .interact()?;
        if !again {
            break;
        }
    }

    Ok(())
}

/// One pass through the prompts
fn step<F: PageFetcher>(session: &mut Session, client: &LookupClient<F>, workbook_path: &Path) -> Result<()> {
    let picks = MultiSelect::new()
        .with_prompt("Select keywords to filter (space to toggle, enter to confirm)")
        .items(&session.keywords)
        .interact()?;
    if picks.is_empty() {
        println!("⚠ No keyword selected");
        return Ok(());
    }
    let selected: Vec<String> = picks.iter().map(|&i| session.keywords[i].clone()).collect();
    println!("Selected: {}", selected.join(", "));

    let count = session.apply_filter(workbook_path, selected)?;
    if count == 0 {
        println!("⚠ No rows match the selected keywords");
        return Ok(());
    }
    terminal::print_table(&records_table(&session.records));
    println!("Active ingredients: {}\n", session.ingredients.join(", "));

    let picks = MultiSelect::new()
        .with_prompt("Select one or more active ingredients")
        .items(&session.ingredients)
        .interact()?;
    if picks.is_empty() {
        println!("⚠ No ingredient selected");
        return Ok(());
    }
    let names: Vec<String> = picks.iter().map(|&i| session.ingredients[i].clone()).collect();
    session.select_ingredients(names.clone())?;

    for name in &names {
        let dose: f64 = Input::new()
            .with_prompt(format!("Dose for {}", name))
            .default(0.0)
            .validate_with(|d: &f64| -> std::result::Result<(), String> {
                validate_dose(*d).map_err(|e| e.to_string())
            })
            .interact_text()?;
        session.set_dose(name, dose)?;
    }

    let report = session.search(client);
    print_report(&report);
    offer_export(&report)
}

fn offer_export(report: &SearchReport) -> Result<()> {
    if report.results.is_empty() && report.extracted.is_empty() {
        return Ok(());
    }

    let save = Confirm::new()
        .with_prompt("Save the results to a file?")
        .default(false)
        .interact()?;
    if !save {
        return Ok(());
    }

    let path: String = Input::new()
        .with_prompt("Output file (.json or .xlsx)")
        .default("resultados.xlsx".to_string())
        .interact_text()?;
    if let Err(e) = export::export_report(report, &PathBuf::from(path)) {
        println!("⚠ {}", e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ingredient: &str, class: &str) -> Record {
        Record {
            active_ingredient: ingredient.to_string(),
            product_class: class.to_string(),
            ..Default::default()
        }
    }

    fn filtered_session() -> Session {
        let mut session = Session::new(vec!["FUNGICIDA".into(), "HERBICIDA".into()]);
        session.set_records(
            vec!["HERBICIDA".into()],
            vec![record("GLIFOSATO", "HERBICIDA"), record("PARAQUAT", "HERBICIDA"), record("GLIFOSATO", "HERBICIDA")],
        );
        session
    }

    #[test]
    fn test_set_records_derives_ingredients() {
        let session = filtered_session();
        assert_eq!(session.ingredients, vec!["GLIFOSATO", "PARAQUAT"]);
        assert_eq!(session.records.len(), 3);
    }

    #[test]
    fn test_dose_entries_follow_selection_order() {
        let mut session = filtered_session();
        session.select_ingredients(vec!["PARAQUAT".into(), "GLIFOSATO".into()]).unwrap();
        session.set_dose("GLIFOSATO", 5.0).unwrap();

        let entries = session.dose_entries();
        assert_eq!(entries[0], DoseEntry { ingredient: "PARAQUAT".into(), dose: 0.0 });
        assert_eq!(entries[1], DoseEntry { ingredient: "GLIFOSATO".into(), dose: 5.0 });
    }

    #[test]
    fn test_select_unknown_ingredient_fails() {
        let mut session = filtered_session();
        assert!(session.select_ingredients(vec!["MANCOZEB".into()]).is_err());
    }

    #[test]
    fn test_set_dose_validation() {
        let mut session = filtered_session();
        session.select_ingredients(vec!["GLIFOSATO".into()]).unwrap();
        assert!(session.set_dose("GLIFOSATO", -1.0).is_err());
        assert!(session.set_dose("PARAQUAT", 1.0).is_err());
    }

    #[test]
    fn test_new_filter_clears_selection() {
        let mut session = filtered_session();
        session.select_ingredients(vec!["GLIFOSATO".into()]).unwrap();
        session.set_dose("GLIFOSATO", 2.0).unwrap();

        session.set_records(vec!["FUNGICIDA".into()], vec![record("MANCOZEB", "FUNGICIDA")]);
        assert!(session.selected_ingredients.is_empty());
        assert!(session.dose_entries().is_empty());
        assert_eq!(session.ingredients, vec!["MANCOZEB"]);
    }
}
