//! Ingredient search
//!
//! Runs the lookup for each selected ingredient, one at a time. A failure
//! for one ingredient becomes a warning and the loop moves on to the next.

use crate::error::{Result, ToxError};
use crate::lookup::{LookupClient, PageFetcher};
use indicatif::{ProgressBar, ProgressStyle};
use pesticide_tox_common::{evaluate, Error as CommonError, ExtractedValues, ReferenceField, ToxicityResult};
use serde::{Deserialize, Serialize};

/// An ingredient together with the dose entered for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseEntry {
    pub ingredient: String,
    pub dose: f64,
}

impl DoseEntry {
    pub fn new(ingredient: impl Into<String>, dose: f64) -> Result<Self> {
        let ingredient = ingredient.into();
        if ingredient.trim().is_empty() {
            return Err(ToxError::InvalidInput("ingredient name is empty".into()));
        }
        validate_dose(dose)?;
        Ok(Self { ingredient, dose })
    }
}

pub fn validate_dose(dose: f64) -> Result<()> {
    if dose.is_finite() && dose >= 0.0 {
        Ok(())
    } else {
        Err(ToxError::InvalidInput(format!("dose must be a number >= 0, got {}", dose)))
    }
}

/// Parses `NAME=DOSE`; the name may itself contain '='
impl std::str::FromStr for DoseEntry {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (name, dose) = s
            .rsplit_once('=')
            .ok_or_else(|| format!("expected NAME=DOSE, got '{}'", s))?;
        let dose: f64 = dose
            .trim()
            .parse()
            .map_err(|_| format!("invalid dose '{}' for {}", dose.trim(), name.trim()))?;
        DoseEntry::new(name.trim(), dose).map_err(|e| e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WarningKind {
    /// No entry link on the index page
    NotFound,
    /// Index or detail page could not be retrieved
    Fetch,
    /// A labelled field is absent from the detail page
    MissingField(ReferenceField),
    /// An LD50 value is missing or not numeric
    Conversion,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupWarning {
    pub ingredient: String,
    pub kind: WarningKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReport {
    /// Toxicological units, one per ingredient with both LD50 values
    pub results: Vec<ToxicityResult>,
    /// Raw values for every ingredient whose detail page was read
    pub extracted: Vec<ExtractedValues>,
    pub warnings: Vec<LookupWarning>,
}

impl SearchReport {
    fn warn(&mut self, progress: &ProgressBar, ingredient: &str, kind: WarningKind, message: String) {
        log::debug!("{}: {}", ingredient, message);
        progress.println(format!("⚠ {}", message));
        self.warnings.push(LookupWarning {
            ingredient: ingredient.to_string(),
            kind,
            message,
        });
    }
}

pub fn progress_bar(len: usize) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    let style = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}

/// Look up every entry in order and compute its toxicological units
pub fn run_search<F: PageFetcher>(
    client: &LookupClient<F>,
    entries: &[DoseEntry],
    progress: &ProgressBar,
) -> SearchReport {
    let mut report = SearchReport::default();

    for entry in entries {
        progress.set_message(entry.ingredient.clone());
        search_one(client, entry, progress, &mut report);
        progress.inc(1);
    }

    progress.finish_and_clear();
    report
}

fn search_one<F: PageFetcher>(
    client: &LookupClient<F>,
    entry: &DoseEntry,
    progress: &ProgressBar,
    report: &mut SearchReport,
) {
    let name = entry.ingredient.as_str();

    let link = match client.find_entry_link(name) {
        Ok(link) => link,
        Err(e) => {
            report.warn(progress, name, warning_kind(&e), lookup_message(name, &e));
            return;
        }
    };
    progress.println(format!("✔ {}: {}", name, link));

    let values = match client.fetch_reference_values(&link) {
        Ok(values) => values,
        Err(e) => {
            report.warn(progress, name, warning_kind(&e), lookup_message(name, &e));
            return;
        }
    };
    for field in values.missing_fields() {
        report.warn(
            progress,
            name,
            WarningKind::MissingField(field),
            format!("{}: '{}' not found on the page", name, field.label()),
        );
    }

    match evaluate(name, entry.dose, &values) {
        Ok(result) => report.results.push(result),
        // Already reported as a missing field above
        Err(CommonError::MissingValue(field)) => {
            log::debug!("{}: skipped, no {}", name, field.display_name());
        }
        Err(e) => report.warn(
            progress,
            name,
            WarningKind::Conversion,
            format!("{}: skipped, {}", name, e),
        ),
    }

    report.extracted.push(ExtractedValues {
        ingredient: name.to_string(),
        dose: entry.dose,
        values,
        link: link.to_string(),
    });
}

fn warning_kind(error: &ToxError) -> WarningKind {
    match error {
        ToxError::NotFound(_) => WarningKind::NotFound,
        _ => WarningKind::Fetch,
    }
}

fn lookup_message(name: &str, error: &ToxError) -> String {
    match error {
        ToxError::NotFound(_) => format!("{}: no link on the index page mentions this ingredient", name),
        other => format!("{}: {}", name, other),
    }
}
