//! Toxicological units
//!
//! UTm = dose / mammal oral LD50, UTi = dose / bee contact LD50.

use crate::error::{Error, Result};
use crate::types::{ReferenceField, ReferenceValues, ToxicityResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ratios {
    pub utm: f64,
    pub uti: f64,
}

/// Parse a cleaned LD50 value. Must be a finite number greater than zero.
pub fn parse_ld50(value: &str) -> Result<f64> {
    let trimmed = value.trim();
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => Ok(n),
        _ => Err(Error::Conversion {
            value: trimmed.to_string(),
        }),
    }
}

pub fn compute_ratios(dose: f64, mammal_ld50: &str, bee_ld50: &str) -> Result<Ratios> {
    let mammal = parse_ld50(mammal_ld50)?;
    let bee = parse_ld50(bee_ld50)?;

    Ok(Ratios {
        utm: dose / mammal,
        uti: dose / bee,
    })
}

/// Build the result row for one ingredient from its scraped values
pub fn evaluate(ingredient: &str, dose: f64, values: &ReferenceValues) -> Result<ToxicityResult> {
    let mammal = values
        .get(ReferenceField::MammalLd50)
        .ok_or(Error::MissingValue(ReferenceField::MammalLd50))?;
    let bee = values
        .get(ReferenceField::BeeLd50)
        .ok_or(Error::MissingValue(ReferenceField::BeeLd50))?;

    let ratios = compute_ratios(dose, mammal, bee)?;

    Ok(ToxicityResult {
        ingredient: ingredient.to_string(),
        mammal_ld50: mammal.to_string(),
        bee_ld50: bee.to_string(),
        dose,
        utm: ratios.utm,
        uti: ratios.uti,
    })
}
