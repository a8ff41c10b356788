//! Data model
//!
//! Types shared between the loader, the lookup client and the exporters:
//! - Record: one relabelled row of the registration workbook
//! - ReferenceValues: fields scraped from a reference page
//! - ToxicityResult: toxicological units for one ingredient

use serde::{Deserialize, Serialize};

/// One row of the registration workbook, relabelled into the fixed schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "NOMBRE EMPRESA")]
    pub company_name: String,
    #[serde(rename = "DIRECCIÓN")]
    pub address: String,
    #[serde(rename = "TELEFONO")]
    pub phone: String,
    #[serde(rename = "CORREO ELECTRÓNICO")]
    pub email: String,
    #[serde(rename = "DOCUMENTO")]
    pub document_id: String,
    #[serde(rename = "NOMBRE PRODUCTO")]
    pub product_name: String,
    #[serde(rename = "INGREDIENTE ACTIVO")]
    pub active_ingredient: String,
    #[serde(rename = "CONCENTRACIÓN")]
    pub concentration: String,
    #[serde(rename = "TIPO DE FORMULACIÓN")]
    pub formulation_type: String,
    #[serde(rename = "CLASE DE PRODUCTO")]
    pub product_class: String,
    #[serde(rename = "NÚMERO DE REGISTRO")]
    pub registration_number: String,
    #[serde(rename = "FECHA DE REGISTRO")]
    pub registration_date: String,
}

impl Record {
    /// Column headers of the filtered table, in output order.
    pub const HEADERS: [&'static str; 12] = [
        "NOMBRE EMPRESA",
        "DIRECCIÓN",
        "TELEFONO",
        "CORREO ELECTRÓNICO",
        "DOCUMENTO",
        "NOMBRE PRODUCTO",
        "INGREDIENTE ACTIVO",
        "CONCENTRACIÓN",
        "TIPO DE FORMULACIÓN",
        "CLASE DE PRODUCTO",
        "NÚMERO DE REGISTRO",
        "FECHA DE REGISTRO",
    ];

    /// Build a record from the first 12 cells of a row.
    ///
    /// Missing cells become empty strings; cells past the 12th are ignored.
    pub fn from_cells(cells: &[Option<String>]) -> Self {
        let cell = |i: usize| -> String {
            cells
                .get(i)
                .and_then(|c| c.as_deref())
                .unwrap_or_default()
                .to_string()
        };

        Self {
            company_name: cell(0),
            address: cell(1),
            phone: cell(2),
            email: cell(3),
            document_id: cell(4),
            product_name: cell(5),
            active_ingredient: cell(6),
            concentration: cell(7),
            formulation_type: cell(8),
            product_class: cell(9),
            registration_number: cell(10),
            registration_date: cell(11),
        }
    }

    /// Field values in the order of [`Record::HEADERS`].
    pub fn values(&self) -> [&str; 12] {
        [
            self.company_name.as_str(),
            self.address.as_str(),
            self.phone.as_str(),
            self.email.as_str(),
            self.document_id.as_str(),
            self.product_name.as_str(),
            self.active_ingredient.as_str(),
            self.concentration.as_str(),
            self.formulation_type.as_str(),
            self.product_class.as_str(),
            self.registration_number.as_str(),
            self.registration_date.as_str(),
        ]
    }
}

/// A labelled field looked up on a reference page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceField {
    Solubility,
    HalfLife,
    Koc,
    MammalLd50,
    BeeLd50,
}

impl ReferenceField {
    pub const ALL: [ReferenceField; 5] = [
        ReferenceField::Solubility,
        ReferenceField::HalfLife,
        ReferenceField::Koc,
        ReferenceField::MammalLd50,
        ReferenceField::BeeLd50,
    ];

    /// Exact row label used on the reference page
    pub fn label(&self) -> &'static str {
        match self {
            ReferenceField::Solubility => "Solubility - In water at 20 °C (mg l⁻¹)",
            ReferenceField::HalfLife => "DT₅₀ (typical)",
            ReferenceField::Koc => "Koc (mL g⁻¹)",
            ReferenceField::MammalLd50 => "Mammals - Acute oral LD₅₀ (mg kg⁻¹)",
            ReferenceField::BeeLd50 => {
                "Contact acute LD₅₀ (worst case from 24, 48 and 72 hour values - μg bee⁻¹)"
            }
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ReferenceField::Solubility => "Solubility (mg/l)",
            ReferenceField::HalfLife => "DT50 (days)",
            ReferenceField::Koc => "Koc (mL/g)",
            ReferenceField::MammalLd50 => "Mammal LD50 (mg/kg)",
            ReferenceField::BeeLd50 => "Bee LD50 (μg/bee)",
        }
    }
}

impl std::fmt::Display for ReferenceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Values scraped from one reference page. `None` means the label was not found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceValues {
    pub solubility: Option<String>,
    pub half_life: Option<String>,
    pub koc: Option<String>,
    pub mammal_ld50: Option<String>,
    pub bee_ld50: Option<String>,
}

impl ReferenceValues {
    pub fn get(&self, field: ReferenceField) -> Option<&str> {
        match field {
            ReferenceField::Solubility => self.solubility.as_deref(),
            ReferenceField::HalfLife => self.half_life.as_deref(),
            ReferenceField::Koc => self.koc.as_deref(),
            ReferenceField::MammalLd50 => self.mammal_ld50.as_deref(),
            ReferenceField::BeeLd50 => self.bee_ld50.as_deref(),
        }
    }

    pub fn set(&mut self, field: ReferenceField, value: Option<String>) {
        let slot = match field {
            ReferenceField::Solubility => &mut self.solubility,
            ReferenceField::HalfLife => &mut self.half_life,
            ReferenceField::Koc => &mut self.koc,
            ReferenceField::MammalLd50 => &mut self.mammal_ld50,
            ReferenceField::BeeLd50 => &mut self.bee_ld50,
        };
        *slot = value;
    }

    /// Fields whose label was not found, in [`ReferenceField::ALL`] order
    pub fn missing_fields(&self) -> Vec<ReferenceField> {
        ReferenceField::ALL
            .iter()
            .copied()
            .filter(|f| self.get(*f).is_none())
            .collect()
    }
}

/// Toxicological units for one ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToxicityResult {
    pub ingredient: String,
    pub mammal_ld50: String,
    pub bee_ld50: String,
    pub dose: f64,
    /// dose / mammal LD50
    pub utm: f64,
    /// dose / bee LD50
    pub uti: f64,
}

/// One row of the raw reference values table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedValues {
    pub ingredient: String,
    pub dose: f64,
    #[serde(flatten)]
    pub values: ReferenceValues,
    /// Detail page the values were read from
    pub link: String,
}
