//! Pesticide Tox Common Library
//!
//! Pure logic shared by the CLI: data model, keyword filtering,
//! reference page extraction and toxicological unit calculation.

pub mod types;
pub mod error;
pub mod filter;
pub mod extract;
pub mod toxicity;
#[cfg(feature = "excel")]
pub mod export;

pub use types::{ExtractedValues, Record, ReferenceField, ReferenceValues, ToxicityResult};
pub use error::{Error, Result};
pub use filter::{filter_rows, list_keywords, unique_ingredients, SheetRows, CLASS_COLUMN};
pub use extract::{clean_value, extract_reference_values, find_entry_link_in, HeaderClass, LabelRule, Occurrence, Strategy, LABELS};
pub use toxicity::{compute_ratios, evaluate, parse_ld50, Ratios};
pub use url::Url;
