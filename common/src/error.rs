//! Error types

use crate::types::ReferenceField;
use thiserror::Error;

/// Shared error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("value is not a positive number: '{value}'")]
    Conversion { value: String },

    #[error("{} not found on the page", .0.display_name())]
    MissingValue(ReferenceField),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[cfg(feature = "excel")]
    #[error("Excel error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),
}

/// Result alias
pub type Result<T> = std::result::Result<T, Error>;
