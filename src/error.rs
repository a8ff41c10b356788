//! Error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToxError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("could not read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("could not fetch {url}: HTTP {status}")]
    Fetch { url: String, status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no link found for '{0}'")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] pesticide_tox_common::Error),
}

pub type Result<T> = std::result::Result<T, ToxError>;
