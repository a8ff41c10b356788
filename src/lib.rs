//! pesticide-tox: registry workbook filter and toxicological unit lookup

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod lookup;
pub mod search;
pub mod session;
pub mod workbook;
