//! Configuration file management
//!
//! Stored as JSON under `~/.config/pesticide-tox/`.

use crate::error::{Result, ToxError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_WORKBOOK: &str = "REPORTE-PRODUCTOS-PQUA-SimplifiCA-1-DE-JUNIO-DE-2024.xlsx";
pub const DEFAULT_INDEX_URL: &str = "https://sitem.herts.ac.uk/aeru/ppdb/en/atoz.htm";

/// Environment variable overriding the configured workbook
pub const WORKBOOK_ENV: &str = "PESTICIDE_TOX_WORKBOOK";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub workbook_path: Option<PathBuf>,
    pub index_url: String,
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workbook_path: None,
            index_url: DEFAULT_INDEX_URL.into(),
            timeout_seconds: 30,
            connect_timeout_seconds: 10,
            user_agent: concat!("pesticide-tox/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            log::debug!("loaded config from {}", config_path.display());
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ToxError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("pesticide-tox").join("config.json"))
    }

    /// Workbook to open: CLI flag, then environment, then config file, then the default name
    pub fn workbook(&self, cli_override: Option<&PathBuf>) -> PathBuf {
        if let Some(path) = cli_override {
            return path.clone();
        }

        if let Ok(path) = std::env::var(WORKBOOK_ENV) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        self.workbook_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKBOOK))
    }

    pub fn set_workbook(&mut self, path: PathBuf) -> Result<()> {
        self.workbook_path = Some(path);
        self.save()
    }

    pub fn set_index_url(&mut self, url: String) -> Result<()> {
        reqwest::Url::parse(&url)
            .map_err(|e| ToxError::Config(format!("invalid index URL '{}': {}", url, e)))?;
        self.index_url = url;
        self.save()
    }

    pub fn set_timeout(&mut self, seconds: u64) -> Result<()> {
        if seconds == 0 {
            return Err(ToxError::Config("timeout must be at least one second".into()));
        }
        self.timeout_seconds = seconds;
        self.save()
    }
}
