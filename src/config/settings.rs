//! User settings for the finance tracker
//!
//! Display preferences and the optional category check. Every field has a
//! serde default so older or hand-edited files still load.

use serde::{Deserialize, Serialize};

use super::paths::FinancePaths;
use crate::error::FinanceError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// How many rows the breakdown view shows by default
    #[serde(default = "default_breakdown_limit")]
    pub breakdown_limit: usize,

    /// Reject categories outside the reference set for the transaction type
    #[serde(default)]
    pub strict_categories: bool,

    /// Date format for terminal output (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_breakdown_limit() -> usize {
    10
}

fn default_date_format() -> String {
    "%b %d, %Y".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            breakdown_limit: default_breakdown_limit(),
            strict_categories: false,
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or the defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinancePaths) -> Result<Self, FinanceError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not persisted until the caller saves
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FinanceError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| FinanceError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinancePaths) -> Result<(), FinanceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinanceError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinanceError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Set a single setting by its key, as used by `finance config set`
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), FinanceError> {
        match key {
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "date_format" => self.date_format = value.to_string(),
            "breakdown_limit" => {
                self.breakdown_limit = value.parse().map_err(|_| {
                    FinanceError::Config(format!("breakdown_limit must be a number, got '{}'", value))
                })?
            }
            "strict_categories" => {
                self.strict_categories = value.parse().map_err(|_| {
                    FinanceError::Config(format!(
                        "strict_categories must be true or false, got '{}'",
                        value
                    ))
                })?
            }
            other => return Err(FinanceError::Config(format!("Unknown setting: {}", other))),
        }
        Ok(())
    }
}
