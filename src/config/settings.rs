//! User settings for Go Dutch
//!
//! Manages display and report preferences, persisted as `config.json`.

use serde::{Deserialize, Serialize};

use super::paths::DutchPaths;
use crate::error::DutchError;
use crate::export::ReportFormat;
use crate::services::SplitMode;

/// User settings for Go Dutch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol shown on screen
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for report sheets (strftime format)
    #[serde(default = "default_report_date_format")]
    pub report_date_format: String,

    /// How fair shares are measured
    #[serde(default)]
    pub split_mode: SplitMode,

    /// Format used by `export` when none is given
    #[serde(default)]
    pub report_format: ReportFormat,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_report_date_format() -> String {
    "%d/%m/%Y".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            report_date_format: default_report_date_format(),
            split_mode: SplitMode::default(),
            report_format: ReportFormat::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    pub fn load_or_create(paths: &DutchPaths) -> Result<Self, DutchError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| DutchError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                DutchError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &DutchPaths) -> Result<(), DutchError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| DutchError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| DutchError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
