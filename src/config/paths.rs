//! Path management for Go Dutch
//!
//! ## Path Resolution Order
//!
//! 1. `GO_DUTCH_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`$XDG_CONFIG_HOME/go-dutch`,
//!    `~/Library/Application Support/go-dutch`, `%APPDATA%\go-dutch`)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::DutchError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "GO_DUTCH_DATA_DIR";

/// Manages all paths used by Go Dutch
#[derive(Debug, Clone)]
pub struct DutchPaths {
    /// Base directory for all Go Dutch data
    base_dir: PathBuf,
}

impl DutchPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, DutchError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create DutchPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the expense log
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Default destination for reports
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to expenses.json
    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), DutchError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| DutchError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| DutchError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if Go Dutch has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, DutchError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| DutchError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("go-dutch"))
}
