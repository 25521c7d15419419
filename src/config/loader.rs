//! Settings loading functionality.
//!
//! This module provides the [`SettingsLoader`] type for loading payroll
//! engine settings from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{PayrollError, PayrollResult};

use super::types::PayrollSettings;

/// Loads and provides access to payroll engine settings.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::SettingsLoader;
///
/// let loader = SettingsLoader::load("./config/payroll.yaml")?;
/// println!("Precision: {}", loader.settings().currency_precision);
/// # Ok::<(), payroll_engine::error::PayrollError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    settings: PayrollSettings,
}

impl SettingsLoader {
    /// Loads settings from the specified YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the settings file (e.g., "./config/payroll.yaml")
    ///
    /// # Returns
    ///
    /// Returns a `SettingsLoader` on success, or an error if the file is
    /// missing (`ConfigNotFound`) or contains invalid YAML
    /// (`ConfigParseError`).
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let settings =
            serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Ok(Self { settings })
    }

    /// Creates a loader carrying the built-in default settings.
    pub fn with_defaults() -> Self {
        Self {
            settings: PayrollSettings::default(),
        }
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }
}
