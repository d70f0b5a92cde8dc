//! Installation configuration for the household survey.
//!
//! Stored in a machine-readable TOML file located at:
//!   %APPDATA%/HouseholdSurvey/config/config.toml on Windows
//!   $XDG_DATA_HOME/HouseholdSurvey/config/config.toml on Linux
//!   ~/Library/Application Support/HouseholdSurvey/config/config.toml on macOS
//!
//! `HOUSEHOLD_SURVEY_HOME` overrides the root for field laptops that keep
//! everything on removable media.

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::catalog::Locale;

/// Environment variable overriding the workspace root.
pub const HOME_ENV_VAR: &str = "HOUSEHOLD_SURVEY_HOME";
/// Standard relative path to the config file (resolved per OS at runtime).
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Root configuration persisted per installation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyConfig {
    /// Name of the sheet submissions are written to.
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
    /// Dependent slots reserved in the stored row layout.
    #[serde(default = "default_dependent_capacity")]
    pub dependent_capacity: usize,
    /// Locale preselected on the intro screen.
    #[serde(default)]
    pub default_locale: Locale,
    /// Locale whose labels are written into stored cells.
    #[serde(default)]
    pub storage_locale: Locale,
    /// Whether prompts are read aloud.
    #[serde(default = "default_narration_enabled")]
    pub narration_enabled: bool,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            sheet_name: default_sheet_name(),
            dependent_capacity: default_dependent_capacity(),
            default_locale: Locale::default(),
            storage_locale: Locale::default(),
            narration_enabled: default_narration_enabled(),
        }
    }
}

fn default_sheet_name() -> String {
    "Sondage_Hassi_Elbekay".to_string()
}

const fn default_dependent_capacity() -> usize {
    15
}

const fn default_narration_enabled() -> bool {
    true
}

/// Returns the root directory where survey data lives.
///
/// Order of precedence:
/// 1. `HOUSEHOLD_SURVEY_HOME` environment variable.
/// 2. OS-specific data directory via `directories::BaseDirs`.
pub fn workspace_root() -> Result<PathBuf> {
    if let Ok(path) = env::var(HOME_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS data directory")?;
    Ok(base_dirs.data_dir().join("HouseholdSurvey"))
}

pub fn config_dir() -> Result<PathBuf> {
    Ok(workspace_root()?.join("config"))
}

pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Loads the configuration from disk or returns defaults.
pub fn load_or_default() -> Result<SurveyConfig> {
    let path = config_file_path()?;
    if path.exists() {
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let cfg: SurveyConfig = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(cfg)
    } else {
        Ok(SurveyConfig::default())
    }
}

/// Persists the configuration to disk.
pub fn save(config: &SurveyConfig) -> Result<()> {
    let dir = config_dir()?;
    fs::create_dir_all(&dir)?;
    let path = config_file_path()?;
    let data = toml::to_string_pretty(config)?;
    fs::write(&path, data)?;
    Ok(())
}
