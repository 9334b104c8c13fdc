//! Configuration storage.
//!
//! Settings live in a JSON file under the user's config directory:
//! - Linux: ~/.config/ac-fan-comfort/config.json
//! - Windows: %APPDATA%\ac-fan-comfort\config.json
//!
//! A missing file means defaults; missing fields take their defaults too.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{RequestLimits, SearchParams};
use crate::error::{ComfortError, Result};

// =============================================================================
// Config Path
// =============================================================================

const APP_NAME: &str = "ac-fan-comfort";
const CONFIG_FILE: &str = "config.json";

/// Get the configuration directory path.
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join(APP_NAME))
        .ok_or_else(|| ComfortError::InvalidConfig("Could not find config directory".into()))
}

/// Get the full path to the config file.
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE))
}

// =============================================================================
// Storage Structures
// =============================================================================

/// Lookup table export settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Write the lookup table after every recommendation.
    #[serde(default)]
    pub enabled: bool,

    /// Target directory; the working directory when unset.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl ExportConfig {
    pub fn directory_or_cwd(&self) -> Result<PathBuf> {
        match &self.directory {
            Some(dir) => Ok(dir.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }
}

/// Main configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub search: SearchParams,
    #[serde(default)]
    pub limits: RequestLimits,
    #[serde(default)]
    pub export: ExportConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        self.search.validate()?;
        self.limits.validate()
    }
}

// =============================================================================
// Storage Functions
// =============================================================================

/// Load configuration from a file, falling back to defaults if it does
/// not exist.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        log::debug!("No config at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ComfortError::InvalidConfig(format!("Failed to read config: {}", e)))?;

    let config: AppConfig = serde_json::from_str(&content)
        .map_err(|e| ComfortError::InvalidConfig(format!("Failed to parse config: {}", e)))?;
    config.validate()?;

    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Save configuration to a file, creating parent directories.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| {
            ComfortError::InvalidConfig(format!("Failed to create config dir: {}", e))
        })?;
    }

    let content = serde_json::to_string_pretty(config)
        .map_err(|e| ComfortError::InvalidConfig(format!("Failed to serialize config: {}", e)))?;

    std::fs::write(path, content)
        .map_err(|e| ComfortError::InvalidConfig(format!("Failed to write config: {}", e)))?;

    Ok(())
}

/// Write a default config file at `path` unless one exists.
///
/// Returns `true` if a file was created.
pub fn ensure_config_exists(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save_config_to(&AppConfig::default(), path)?;
    log::info!("Created default config at {}", path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "search": { "init_ac_temp": 30.0 } }"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.search.init_ac_temp, 30.0);
        assert_eq!(config.search.pmv_baseline_temp, 24.0);
        assert_eq!(config.limits, RequestLimits::default());
        assert!(!config.export.enabled);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let mut config = AppConfig::default();
        config.limits.max_outdoor_humidity = 70.0;
        config.export.enabled = true;

        save_config_to(&config, &path).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "search": { "velocity_step": 0.0 } }"#).unwrap();
        assert!(matches!(
            load_config_from(&path),
            Err(ComfortError::InvalidConfig(_))
        ));

        std::fs::write(&path, "not json").unwrap();
        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn test_ensure_config_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        assert!(ensure_config_exists(&path).unwrap());
        assert!(!ensure_config_exists(&path).unwrap());
        assert_eq!(load_config_from(&path).unwrap(), AppConfig::default());
    }
}
