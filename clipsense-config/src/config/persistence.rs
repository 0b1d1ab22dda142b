//! Config persistence, path resolution and validation for `ClassifierConfig`.
//!
//! Covers:
//! - `load` / `load_from` / `save_to` (YAML file I/O with atomic write)
//! - Path helpers (`config_dir`, `config_path`)
//! - `validate`

use std::fs;
use std::path::{Path, PathBuf};

use super::ClassifierConfig;
use crate::error::ConfigError;

impl ClassifierConfig {
    /// Directory holding `config.yaml` (`<platform config dir>/clipsense`).
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("clipsense")
    }

    /// Path of the default configuration file.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Load configuration from the default path, creating it with defaults
    /// when it does not exist yet.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            return Self::load_from(&config_path);
        }

        log::info!(
            "Config file not found, creating default at {:?}",
            config_path
        );
        let config = Self::default();
        if let Err(e) = config.save_to(&config_path) {
            log::error!("Failed to save default config: {}", e);
            return Err(e);
        }
        Ok(config)
    }

    /// Load and validate configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path)?;
        let config: ClassifierConfig = if contents.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml_ng::from_str(&contents)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`.
    ///
    /// Writes to a sibling temp file and renames it into place so a crash
    /// never leaves a truncated config behind.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;
        log::debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// Check semantic constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.rendering.low_confidence_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::Validation(format!(
                "rendering.low_confidence_threshold must be within [0, 1], got {threshold}"
            )));
        }
        if self.rendering.highlight_max_bytes == 0 {
            return Err(ConfigError::Validation(
                "rendering.highlight_max_bytes must be > 0".into(),
            ));
        }
        if self.detectors.code.enabled && self.auto_detect.languages.is_empty() {
            return Err(ConfigError::Validation(
                "auto_detect.languages must not be empty while the code detector is enabled"
                    .into(),
            ));
        }
        Ok(())
    }
}
