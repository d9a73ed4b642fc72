//! # Tessera Core Configuration
//!
//! [`FrameworkConfig`] holds the tunables of the event core. It is read from
//! JSON, YAML (`yaml-config` feature) or TOML (`toml-config` feature), with
//! the format picked from the file extension. Missing sections and keys
//! take their defaults.
pub mod error;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::kernel::constants;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }
}

/// Dispatcher and factory behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchSettings {
    /// End the request decoding fallback chain with a generic event
    pub generic_fallback: bool,
    /// Replay a page's queue when it is activated
    pub replay_on_activate: bool,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            generic_fallback: true,
            replay_on_activate: true,
        }
    }
}

/// Logging setup used by the binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter, overridden by `RUST_LOG`
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { level: constants::DEFAULT_LOG_LEVEL.to_string() }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworkConfig {
    pub dispatch: DispatchSettings,
    pub logging: LoggingSettings,
}

impl FrameworkConfig {
    /// Parse configuration text in the given format
    pub fn parse(data: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Json => {
                serde_json::from_str(data).map_err(|e| ConfigError::deserialization("JSON", e))
            },
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => {
                serde_yaml::from_str(data).map_err(|e| ConfigError::deserialization("YAML", e))
            },
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => {
                toml::from_str(data).map_err(|e| ConfigError::deserialization("TOML", e))
            },
        }
    }

    /// Load a configuration file, picking the format from its extension
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;
        let data = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::io(e, path.to_path_buf()))?;
        log::debug!("Loading {} configuration from {}", format.extension(), path.display());
        Self::parse(&data, format)
    }

    /// Load from `explicit`, else `$TESSERA_CONFIG`, else `./tessera.toml`
    /// if present, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Some(path) = std::env::var_os(constants::CONFIG_PATH_ENV) {
            return Self::load(&PathBuf::from(path));
        }
        let local = PathBuf::from(constants::CONFIG_FILE_NAME);
        if local.is_file() {
            return Self::load(&local);
        }
        Ok(Self::default())
    }
}
