//! Configuration system (layered: defaults > config file > env).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GuardError, Result};

/// Environment variable overriding [`GuardConfig::max_tool_name_distance`].
pub const MAX_TOOL_DISTANCE_ENV: &str = "CALLGUARD_MAX_TOOL_DISTANCE";

/// File name looked up in the platform config directory by [`GuardConfig::load`].
pub const CONFIG_FILE_NAME: &str = "callguard.toml";

/// Default edit-distance budget for suggesting a registered tool name.
pub const DEFAULT_MAX_TOOL_NAME_DISTANCE: usize = 3;

/// Tunables for tool-call validation.
///
/// Resolution order:
/// 1. Built-in defaults
/// 2. `callguard.toml` in the platform config directory
/// 3. `CALLGUARD_MAX_TOOL_DISTANCE` (also read from `.env`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Largest Levenshtein distance at which an unknown tool name still has
    /// a suggested correction (and is therefore repairable).
    pub max_tool_name_distance: usize,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            max_tool_name_distance: DEFAULT_MAX_TOOL_NAME_DISTANCE,
        }
    }
}

impl GuardConfig {
    /// Parse from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Full layered load: defaults, then the config file if present, then env.
    pub fn load() -> Result<Self> {
        let base = match default_config_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "loading callguard config");
                Self::from_file(&path)?
            }
            _ => Self::default(),
        };
        base.with_env_overrides()
    }

    /// Apply `CALLGUARD_*` environment variables on top of `self`.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        if let Ok(raw) = std::env::var(MAX_TOOL_DISTANCE_ENV) {
            self.max_tool_name_distance = raw
                .trim()
                .parse()
                .map_err(|_| GuardError::invalid_value(MAX_TOOL_DISTANCE_ENV, raw.clone()))?;
        }
        Ok(self)
    }
}

/// Location of `callguard.toml` in the platform config directory.
pub fn default_config_path() -> Option<std::path::PathBuf> {
    directories::ProjectDirs::from("", "", "callguard")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_distance_is_three() {
        assert_eq!(GuardConfig::default().max_tool_name_distance, 3);
    }

    #[test]
    fn empty_toml_keeps_defaults() {
        let config = GuardConfig::from_toml_str("").unwrap();
        assert_eq!(config, GuardConfig::default());
    }

    #[test]
    fn toml_overrides_distance() {
        let config = GuardConfig::from_toml_str("max_tool_name_distance = 1").unwrap();
        assert_eq!(config.max_tool_name_distance, 1);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let err = GuardConfig::from_toml_str("max_tool_name_distance = \"many\"").unwrap_err();
        assert!(matches!(err, GuardError::Toml(_)));
    }

    #[test]
    fn config_path_ends_with_file_name() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with(CONFIG_FILE_NAME));
        }
    }
}
