//! Configuration loading.
//!
//! Settings live in a TOML file at `$ZCALC_CONFIG` or
//! `<config dir>/zcalc/config.toml`. A missing file means defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::calculator::GROUP_SEPARATOR;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "ZCALC_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("group_separator {separator:?} in {} would be confused with the number itself", path.display())]
    InvalidSeparator { path: PathBuf, separator: char },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prompt printed before each interactive line.
    pub prompt: String,
    /// Thousands separator used by the readout.
    pub group_separator: char,
    /// Print the raw calculator state after each line.
    pub show_state: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            group_separator: GROUP_SEPARATOR,
            show_state: false,
        }
    }
}

impl Config {
    /// Load from an explicit path, or from the default location.
    ///
    /// An explicit path must exist; the default location may be absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        match resolve_config_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            Some(path) => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if !config.separator_is_valid() {
            return Err(ConfigError::InvalidSeparator {
                path: path.to_path_buf(),
                separator: config.group_separator,
            });
        }
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// The separator must not read as a decimal point or a digit.
    pub fn separator_is_valid(&self) -> bool {
        self.group_separator != '.' && !self.group_separator.is_ascii_digit()
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Resolve the config file path: `$ZCALC_CONFIG`, then the XDG config dir.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("zcalc").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_file() {
        let config = Config::from_toml("group_separator = \"_\"\nshow_state = true\n").unwrap();
        assert_eq!(config.group_separator, '_');
        assert!(config.show_state);
        assert_eq!(config.prompt, "> ");
    }

    #[test]
    fn test_malformed_file() {
        assert!(Config::from_toml("group_separator = 12").is_err());
        assert!(Config::from_toml("prompt = ").is_err());
    }

    #[test]
    fn test_missing_explicit_path() {
        let path = std::env::temp_dir().join("zcalc-missing-config-test.toml");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_decimal_point_separator_rejected() {
        let path = std::env::temp_dir().join(format!("zcalc-separator-{}.toml", std::process::id()));
        std::fs::write(&path, "group_separator = \".\"\n").unwrap();
        let err = Config::load_from_path(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            err,
            ConfigError::InvalidSeparator { separator: '.', .. }
        ));
    }

    #[test]
    fn test_separator_validation() {
        assert!(Config::default().separator_is_valid());
        let config = Config::from_toml("group_separator = \"7\"").unwrap();
        assert!(!config.separator_is_valid());
        let config = Config::from_toml("group_separator = \" \"").unwrap();
        assert!(config.separator_is_valid());
    }

    #[test]
    fn test_load_from_path() {
        let path = std::env::temp_dir().join(format!("zcalc-config-{}.toml", std::process::id()));
        std::fs::write(&path, "prompt = \"calc> \"\n").unwrap();
        let config = Config::load_from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.prompt, "calc> ");
    }
}
