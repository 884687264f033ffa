use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/pageshell/config.toml` on Unix/macOS, or the
    /// equivalent from `dirs::config_dir()`; falls back to the current
    /// directory when no config dir is known.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("pageshell").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - A missing file yields `Config::default()`.
    /// - An existing file is parsed as TOML and validated.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The default route is an absolute path
    /// - The mount name is not empty
    /// - Both animation classes are non-empty, whitespace-free and distinct
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.navigation.default_route.starts_with('/') {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Default route '{}' must start with '/'",
                    self.navigation.default_route
                ),
            });
        }

        if self.navigation.mount.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Mount name must not be empty".to_string(),
            });
        }

        let animation = &self.animation;
        for class in [&animation.in_class, &animation.out_class] {
            if class.is_empty() || class.chars().any(char::is_whitespace) {
                return Err(ConfigError::ValidationError {
                    message: format!("Invalid animation class name '{}'", class),
                });
            }
        }

        if animation.in_class == animation.out_class {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Animation in/out classes must differ (both '{}')",
                    animation.in_class
                ),
            });
        }

        Ok(())
    }
}
