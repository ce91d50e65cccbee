//! Optional `apexlint.toml` configuration.
//!
//! The config file supplies defaults the command line overrides; every key
//! is optional and an absent file means built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// When to colorize output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorWhen {
    /// Always emit ANSI escapes.
    Always,
    /// Emit ANSI escapes when stdout is a terminal.
    #[default]
    Auto,
    /// Never emit ANSI escapes.
    Never,
}

/// Defaults merged under the command-line flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Rules to enable (default: all).
    #[serde(default)]
    pub select: Vec<String>,

    /// Rules to ignore.
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Whether inline suppression comments are honored.
    #[serde(default)]
    pub suppress: Option<bool>,

    /// Number of parallel checks.
    #[serde(default)]
    pub jobs: Option<usize>,

    /// When to colorize output.
    #[serde(default)]
    pub color: Option<ColorWhen>,
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}

/// Resolves the effective configuration: an explicit `--config` path wins,
/// else `./apexlint.toml` when present, else defaults.
pub fn resolve(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return Config::from_file(path);
    }
    let default = Path::new("apexlint.toml");
    if default.exists() {
        tracing::debug!("Using config: {}", default.display());
        Config::from_file(default)
    } else {
        Ok(Config::default())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading the config file.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in the config file.
    #[error("failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
