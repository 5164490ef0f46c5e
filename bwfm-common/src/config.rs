//! Configuration loading and config file resolution
//!
//! Configuration is a small TOML bootstrap file. Every key has a built-in
//! default, so a missing file never prevents the tools from running.
//!
//! # Config File Priority
//!
//! 1. Command-line argument (highest priority)
//! 2. Environment variable `BWFM_CONFIG`
//! 3. Platform config directory (`~/.config/bwfm/config.toml` on Linux)
//! 4. Built-in defaults

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "BWFM_CONFIG";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct TomlConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Extraction behaviour
    pub extraction: ExtractionConfig,

    /// Report output
    pub output: OutputConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Extraction configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ExtractionConfig {
    /// Probe the audio stream for its duration
    #[serde(default = "default_probe_duration")]
    pub probe_duration: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            probe_duration: default_probe_duration(),
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// How the metadata report is printed
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Labelled rows
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_probe_duration() -> bool {
    true
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config: {}", e)))
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Resolve and load configuration, logging where it came from.
    ///
    /// A file that does not exist falls back to defaults (with a warning if
    /// the file was named explicitly). A file that exists but cannot be read
    /// or parsed is an error.
    pub fn load(cli_arg: Option<&Path>) -> Result<Self> {
        let (config, source) = Self::load_with_source(cli_arg)?;
        source.log();
        Ok(config)
    }

    /// [`TomlConfig::load`] without logging; the caller logs the returned
    /// [`ConfigSource`] once a subscriber is installed
    pub fn load_with_source(cli_arg: Option<&Path>) -> Result<(Self, ConfigSource)> {
        let Some(resolved) = resolve_config_path(cli_arg) else {
            return Ok((Self::default(), ConfigSource::Defaults));
        };

        if !resolved.path.exists() {
            let source = if resolved.explicit {
                ConfigSource::MissingExplicit(resolved.path)
            } else {
                ConfigSource::MissingDefault(resolved.path)
            };
            return Ok((Self::default(), source));
        }

        let config = Self::load_from_file(&resolved.path)?;
        Ok((config, ConfigSource::File(resolved.path)))
    }
}

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// No config location could be resolved
    Defaults,
    /// Read from this file
    File(PathBuf),
    /// Named by argument or environment but not present
    MissingExplicit(PathBuf),
    /// Platform default location with no file in it
    MissingDefault(PathBuf),
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::Defaults => debug!("No config file found, using built-in defaults"),
            ConfigSource::File(path) => debug!(path = %path.display(), "Loaded config file"),
            ConfigSource::MissingExplicit(path) => warn!(
                path = %path.display(),
                "Config file not found, using built-in defaults"
            ),
            ConfigSource::MissingDefault(path) => {
                debug!(path = %path.display(), "No config file, using built-in defaults")
            }
        }
    }
}

/// Config file location chosen by [`resolve_config_path`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfigPath {
    pub path: PathBuf,
    /// Named by the user (argument or environment) rather than the platform default
    pub explicit: bool,
}

/// Resolve the config file path following the priority order:
/// 1. Command-line argument
/// 2. Environment variable
/// 3. Platform config directory
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<ResolvedConfigPath> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(ResolvedConfigPath {
            path: path.to_path_buf(),
            explicit: true,
        });
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(ResolvedConfigPath {
                path: PathBuf::from(path),
                explicit: true,
            });
        }
    }

    // Priority 3: Platform config directory
    default_config_path().map(|path| ResolvedConfigPath {
        path,
        explicit: false,
    })
}

/// Get default configuration file path for the platform
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("bwfm").join("config.toml"))
}
