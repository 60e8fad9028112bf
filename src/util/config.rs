//! Configuration file support for torchenv.
//!
//! torchenv supports two configuration file locations:
//! - Global: `~/.torchenv/config.toml` - User-wide defaults
//! - Project: `.torchenv/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Command used to invoke light-the-torch when nothing else is configured.
pub const DEFAULT_LTT_COMMAND: &str = "ltt";

/// torchenv configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults for environment attributes
    pub defaults: DefaultsConfig,

    /// External tool locations
    pub tools: ToolsConfig,
}

/// Defaults applied to environments that leave an attribute unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Channel for environments without `pytorch_channel`
    pub pytorch_channel: Option<String>,
}

/// External tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Path or name of the light-the-torch CLI
    pub ltt: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.defaults.pytorch_channel.is_some() {
            self.defaults.pytorch_channel = other.defaults.pytorch_channel;
        }
        if other.tools.ltt.is_some() {
            self.tools.ltt = other.tools.ltt;
        }
    }

    /// Resolve the light-the-torch command.
    ///
    /// Order of precedence: explicit override (CLI flag or `TORCHENV_LTT`),
    /// then config, then `ltt` on PATH.
    pub fn ltt_command(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.tools.ltt.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LTT_COMMAND))
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.torchenv/config.toml)
/// 2. Global config (~/.torchenv/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global torchenv config directory (~/.torchenv).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".torchenv"))
}
