//! torchenv.toml manifest parsing and schema.
//!
//! The manifest describes the environments of a project the way the host
//! orchestration tool sees them: their dependencies, interpreter, package
//! install mode, and the attributes from [`crate::core::attributes`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::core::channel::Channel;
use crate::core::environment::{default_interpreter, EnvironmentConfig};
use crate::util::config::Config;

/// Canonical manifest file name.
pub const MANIFEST_NAME: &str = "torchenv.toml";

/// Default name of the isolated-build helper environment.
pub const DEFAULT_ISOLATED_BUILD_ENV: &str = ".package";

/// Errors raised while locating or reading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("could not find `torchenv.toml` in `{}` or any parent directory", dir.display())]
    NotFound { dir: PathBuf },

    #[error("failed to read manifest `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest `{}`", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no environment named `{name}`; available: {}", available.join(", "))]
    UnknownEnvironment { name: String, available: Vec<String> },
}

/// Project-wide settings from the `[settings]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Build the package in an isolated helper environment
    pub isolated_build: bool,

    /// Name of the isolated-build helper environment
    pub isolated_build_env: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            isolated_build: false,
            isolated_build_env: DEFAULT_ISOLATED_BUILD_ENV.to_string(),
        }
    }
}

/// One `[env.<name>]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvSection {
    /// Dependencies installed into the environment
    pub deps: Vec<String>,

    /// Interpreter command
    pub basepython: Option<String>,

    pub skip_install: bool,

    pub usedevelop: bool,

    pub extras: Vec<String>,

    pub disable_light_the_torch: bool,

    pub pytorch_force_cpu: bool,

    /// Deprecated alias of `pytorch_force_cpu`
    pub force_cpu: bool,

    pub pytorch_channel: Option<String>,
}

/// A parsed torchenv.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    pub settings: Settings,

    #[serde(rename = "env")]
    pub environments: BTreeMap<String, EnvSection>,
}

impl Manifest {
    /// Load a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&contents).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse manifest contents.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Names of all declared environments, sorted.
    pub fn env_names(&self) -> Vec<String> {
        self.environments.keys().cloned().collect()
    }

    /// Get the section of an environment.
    pub fn env(&self, name: &str) -> Result<&EnvSection, ManifestError> {
        self.environments
            .get(name)
            .ok_or_else(|| ManifestError::UnknownEnvironment {
                name: name.to_string(),
                available: self.env_names(),
            })
    }

    /// Check if `name` is the isolated-build helper environment.
    pub fn is_isolated_build_env(&self, name: &str) -> bool {
        self.settings.isolated_build && self.settings.isolated_build_env == name
    }

    /// Build the immutable config snapshot for an environment.
    ///
    /// `config` supplies the channel default when the environment leaves
    /// `pytorch_channel` unset. The isolated-build helper environment does not
    /// need a table of its own.
    pub fn environment_config(
        &self,
        name: &str,
        config: &Config,
    ) -> Result<EnvironmentConfig, ManifestError> {
        let is_isolated_build_env = self.is_isolated_build_env(name);

        let fallback = EnvSection::default();
        let section = match self.env(name) {
            Ok(section) => section,
            Err(_) if is_isolated_build_env => &fallback,
            Err(e) => return Err(e),
        };

        let channel = section
            .pytorch_channel
            .clone()
            .or_else(|| config.defaults.pytorch_channel.clone())
            .map(Channel::new)
            .unwrap_or_default();

        Ok(EnvironmentConfig {
            name: name.to_string(),
            disabled: section.disable_light_the_torch,
            skip_install: section.skip_install,
            use_develop: section.usedevelop,
            extras: section.extras.clone(),
            channel,
            force_cpu: section.pytorch_force_cpu,
            force_cpu_legacy: section.force_cpu,
            interpreter: section
                .basepython
                .clone()
                .unwrap_or_else(|| default_interpreter().to_string()),
            is_isolated_build_env,
        })
    }
}

/// Find the manifest in `dir` or the closest parent directory.
pub fn find_manifest(dir: &Path) -> Result<PathBuf, ManifestError> {
    let mut current = dir.to_path_buf();
    loop {
        let candidate = current.join(MANIFEST_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
        if !current.pop() {
            return Err(ManifestError::NotFound {
                dir: dir.to_path_buf(),
            });
        }
    }
}
