//! Global context for torchenv operations.
//!
//! Provides centralized access to configuration paths and the working
//! directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::manifest::{find_manifest, ManifestError};
use crate::util::config::{global_config_dir, load_config, Config};

/// Global context shared by all commands.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// torchenv home directory (~/.torchenv)
    home: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext from the process environment.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to determine current directory")?;

        let home = global_config_dir()
            .context("could not determine home directory")?;

        Ok(GlobalContext { cwd, home })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Get the project configuration file path for a project root.
    pub fn project_config_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(".torchenv").join("config.toml")
    }

    /// Load the merged global and project configuration.
    pub fn load_config(&self, project_root: &Path) -> Config {
        load_config(&self.config_path(), &self.project_config_path(project_root))
    }

    /// Find torchenv.toml starting from cwd and searching upward.
    pub fn find_manifest(&self) -> Result<PathBuf, ManifestError> {
        find_manifest(&self.cwd)
    }
}
