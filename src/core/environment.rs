//! Per-environment installation settings.
//!
//! An [`EnvironmentConfig`] is the immutable snapshot of everything the
//! installation pipeline needs to know about one environment's settings.
//! [`EnvironmentInputs`] carries what the host resolved on its side: the
//! dependency names and the locations of the environment's own package.

use std::path::{Path, PathBuf};

use crate::core::channel::Channel;

/// Installation-relevant settings of a single environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    /// Environment name (e.g. `py38`)
    pub name: String,

    /// Skip the PyTorch-aware installation entirely
    pub disabled: bool,

    /// Do not install the environment's own package
    pub skip_install: bool,

    /// Install the package in develop (editable) mode
    pub use_develop: bool,

    /// Extras of the package to install, in configured order
    pub extras: Vec<String>,

    /// Release channel for the PyTorch distributions
    pub channel: Channel,

    /// `pytorch_force_cpu`
    pub force_cpu: bool,

    /// Deprecated `force_cpu` alias
    pub force_cpu_legacy: bool,

    /// Command used to invoke the environment's interpreter
    pub interpreter: String,

    /// Whether this is the host's isolated-build helper environment
    pub is_isolated_build_env: bool,
}

impl EnvironmentConfig {
    /// Create a config with default settings for the named environment.
    pub fn new(name: impl Into<String>) -> Self {
        EnvironmentConfig {
            name: name.into(),
            disabled: false,
            skip_install: false,
            use_develop: false,
            extras: Vec::new(),
            channel: Channel::default(),
            force_cpu: false,
            force_cpu_legacy: false,
            interpreter: default_interpreter().to_string(),
            is_isolated_build_env: false,
        }
    }
}

/// Interpreter used when an environment does not configure `basepython`.
pub fn default_interpreter() -> &'static str {
    if cfg!(windows) {
        "python"
    } else {
        "python3"
    }
}

/// Inputs the host resolved for an environment before installation.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentInputs {
    /// Already-resolved dependency names (deduplicated by the host)
    pub dependencies: Vec<String>,

    /// Source directory of the environment's package (used in develop mode)
    pub setup_source_dir: PathBuf,

    /// Built package artifact (sdist, wheel, or directory)
    pub package_artifact: PathBuf,
}

impl EnvironmentInputs {
    /// Create inputs for the given dependencies and package locations.
    pub fn new(
        dependencies: Vec<String>,
        setup_source_dir: impl AsRef<Path>,
        package_artifact: impl AsRef<Path>,
    ) -> Self {
        EnvironmentInputs {
            dependencies,
            setup_source_dir: setup_source_dir.as_ref().to_path_buf(),
            package_artifact: package_artifact.as_ref().to_path_buf(),
        }
    }
}
