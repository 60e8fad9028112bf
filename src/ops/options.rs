//! Option resolution.
//!
//! Turns an [`EnvironmentConfig`] into the normalized [`ResolvedOptions`]
//! the rest of the pipeline works with. This is where the deprecated
//! `force_cpu` alias is reconciled with `pytorch_force_cpu`.

use crate::core::attributes::{FORCE_CPU, PYTORCH_FORCE_CPU};
use crate::core::channel::Channel;
use crate::core::environment::EnvironmentConfig;
use crate::util::diagnostic::{codes, Diagnostic};

/// An explicit backend requested by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendOverride {
    Cpu,
}

/// Normalized installation options of one environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    /// Forced backend; `None` defers to auto-detection
    pub backend_override: Option<BackendOverride>,

    pub channel: Channel,

    /// The override came from the deprecated `force_cpu` attribute
    pub used_legacy_alias: bool,
}

impl ResolvedOptions {
    /// Diagnostics describing how the options were resolved.
    ///
    /// Contains exactly one deprecation warning when the legacy alias was
    /// used, and nothing otherwise.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        if !self.used_legacy_alias {
            return Vec::new();
        }

        vec![Diagnostic::warning(format!(
            "'{}' is deprecated and takes precedence over '{}'",
            FORCE_CPU, PYTORCH_FORCE_CPU
        ))
        .with_code(codes::DEPRECATED_FORCE_CPU)
        .with_suggestion(format!(
            "replace '{} = true' with '{} = true'",
            FORCE_CPU, PYTORCH_FORCE_CPU
        ))]
    }
}

/// Resolve the installation options of an environment.
///
/// Pure: the same config always yields the same options. If the legacy
/// `force_cpu` flag is set it wins regardless of `pytorch_force_cpu`.
pub fn resolve_options(config: &EnvironmentConfig) -> ResolvedOptions {
    let (backend_override, used_legacy_alias) = if config.force_cpu_legacy {
        (Some(BackendOverride::Cpu), true)
    } else if config.force_cpu {
        (Some(BackendOverride::Cpu), false)
    } else {
        (None, false)
    };

    ResolvedOptions {
        backend_override,
        channel: config.channel.clone(),
        used_legacy_alias,
    }
}
