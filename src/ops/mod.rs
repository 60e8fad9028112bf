//! High-level operations.
//!
//! This module contains the steps of the install pipeline and the
//! orchestrator that chains them.

pub mod backend;
pub mod distributions;
pub mod install_deps;
pub mod options;
pub mod requirements;

pub use backend::{select_backend, BackendSelection};
pub use distributions::filter_distributions;
pub use install_deps::{
    install_deps, Collaborators, InstallDepsOptions, InstallOutcome, SkipReason,
};
pub use options::{resolve_options, BackendOverride, ResolvedOptions};
pub use requirements::build_requirements;
