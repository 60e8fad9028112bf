//! torchenv - PyTorch-aware dependency installation for Python test environments
//!
//! This crate provides the core library functionality for torchenv: reading
//! environment manifests, resolving installation options, and driving the
//! light-the-torch based install pipeline.

pub mod core;
pub mod host;
pub mod ops;
pub mod util;

/// Stubs for the pipeline collaborators.
///
/// This module is only available when running tests.
#[cfg(test)]
pub mod test_support;

pub use core::{
    environment::{EnvironmentConfig, EnvironmentInputs},
    manifest::Manifest,
    plan::InstallPlan,
};

pub use ops::{install_deps, InstallOutcome};
pub use util::context::GlobalContext;
