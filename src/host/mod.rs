//! Collaborators of the installation pipeline.
//!
//! The pipeline decides *what* to install; everything that touches the
//! outside world sits behind one of these traits so the decision logic can be
//! exercised without a Python toolchain:
//!
//! - [`DistributionExtractor`]: finds the PyTorch distributions among requirements
//! - [`LinkResolver`]: turns distributions into install sources
//! - [`Installer`]: installs sources into the environment
//! - [`InterpreterProbe`]: asks the environment's interpreter for its version
//! - [`Reporter`]: receives activity labels and diagnostics
//!
//! [`ltt::LttCli`] and [`pip::PipInstaller`] are the implementations the CLI
//! uses.

pub mod interpreter;
pub mod ltt;
pub mod pip;

use anyhow::Result;

use crate::core::backend::ComputationBackend;
use crate::core::channel::Channel;
use crate::core::plan::InstallPlan;
use crate::core::requirement::{DistributionSet, RequirementList};
use crate::util::diagnostic::Diagnostic;

pub use interpreter::{InterpreterProbe, ProbeError, PythonVersion, SubprocessProbe};
pub use ltt::LttCli;
pub use pip::PipInstaller;

/// Finds PyTorch distribution specifiers among requirements.
pub trait DistributionExtractor {
    /// Return the PyTorch distributions required, directly or transitively,
    /// by `requirements`. Specifiers may carry environment markers.
    fn extract_dists(&self, requirements: &RequirementList) -> Result<Vec<String>>;
}

/// Parameters of a link lookup besides the distributions themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOptions {
    /// Backend to use; `None` lets the resolver auto-detect one
    pub backend: Option<ComputationBackend>,
    pub channel: Channel,
    pub python_version: PythonVersion,
}

/// Resolves distributions to concrete install sources.
pub trait LinkResolver {
    fn find_links(&self, dists: &DistributionSet, options: &LinkOptions) -> Result<Vec<String>>;
}

/// The host's install-execution primitive.
pub trait Installer {
    fn install(&mut self, plan: &InstallPlan) -> Result<()>;
}

/// Sink for activity labels and diagnostics.
pub trait Reporter {
    /// Record what the pipeline is doing (e.g. `installdeps-light-the-torch`).
    fn set_activity(&mut self, name: &str, msg: &str);

    fn diagnostic(&mut self, diagnostic: Diagnostic);
}
