//! Computation backends PyTorch binaries are built for.

use std::fmt;

/// Hardware target passed to the link resolver when one is forced.
///
/// Accelerator backends are never forced here; leaving the backend unset
/// lets the link resolver detect one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComputationBackend {
    /// CPU-only build
    Cpu,
}

/// Renders the local version tag used in wheel names.
impl fmt::Display for ComputationBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComputationBackend::Cpu => write!(f, "cpu"),
        }
    }
}
