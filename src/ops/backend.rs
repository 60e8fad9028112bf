//! Backend selection.

use crate::core::backend::ComputationBackend;
use crate::ops::options::{BackendOverride, ResolvedOptions};
use crate::util::diagnostic::{codes, Diagnostic};

/// The backend passed to the link resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendSelection {
    /// `None` lets the link resolver auto-detect the backend
    pub backend: Option<ComputationBackend>,

    /// Informational note when the backend was forced
    pub diagnostic: Option<Diagnostic>,
}

/// Decide whether to force a backend. Hardware is never probed here.
pub fn select_backend(options: &ResolvedOptions) -> BackendSelection {
    match options.backend_override {
        Some(BackendOverride::Cpu) => BackendSelection {
            backend: Some(ComputationBackend::Cpu),
            diagnostic: Some(
                Diagnostic::note(
                    "Using CPU as computation backend instead of auto-detecting since \
                     it is forced by configuration.",
                )
                .with_code(codes::FORCED_CPU),
            ),
        },
        None => BackendSelection {
            backend: None,
            diagnostic: None,
        },
    }
}
