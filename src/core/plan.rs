//! Install plans handed to the installer.

use std::fmt;

use serde::Serialize;

/// Ordered install sources (direct links or index entries).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallPlan {
    sources: Vec<String>,
}

impl InstallPlan {
    pub fn new(sources: Vec<String>) -> Self {
        InstallPlan { sources }
    }

    /// Get the install sources in order.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// The activity label shown before dispatch: sources joined by `, `.
impl fmt::Display for InstallPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sources.join(", "))
    }
}
