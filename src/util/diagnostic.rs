//! User-facing diagnostic messages.
//!
//! Pipeline steps never print. They hand [`Diagnostic`]s to a
//! [`crate::host::Reporter`], which decides how and whether to show them.

use std::fmt;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    /// Informational; only shown in verbose mode
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// Stable identifiers for the diagnostics torchenv emits.
pub mod codes {
    /// `force_cpu` is set; `pytorch_force_cpu` should be used instead.
    pub const DEPRECATED_FORCE_CPU: &str = "deprecated-force-cpu";

    /// The CPU backend was forced instead of auto-detected.
    pub const FORCED_CPU: &str = "forced-cpu";

    /// `disable_light_the_torch` is set.
    pub const DISABLED: &str = "disabled";

    /// No PyTorch distributions among the requirements.
    pub const NO_PYTORCH_DISTS: &str = "no-pytorch-dists";
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Stable identifier (see [`codes`])
    pub code: Option<&'static str>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity,
            code: None,
            suggestions: Vec::new(),
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Create a new informational diagnostic.
    pub fn note(message: impl Into<String>) -> Self {
        Self::new(Severity::Note, message)
    }

    /// Attach a stable code.
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Check if this diagnostic carries the given code.
    pub fn is(&self, code: &str) -> bool {
        self.code == Some(code)
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity_str = if color {
            match self.severity {
                Severity::Warning => "\x1b[1;33mwarning\x1b[0m",
                Severity::Note => "\x1b[1;36mnote\x1b[0m",
            }
        } else {
            match self.severity {
                Severity::Warning => "warning",
                Severity::Note => "note",
            }
        };

        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        for suggestion in &self.suggestions {
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("  {}: {}\n", help_prefix, suggestion));
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}
