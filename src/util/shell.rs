//! Centralized shell output.
//!
//! The Shell provides a unified API for all CLI output:
//! - Status messages with consistent formatting
//! - Verbosity-aware diagnostics (notes only in verbose mode)
//! - JSON output mode for machine-readable output
//!
//! It is also the [`Reporter`] the CLI hands to the installation pipeline.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

use crate::host::Reporter;
use crate::util::diagnostic::{Diagnostic, Severity};

/// Shell output mode - Human and Json are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellMode {
    /// Human-readable output with optional colors.
    Human {
        verbosity: Verbosity,
        color: ColorChoice,
    },
    /// Machine-readable JSON output only.
    Json,
}

/// Output verbosity level (Human mode only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// --quiet: no status lines or warnings
    Quiet,
    /// Default: status messages and warnings
    #[default]
    Normal,
    /// --verbose: also informational notes
    Verbose,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Detect TTY and use colors if available.
    #[default]
    Auto,
    /// Always use ANSI colors.
    Always,
    /// Never use ANSI colors.
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "invalid color choice '{}'; expected 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}

/// Status types for output messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    // Success statuses (green)
    Installed,
    Planned,

    // In-progress statuses (cyan)
    Running,

    // Warning statuses (yellow)
    Skipped,
}

impl Status {
    fn as_str(&self) -> &'static str {
        match self {
            Status::Installed => "Installed",
            Status::Planned => "Planned",
            Status::Running => "Running",
            Status::Skipped => "Skipped",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Status::Installed | Status::Planned => "\x1b[1;32m",
            Status::Running => "\x1b[1;36m",
            Status::Skipped => "\x1b[1;33m",
        }
    }

    /// Width for right alignment.
    const WIDTH: usize = 12;
}

/// Central shell for all CLI output.
#[derive(Debug)]
pub struct Shell {
    mode: ShellMode,
    use_color: bool,
}

impl Shell {
    /// Create a new shell with the given mode.
    pub fn new(mode: ShellMode) -> Self {
        let use_color = match &mode {
            ShellMode::Json => false,
            ShellMode::Human { color, .. } => match color {
                ColorChoice::Auto => io::stderr().is_terminal(),
                ColorChoice::Always => true,
                ColorChoice::Never => false,
            },
        };

        Shell { mode, use_color }
    }

    /// Create a shell from CLI flags with proper precedence.
    ///
    /// JSON mode takes precedence over quiet/verbose.
    pub fn from_flags(
        quiet: bool,
        verbose: bool,
        color: ColorChoice,
        message_format_json: bool,
    ) -> Self {
        let mode = if message_format_json {
            ShellMode::Json
        } else {
            let verbosity = if quiet {
                Verbosity::Quiet
            } else if verbose {
                Verbosity::Verbose
            } else {
                Verbosity::Normal
            };
            ShellMode::Human { verbosity, color }
        };

        Shell::new(mode)
    }

    pub fn is_quiet(&self) -> bool {
        matches!(
            self.mode,
            ShellMode::Human {
                verbosity: Verbosity::Quiet,
                ..
            }
        )
    }

    pub fn is_verbose(&self) -> bool {
        matches!(
            self.mode,
            ShellMode::Human {
                verbosity: Verbosity::Verbose,
                ..
            }
        )
    }

    pub fn is_json(&self) -> bool {
        matches!(self.mode, ShellMode::Json)
    }

    /// Print a status message.
    ///
    /// Format: `{status:>12} {message}`
    ///
    /// Silent in quiet mode. In JSON mode, messages are silently ignored
    /// (use json_event for JSON output).
    pub fn status(&self, status: Status, msg: impl Display) {
        if self.is_json() || self.is_quiet() {
            return;
        }

        eprintln!("{} {}", self.format_status(status), msg);
    }

    /// Print a JSON event to stdout.
    ///
    /// Only works in JSON mode; silently ignored in human mode.
    pub fn json_event(&self, event: &serde_json::Value) {
        if !self.is_json() {
            return;
        }

        let json_str = serde_json::to_string(event).unwrap_or_default();
        println!("{}", json_str);
        let _ = io::stdout().flush();
    }

    /// Print a diagnostic, honoring verbosity.
    pub fn diagnostic(&self, diagnostic: &Diagnostic) {
        if self.is_json() {
            let event = serde_json::json!({
                "reason": "diagnostic",
                "severity": diagnostic.severity.to_string(),
                "code": diagnostic.code,
                "message": diagnostic.message,
                "suggestions": diagnostic.suggestions,
            });
            self.json_event(&event);
            return;
        }

        let visible = match diagnostic.severity {
            Severity::Warning => !self.is_quiet(),
            Severity::Note => self.is_verbose(),
        };
        if visible {
            eprint!("{}", diagnostic.format(self.use_color));
        }
    }

    fn format_status(&self, status: Status) -> String {
        let text = status.as_str();
        let width = Status::WIDTH;

        if self.use_color {
            format!("{}{:>width$}\x1b[0m", status.color_code(), text, width = width)
        } else {
            format!("{:>width$}", text, width = width)
        }
    }
}

impl Reporter for Shell {
    fn set_activity(&mut self, name: &str, msg: &str) {
        tracing::debug!("activity {}: {}", name, msg);

        if self.is_json() {
            let event = serde_json::json!({
                "reason": "activity",
                "name": name,
                "message": msg,
            });
            self.json_event(&event);
        } else if msg.is_empty() {
            self.status(Status::Running, name);
        } else {
            self.status(Status::Running, format!("{}: {}", name, msg));
        }
    }

    fn diagnostic(&mut self, diagnostic: Diagnostic) {
        Shell::diagnostic(self, &diagnostic);
    }
}
