//! Interpreter version probing.
//!
//! The binary variant to install depends on the interpreter the environment
//! runs, not on the one torchenv happens to find first. The version is asked
//! from the interpreter itself via `--version`.

use std::fmt;
use std::process::Output;
use std::sync::LazyLock;

use miette::Diagnostic as MietteDiagnostic;
use regex::Regex;
use thiserror::Error;

use crate::util::process::ProcessBuilder;

/// `Python 3.8.5`, `Python 3.12.0rc1`, `Python 2.7.18`
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Python\s+(\d+)\.(\d+)(?:\.(\d+))?").expect("valid version regex")
});

/// Errors from probing an interpreter. All of them are fatal for the
/// environment being installed.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ProbeError {
    #[error("no interpreter command configured")]
    #[diagnostic(
        code(torchenv::probe::empty_command),
        help("set `basepython` for the environment")
    )]
    EmptyCommand,

    #[error("failed to run interpreter `{command}`")]
    #[diagnostic(
        code(torchenv::probe::spawn),
        help("check that the interpreter exists and is executable")
    )]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with code {code:?}: {stderr}")]
    #[diagnostic(code(torchenv::probe::failed))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("could not find a Python version in the output of `{command}`: {output:?}")]
    #[diagnostic(code(torchenv::probe::unrecognized_output))]
    UnrecognizedOutput { command: String, output: String },
}

/// A Python version as reported by the interpreter (`3.8.5`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PythonVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: Option<u32>,
}

impl PythonVersion {
    pub fn new(major: u32, minor: u32, patch: Option<u32>) -> Self {
        PythonVersion {
            major,
            minor,
            patch,
        }
    }

    /// Parse the `--version` output of an interpreter.
    ///
    /// Only the leading `Python X.Y[.Z]` token is used; pre-release and
    /// build suffixes are dropped.
    pub fn parse_output(output: &str) -> Option<Self> {
        let caps = VERSION_RE.captures(output.trim())?;
        let major = caps.get(1)?.as_str().parse().ok()?;
        let minor = caps.get(2)?.as_str().parse().ok()?;
        let patch = match caps.get(3) {
            Some(m) => Some(m.as_str().parse().ok()?),
            None => None,
        };
        Some(PythonVersion::new(major, minor, patch))
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.patch {
            Some(patch) => write!(f, "{}.{}.{}", self.major, self.minor, patch),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}

/// Determines the Python version of an interpreter command.
pub trait InterpreterProbe {
    fn python_version(&self, interpreter: &str) -> Result<PythonVersion, ProbeError>;
}

/// Probes by running `<interpreter> --version` and waiting for it to exit.
///
/// There is no timeout: a hanging interpreter hangs the probe.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubprocessProbe;

impl SubprocessProbe {
    pub fn new() -> Self {
        SubprocessProbe
    }
}

impl InterpreterProbe for SubprocessProbe {
    fn python_version(&self, interpreter: &str) -> Result<PythonVersion, ProbeError> {
        let process = ProcessBuilder::from_command_line(interpreter)
            .ok_or(ProbeError::EmptyCommand)?
            .resolve_program()
            .arg("--version");

        let command = process.display_command();
        let output = process.output().map_err(|source| ProbeError::Spawn {
            command: command.clone(),
            source,
        })?;

        parse_probe_output(&command, &output)
    }
}

/// Interpret the captured output of a `--version` call.
///
/// Python 2 prints its version to stderr, so stderr is consulted when stdout
/// is empty.
fn parse_probe_output(command: &str, output: &Output) -> Result<PythonVersion, ProbeError> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    if !output.status.success() {
        return Err(ProbeError::Failed {
            command: command.to_string(),
            code: output.status.code(),
            stderr: stderr.trim().to_string(),
        });
    }

    let text = if stdout.trim().is_empty() {
        stderr
    } else {
        stdout
    };

    let version = PythonVersion::parse_output(&text).ok_or_else(|| {
        ProbeError::UnrecognizedOutput {
            command: command.to_string(),
            output: text.trim().to_string(),
        }
    })?;

    tracing::debug!("`{}` reports Python {}", command, version);
    Ok(version)
}
