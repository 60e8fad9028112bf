//! Subprocess execution utilities.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use anyhow::{bail, Context, Result};

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Create a process builder from a command line such as `py -3.8`.
    ///
    /// A line naming an existing file or a program on PATH is taken whole,
    /// so paths containing spaces stay intact. Anything else is split on
    /// whitespace and the first word is the program. Returns `None` for a
    /// blank line.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if Path::new(line).is_file() || find_executable(line).is_some() {
            return Some(ProcessBuilder::new(line));
        }

        let mut words = line.split_whitespace();
        let program = words.next()?;
        Some(ProcessBuilder::new(program).args(words))
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Get the program path.
    pub fn get_program(&self) -> &Path {
        &self.program
    }

    /// Get the arguments.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Resolve the program through PATH, leaving explicit paths alone.
    pub fn resolve_program(mut self) -> Self {
        if self.program.components().count() == 1 {
            if let Some(path) = find_executable(&self.program.to_string_lossy()) {
                self.program = path;
            }
        }
        self
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Execute the command, capturing its output, and wait for completion.
    ///
    /// Returns the raw I/O error when the program cannot be spawned.
    pub fn output(&self) -> std::io::Result<Output> {
        let mut cmd = self.build_command();
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("Running `{}`", self.display_command());

        cmd.output()
    }

    /// Execute the command, capturing its output, and wait for completion.
    pub fn exec(&self) -> Result<Output> {
        self.output()
            .with_context(|| format!("failed to execute `{}`", self.program.display()))
    }

    /// Execute and require success.
    pub fn exec_and_check(&self) -> Result<Output> {
        let output = self.exec()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "`{}` failed with exit code {:?}\n{}",
                self.display_command(),
                output.status.code(),
                stderr.trim_end()
            );
        }
        Ok(output)
    }

    /// Execute with inherited stdio and require success.
    pub fn run(&self) -> Result<()> {
        tracing::debug!("Running `{}`", self.display_command());

        let status = self
            .build_command()
            .status()
            .with_context(|| format!("failed to execute `{}`", self.program.display()))?;

        if !status.success() {
            bail!(
                "`{}` failed with exit code {:?}",
                self.display_command(),
                status.code()
            );
        }
        Ok(())
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Split captured output into trimmed, non-empty lines.
pub fn output_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
