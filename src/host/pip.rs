//! pip-based installer.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::plan::InstallPlan;
use crate::host::Installer;
use crate::util::process::ProcessBuilder;

/// Installs sources with `<interpreter> -m pip install`.
#[derive(Debug, Clone)]
pub struct PipInstaller {
    interpreter: String,
    cwd: Option<PathBuf>,
}

impl PipInstaller {
    /// Create an installer for the given interpreter command.
    pub fn new(interpreter: impl Into<String>) -> Self {
        PipInstaller {
            interpreter: interpreter.into(),
            cwd: None,
        }
    }

    /// Run pip from the given directory.
    pub fn with_cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    fn command(&self, plan: &InstallPlan) -> Result<ProcessBuilder> {
        let mut process = ProcessBuilder::from_command_line(&self.interpreter)
            .context("no interpreter command configured")?
            .resolve_program()
            .args(["-m", "pip", "install"])
            .args(plan.sources());
        if let Some(ref cwd) = self.cwd {
            process = process.cwd(cwd);
        }
        Ok(process)
    }
}

impl Installer for PipInstaller {
    fn install(&mut self, plan: &InstallPlan) -> Result<()> {
        let process = self.command(plan)?;
        process
            .run()
            .with_context(|| format!("failed to install {} source(s) with pip", plan.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pip_command() {
        let installer = PipInstaller::new("/venv/bin/python -I");
        let plan = InstallPlan::new(vec![
            "https://download.pytorch.org/whl/cpu/torch-1.5.0%2Bcpu-cp38-cp38-linux_x86_64.whl"
                .to_string(),
        ]);

        let process = installer.command(&plan).unwrap();
        assert_eq!(
            process.display_command(),
            "/venv/bin/python -I -m pip install \
             https://download.pytorch.org/whl/cpu/torch-1.5.0%2Bcpu-cp38-cp38-linux_x86_64.whl"
        );
    }

    #[test]
    fn test_pip_command_keeps_interpreter_path_with_spaces() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("My Pythons");
        std::fs::create_dir(&dir).unwrap();
        let python = dir.join("python");
        std::fs::write(&python, "").unwrap();

        let installer = PipInstaller::new(python.to_string_lossy());
        let process = installer
            .command(&InstallPlan::new(vec!["torch".to_string()]))
            .unwrap();
        assert_eq!(process.get_program(), python.as_path());
        assert_eq!(process.get_args(), &["-m", "pip", "install", "torch"]);
    }

    #[test]
    fn test_pip_command_requires_interpreter() {
        let installer = PipInstaller::new("");
        assert!(installer.command(&InstallPlan::default()).is_err());
    }
}
