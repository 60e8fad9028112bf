//! light-the-torch CLI collaborator.
//!
//! Distribution extraction and link resolution (including backend
//! auto-detection and channel validation) are delegated to the `ltt`
//! command line tool:
//!
//! ```text
//! ltt extract <requirement>...
//! ltt find [--computation-backend <backend>] --channel <channel> --python-version <version> <dist>...
//! ```
//!
//! Both subcommands print one result per line.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::requirement::{DistributionSet, RequirementList};
use crate::host::{DistributionExtractor, LinkOptions, LinkResolver};
use crate::util::process::{output_lines, ProcessBuilder};

/// Invokes the light-the-torch CLI.
#[derive(Debug, Clone)]
pub struct LttCli {
    program: PathBuf,
    cwd: Option<PathBuf>,
}

impl LttCli {
    pub fn new(program: impl AsRef<Path>) -> Self {
        LttCli {
            program: program.as_ref().to_path_buf(),
            cwd: None,
        }
    }

    /// Run `ltt` from the given directory so relative requirement paths resolve.
    pub fn with_cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    fn command(&self, subcommand: &str) -> ProcessBuilder {
        let mut process = ProcessBuilder::new(&self.program).resolve_program();
        if let Some(ref cwd) = self.cwd {
            process = process.cwd(cwd);
        }
        process.arg(subcommand)
    }

    fn find_command(&self, dists: &DistributionSet, options: &LinkOptions) -> ProcessBuilder {
        let mut process = self.command("find");
        if let Some(backend) = options.backend {
            process = process.args(["--computation-backend".to_string(), backend.to_string()]);
        }
        process
            .args(["--channel", options.channel.as_str()])
            .args(["--python-version".to_string(), options.python_version.to_string()])
            .args(dists.iter())
    }
}

impl DistributionExtractor for LttCli {
    fn extract_dists(&self, requirements: &RequirementList) -> Result<Vec<String>> {
        let output = self
            .command("extract")
            .args(requirements.iter())
            .exec_and_check()
            .context("failed to extract PyTorch distributions with light-the-torch")?;

        Ok(output_lines(&output.stdout))
    }
}

impl LinkResolver for LttCli {
    fn find_links(&self, dists: &DistributionSet, options: &LinkOptions) -> Result<Vec<String>> {
        let output = self
            .find_command(dists, options)
            .exec_and_check()
            .context("failed to find PyTorch distribution links with light-the-torch")?;

        Ok(output_lines(&output.stdout))
    }
}
