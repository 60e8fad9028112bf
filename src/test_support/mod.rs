//! Test doubles for the pipeline collaborators.
//!
//! Every stub records what it was asked so tests can assert on the calls the
//! pipeline made as well as on its outcome.
//!
//! # Example
//!
//! ```rust,ignore
//! use torchenv::test_support::{StubExtractor, RecordingReporter};
//!
//! let extractor = StubExtractor::returning(&["torch==1.5.0"]);
//! let mut reporter = RecordingReporter::new();
//! // run the pipeline...
//! assert_eq!(extractor.calls().len(), 1);
//! ```

use std::sync::Mutex;

use anyhow::{bail, Result};

use crate::core::plan::InstallPlan;
use crate::core::requirement::{DistributionSet, RequirementList};
use crate::host::{
    DistributionExtractor, Installer, InterpreterProbe, LinkOptions, LinkResolver, ProbeError,
    PythonVersion, Reporter,
};
use crate::util::diagnostic::Diagnostic;

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Distribution extractor returning a fixed answer.
#[derive(Debug)]
pub struct StubExtractor {
    answer: Result<Vec<String>, String>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl StubExtractor {
    /// Answer every call with `dists`.
    pub fn returning(dists: &[&str]) -> Self {
        StubExtractor {
            answer: Ok(owned(dists)),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail every call with `message`.
    pub fn failing(message: &str) -> Self {
        StubExtractor {
            answer: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// The requirement lists passed so far.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

impl DistributionExtractor for StubExtractor {
    fn extract_dists(&self, requirements: &RequirementList) -> Result<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .push(requirements.as_slice().to_vec());
        match &self.answer {
            Ok(dists) => Ok(dists.clone()),
            Err(message) => bail!("{}", message),
        }
    }
}

/// Link resolver returning a fixed answer.
#[derive(Debug)]
pub struct StubLinkResolver {
    answer: Result<Vec<String>, String>,
    calls: Mutex<Vec<(DistributionSet, LinkOptions)>>,
}

impl StubLinkResolver {
    pub fn returning(links: &[&str]) -> Self {
        StubLinkResolver {
            answer: Ok(owned(links)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        StubLinkResolver {
            answer: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// The distributions and options passed so far.
    pub fn calls(&self) -> Vec<(DistributionSet, LinkOptions)> {
        self.calls.lock().unwrap().clone()
    }
}

impl LinkResolver for StubLinkResolver {
    fn find_links(&self, dists: &DistributionSet, options: &LinkOptions) -> Result<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .push((dists.clone(), options.clone()));
        match &self.answer {
            Ok(links) => Ok(links.clone()),
            Err(message) => bail!("{}", message),
        }
    }
}

/// Interpreter probe with a canned version or error.
pub struct StubProbe {
    answer: Result<PythonVersion, fn() -> ProbeError>,
    calls: Mutex<usize>,
}

impl StubProbe {
    pub fn version(version: PythonVersion) -> Self {
        StubProbe {
            answer: Ok(version),
            calls: Mutex::new(0),
        }
    }

    /// Fail every call with the error built by `make_error`.
    pub fn failing(make_error: fn() -> ProbeError) -> Self {
        StubProbe {
            answer: Err(make_error),
            calls: Mutex::new(0),
        }
    }

    /// Number of times the interpreter was probed.
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl InterpreterProbe for StubProbe {
    fn python_version(&self, _interpreter: &str) -> Result<PythonVersion, ProbeError> {
        *self.calls.lock().unwrap() += 1;
        match &self.answer {
            Ok(version) => Ok(version.clone()),
            Err(make_error) => Err(make_error()),
        }
    }
}

/// Installer recording the plans it was handed.
#[derive(Debug, Default)]
pub struct RecordingInstaller {
    installed: Vec<InstallPlan>,
    failure: Option<String>,
}

impl RecordingInstaller {
    pub fn new() -> Self {
        RecordingInstaller::default()
    }

    /// Fail every install with `message`, recording nothing.
    pub fn failing(message: &str) -> Self {
        RecordingInstaller {
            installed: Vec::new(),
            failure: Some(message.to_string()),
        }
    }

    pub fn installed(&self) -> &[InstallPlan] {
        &self.installed
    }
}

impl Installer for RecordingInstaller {
    fn install(&mut self, plan: &InstallPlan) -> Result<()> {
        if let Some(message) = &self.failure {
            bail!("{}", message);
        }
        self.installed.push(plan.clone());
        Ok(())
    }
}

/// Reporter keeping every activity and diagnostic.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    activities: Vec<(String, String)>,
    diagnostics: Vec<Diagnostic>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        RecordingReporter::default()
    }

    /// `(name, message)` pairs in the order they were set.
    pub fn activities(&self) -> Vec<(String, String)> {
        self.activities.clone()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of diagnostics carrying `code`.
    pub fn count(&self, code: &str) -> usize {
        self.diagnostics.iter().filter(|d| d.is(code)).count()
    }

    pub fn has(&self, code: &str) -> bool {
        self.count(code) > 0
    }
}

impl Reporter for RecordingReporter {
    fn set_activity(&mut self, name: &str, msg: &str) {
        self.activities.push((name.to_string(), msg.to_string()));
    }

    fn diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
