//! PyTorch-aware dependency installation for one environment.
//!
//! Runs right before the host installs an environment's dependencies. The
//! pipeline is strictly linear and every step before link resolution may end
//! it early without error:
//!
//! 1. isolated-build helper environment: nothing to do
//! 2. `disable_light_the_torch`: nothing to do
//! 3. no requirements at all: nothing to do
//! 4. no PyTorch distributions among the requirements: nothing to do
//! 5. resolve backend, channel and interpreter version, then find links
//! 6. hand the links to the installer
//!
//! Failures of the interpreter probe or of any collaborator abort the
//! environment, as does a link lookup that yields no sources; nothing is
//! retried and no partial plan is installed.

use std::fmt;

use anyhow::{bail, Context, Result};

use crate::core::environment::{EnvironmentConfig, EnvironmentInputs};
use crate::core::plan::InstallPlan;
use crate::host::{
    DistributionExtractor, Installer, InterpreterProbe, LinkOptions, LinkResolver, Reporter,
};
use crate::ops::backend::select_backend;
use crate::ops::distributions::filter_distributions;
use crate::ops::options::resolve_options;
use crate::ops::requirements::build_requirements;
use crate::util::diagnostic::{codes, Diagnostic};

pub const ACTIVITY_SKIP: &str = "light-the-torch";
pub const ACTIVITY_FIND: &str = "finddeps-light-the-torch";
pub const ACTIVITY_INSTALL: &str = "installdeps-light-the-torch";

/// Why the pipeline ended without installing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    IsolatedBuildEnv,
    Disabled,
    NoRequirements,
    NoPytorchDists,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::IsolatedBuildEnv => write!(f, "isolated build environment"),
            SkipReason::Disabled => write!(f, "disabled by configuration"),
            SkipReason::NoRequirements => write!(f, "no requirements"),
            SkipReason::NoPytorchDists => write!(f, "no PyTorch distributions"),
        }
    }
}

/// Terminal state of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Skipped(SkipReason),
    /// Links were resolved but not installed (dry run)
    Planned(InstallPlan),
    Installed(InstallPlan),
}

impl InstallOutcome {
    /// The resolved plan, if the pipeline got that far.
    pub fn plan(&self) -> Option<&InstallPlan> {
        match self {
            InstallOutcome::Skipped(_) => None,
            InstallOutcome::Planned(plan) | InstallOutcome::Installed(plan) => Some(plan),
        }
    }
}

/// Options controlling a pipeline run.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallDepsOptions {
    /// Stop after link resolution without installing
    pub dry_run: bool,
}

/// The external collaborators a pipeline run talks to.
pub struct Collaborators<'a> {
    pub extractor: &'a dyn DistributionExtractor,
    pub resolver: &'a dyn LinkResolver,
    pub probe: &'a dyn InterpreterProbe,
    pub installer: &'a mut dyn Installer,
    pub reporter: &'a mut dyn Reporter,
}

/// Run the installation pipeline for one environment.
pub fn install_deps(
    config: &EnvironmentConfig,
    inputs: &EnvironmentInputs,
    collab: Collaborators<'_>,
    opts: &InstallDepsOptions,
) -> Result<InstallOutcome> {
    let Collaborators {
        extractor,
        resolver,
        probe,
        installer,
        reporter,
    } = collab;

    let options = resolve_options(config);

    if config.is_isolated_build_env {
        tracing::debug!("{}: isolated build environment, skipping", config.name);
        return Ok(InstallOutcome::Skipped(SkipReason::IsolatedBuildEnv));
    }

    for diagnostic in options.diagnostics() {
        reporter.diagnostic(diagnostic);
    }

    if config.disabled {
        reporter.set_activity(ACTIVITY_SKIP, "skip");
        reporter.diagnostic(
            Diagnostic::note(
                "Skipping installation with light-the-torch since \
                 'disable_light_the_torch = true' is configured.",
            )
            .with_code(codes::DISABLED),
        );
        return Ok(InstallOutcome::Skipped(SkipReason::Disabled));
    }

    let requirements = build_requirements(inputs, config);
    if requirements.is_empty() {
        tracing::debug!("{}: no requirements, skipping", config.name);
        return Ok(InstallOutcome::Skipped(SkipReason::NoRequirements));
    }

    reporter.set_activity(ACTIVITY_FIND, "");
    let dists = filter_distributions(extractor, &requirements)?;
    if dists.is_empty() {
        reporter.diagnostic(
            Diagnostic::note(
                "Skipping installation with light-the-torch since no PyTorch \
                 distributions were found in the dependencies and requirements.",
            )
            .with_code(codes::NO_PYTORCH_DISTS),
        );
        return Ok(InstallOutcome::Skipped(SkipReason::NoPytorchDists));
    }

    let selection = select_backend(&options);
    if let Some(diagnostic) = selection.diagnostic {
        reporter.diagnostic(diagnostic);
    }

    let python_version = probe
        .python_version(&config.interpreter)
        .with_context(|| format!("failed to determine the Python version of `{}`", config.name))?;

    let link_options = LinkOptions {
        backend: selection.backend,
        channel: options.channel,
        python_version,
    };
    let backend_label = link_options
        .backend
        .map(|b| b.to_string())
        .unwrap_or_else(|| "auto".to_string());
    tracing::debug!(
        "{}: finding links for {} (backend: {}, channel: {}, python: {})",
        config.name,
        dists,
        backend_label,
        link_options.channel,
        link_options.python_version
    );

    let links = resolver.find_links(&dists, &link_options)?;
    if links.is_empty() {
        bail!(
            "no install sources found for {} (backend: {}, channel: {}, python: {})",
            dists,
            backend_label,
            link_options.channel,
            link_options.python_version
        );
    }
    let plan = InstallPlan::new(links);

    if opts.dry_run {
        return Ok(InstallOutcome::Planned(plan));
    }

    reporter.set_activity(ACTIVITY_INSTALL, &plan.to_string());
    installer.install(&plan)?;

    Ok(InstallOutcome::Installed(plan))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backend::ComputationBackend;
    use crate::core::channel::Channel;
    use crate::host::{ProbeError, PythonVersion};
    use crate::test_support::{
        RecordingInstaller, RecordingReporter, StubExtractor, StubLinkResolver, StubProbe,
    };

    const TORCH_LINK: &str =
        "https://download.pytorch.org/whl/cpu/torch-1.5.0%2Bcpu-cp38-cp38-linux_x86_64.whl";

    struct Harness {
        extractor: StubExtractor,
        resolver: StubLinkResolver,
        probe: StubProbe,
        installer: RecordingInstaller,
        reporter: RecordingReporter,
    }

    impl Harness {
        fn new(dists: &[&str]) -> Self {
            Harness {
                extractor: StubExtractor::returning(dists),
                resolver: StubLinkResolver::returning(&[TORCH_LINK]),
                probe: StubProbe::version(PythonVersion::new(3, 8, Some(5))),
                installer: RecordingInstaller::new(),
                reporter: RecordingReporter::new(),
            }
        }

        fn run(&mut self, config: &EnvironmentConfig, deps: &[&str]) -> Result<InstallOutcome> {
            self.run_with(config, deps, &InstallDepsOptions::default())
        }

        fn run_with(
            &mut self,
            config: &EnvironmentConfig,
            deps: &[&str],
            opts: &InstallDepsOptions,
        ) -> Result<InstallOutcome> {
            let inputs = EnvironmentInputs::new(
                deps.iter().map(|d| d.to_string()).collect(),
                "/src/foo",
                "/src/foo/dist/foo-1.2.3.tar.gz",
            );
            install_deps(
                config,
                &inputs,
                Collaborators {
                    extractor: &self.extractor,
                    resolver: &self.resolver,
                    probe: &self.probe,
                    installer: &mut self.installer,
                    reporter: &mut self.reporter,
                },
                opts,
            )
        }
    }

    fn skip_install_config() -> EnvironmentConfig {
        let mut config = EnvironmentConfig::new("py");
        config.skip_install = true;
        config
    }

    #[test]
    fn test_torch_dependency_is_installed_with_auto_backend() {
        let mut harness = Harness::new(&["torch"]);

        let outcome = harness.run(&skip_install_config(), &["torch"]).unwrap();

        let InstallOutcome::Installed(plan) = outcome else {
            panic!("expected an install, got {outcome:?}");
        };
        assert_eq!(plan.sources(), &[TORCH_LINK]);

        let calls = harness.resolver.calls();
        assert_eq!(calls.len(), 1);
        let (dists, options) = &calls[0];
        assert_eq!(dists.as_slice(), &["torch"]);
        assert_eq!(options.backend, None);
        assert_eq!(options.channel, Channel::default());
        assert_eq!(options.python_version.to_string(), "3.8.5");

        assert_eq!(harness.installer.installed(), &[plan]);
        assert!(harness
            .reporter
            .activities()
            .contains(&(ACTIVITY_INSTALL.to_string(), TORCH_LINK.to_string())));
    }

    #[test]
    fn test_no_pytorch_dists_skips_install() {
        let mut harness = Harness::new(&[]);

        let outcome = harness
            .run(&skip_install_config(), &["light-the-torch"])
            .unwrap();

        assert_eq!(outcome, InstallOutcome::Skipped(SkipReason::NoPytorchDists));
        assert!(harness.resolver.calls().is_empty());
        assert!(harness.installer.installed().is_empty());
        assert_eq!(harness.probe.calls(), 0);
        assert!(harness.reporter.has(codes::NO_PYTORCH_DISTS));
    }

    #[test]
    fn test_disabled_skips_before_extraction() {
        let mut harness = Harness::new(&["torch"]);
        let mut config = EnvironmentConfig::new("py");
        config.disabled = true;
        config.force_cpu = true;
        config.extras = vec!["x".to_string()];

        let outcome = harness.run(&config, &["torch"]).unwrap();

        assert_eq!(outcome, InstallOutcome::Skipped(SkipReason::Disabled));
        assert!(harness.extractor.calls().is_empty());
        assert_eq!(harness.reporter.count(codes::DISABLED), 1);
        assert_eq!(
            harness.reporter.activities(),
            vec![(ACTIVITY_SKIP.to_string(), "skip".to_string())]
        );
    }

    #[test]
    fn test_isolated_build_env_does_nothing() {
        let mut harness = Harness::new(&["torch"]);
        let mut config = EnvironmentConfig::new(".package");
        config.is_isolated_build_env = true;
        config.force_cpu_legacy = true;

        let outcome = harness.run(&config, &["torch"]).unwrap();

        assert_eq!(outcome, InstallOutcome::Skipped(SkipReason::IsolatedBuildEnv));
        assert!(harness.extractor.calls().is_empty());
        assert!(harness.reporter.diagnostics().is_empty());
        assert!(harness.reporter.activities().is_empty());
    }

    #[test]
    fn test_no_requirements_skips_before_extraction() {
        let mut harness = Harness::new(&["torch"]);

        let outcome = harness.run(&skip_install_config(), &[]).unwrap();

        assert_eq!(outcome, InstallOutcome::Skipped(SkipReason::NoRequirements));
        assert!(harness.extractor.calls().is_empty());
    }

    #[test]
    fn test_package_target_is_scanned() {
        let mut harness = Harness::new(&["torch>=1.5.0", "torchvision>=0.6.0"]);
        let mut config = EnvironmentConfig::new("py");
        config.extras = vec!["x".to_string(), "y".to_string()];

        harness.run(&config, &[]).unwrap();

        let calls = harness.extractor.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], vec!["/src/foo/dist/foo-1.2.3.tar.gz[x,y]".to_string()]);

        let (dists, _) = &harness.resolver.calls()[0];
        assert_eq!(dists.as_slice(), &["torch>=1.5.0", "torchvision>=0.6.0"]);
    }

    #[test]
    fn test_force_cpu_passes_cpu_backend() {
        let mut harness = Harness::new(&["torch"]);
        let mut config = skip_install_config();
        config.force_cpu = true;

        harness.run(&config, &["torch"]).unwrap();

        let (_, options) = &harness.resolver.calls()[0];
        assert_eq!(options.backend, Some(ComputationBackend::Cpu));
        assert!(harness.reporter.has(codes::FORCED_CPU));
        assert_eq!(harness.reporter.count(codes::DEPRECATED_FORCE_CPU), 0);
    }

    #[test]
    fn test_legacy_force_cpu_warns_once() {
        let mut harness = Harness::new(&["torch"]);
        let mut config = skip_install_config();
        config.force_cpu_legacy = true;

        harness.run(&config, &["torch"]).unwrap();

        let (_, options) = &harness.resolver.calls()[0];
        assert_eq!(options.backend, Some(ComputationBackend::Cpu));
        assert_eq!(harness.reporter.count(codes::DEPRECATED_FORCE_CPU), 1);
    }

    #[test]
    fn test_channel_is_forwarded_unvalidated() {
        let mut harness = Harness::new(&["torch"]);
        let mut config = skip_install_config();
        config.channel = Channel::new("does-not-exist");

        harness.run(&config, &["torch"]).unwrap();

        let (_, options) = &harness.resolver.calls()[0];
        assert_eq!(options.channel.as_str(), "does-not-exist");
    }

    #[test]
    fn test_probe_failure_aborts() {
        let mut harness = Harness::new(&["torch"]);
        harness.probe = StubProbe::failing(|| ProbeError::UnrecognizedOutput {
            command: "python3 --version".to_string(),
            output: "garbage".to_string(),
        });

        let err = harness.run(&skip_install_config(), &["torch"]).unwrap_err();

        assert!(err.to_string().contains("Python version"));
        assert!(err.downcast_ref::<ProbeError>().is_some());
        assert!(harness.resolver.calls().is_empty());
        assert!(harness.installer.installed().is_empty());
    }

    #[test]
    fn test_resolver_failure_aborts() {
        let mut harness = Harness::new(&["torch"]);
        harness.resolver = StubLinkResolver::failing("no wheel for cp38");

        let err = harness.run(&skip_install_config(), &["torch"]).unwrap_err();

        assert!(err.to_string().contains("no wheel for cp38"));
        assert!(harness.installer.installed().is_empty());
    }

    #[test]
    fn test_no_links_is_an_error() {
        let mut harness = Harness::new(&["torch==1.5.0"]);
        harness.resolver = StubLinkResolver::returning(&[]);

        let err = harness.run(&skip_install_config(), &["torch"]).unwrap_err();

        assert!(err.to_string().contains("no install sources found for torch==1.5.0"));
        assert!(harness.installer.installed().is_empty());
        assert!(!harness
            .reporter
            .activities()
            .iter()
            .any(|(name, _)| name == ACTIVITY_INSTALL));
    }

    #[test]
    fn test_installer_failure_propagates() {
        let mut harness = Harness::new(&["torch"]);
        harness.installer = RecordingInstaller::failing("pip exploded");

        let err = harness.run(&skip_install_config(), &["torch"]).unwrap_err();

        assert!(err.to_string().contains("pip exploded"));
    }

    #[test]
    fn test_dry_run_does_not_install() {
        let mut harness = Harness::new(&["torch"]);

        let outcome = harness
            .run_with(
                &skip_install_config(),
                &["torch"],
                &InstallDepsOptions { dry_run: true },
            )
            .unwrap();

        assert!(matches!(outcome, InstallOutcome::Planned(_)));
        assert_eq!(outcome.plan().unwrap().sources(), &[TORCH_LINK]);
        assert!(harness.installer.installed().is_empty());
    }
}
