//! `torchenv install-deps` command

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, InstallDepsArgs};
use torchenv::core::{EnvironmentInputs, Manifest};
use torchenv::host::{LttCli, PipInstaller, SubprocessProbe};
use torchenv::ops::{install_deps, Collaborators, InstallDepsOptions, InstallOutcome};
use torchenv::util::shell::{Shell, Status};
use torchenv::util::GlobalContext;

pub fn execute(args: InstallDepsArgs, global: &GlobalArgs, mut shell: Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let manifest_path = ctx.find_manifest()?;
    let manifest = Manifest::load(&manifest_path)?;
    let project_root = manifest_path
        .parent()
        .context("manifest path has no parent directory")?
        .to_path_buf();

    let config = ctx.load_config(&project_root);
    let env_config = manifest.environment_config(&args.env, &config)?;

    let dependencies = manifest
        .env(&args.env)
        .map(|section| section.deps.clone())
        .unwrap_or_default();
    let package_artifact = args
        .package
        .map(|path| ctx.cwd().join(path))
        .unwrap_or_else(|| project_root.clone());
    let inputs = EnvironmentInputs::new(dependencies, &project_root, package_artifact);

    let ltt = LttCli::new(config.ltt_command(global.ltt.as_deref())).with_cwd(&project_root);
    let probe = SubprocessProbe;
    let mut installer = PipInstaller::new(env_config.interpreter.clone()).with_cwd(&project_root);

    let outcome = install_deps(
        &env_config,
        &inputs,
        Collaborators {
            extractor: &ltt,
            resolver: &ltt,
            probe: &probe,
            installer: &mut installer,
            reporter: &mut shell,
        },
        &InstallDepsOptions {
            dry_run: args.dry_run,
        },
    )?;

    report(&shell, &args.env, &outcome);
    Ok(())
}

fn report(shell: &Shell, env: &str, outcome: &InstallOutcome) {
    if shell.is_json() {
        let event = match outcome {
            InstallOutcome::Skipped(reason) => serde_json::json!({
                "reason": "skipped",
                "env": env,
                "message": reason.to_string(),
            }),
            InstallOutcome::Planned(plan) => serde_json::json!({
                "reason": "planned",
                "env": env,
                "plan": plan,
            }),
            InstallOutcome::Installed(plan) => serde_json::json!({
                "reason": "installed",
                "env": env,
                "plan": plan,
            }),
        };
        shell.json_event(&event);
        return;
    }

    match outcome {
        InstallOutcome::Skipped(reason) => {
            shell.status(Status::Skipped, format!("{} ({})", env, reason));
        }
        InstallOutcome::Planned(plan) => {
            shell.status(
                Status::Planned,
                format!("{} source(s) for {}", plan.len(), env),
            );
            for source in plan.sources() {
                println!("{}", source);
            }
        }
        InstallOutcome::Installed(plan) => {
            shell.status(
                Status::Installed,
                format!("{} source(s) into {}", plan.len(), env),
            );
        }
    }
}
