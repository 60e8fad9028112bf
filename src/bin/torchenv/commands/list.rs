//! `torchenv list` command

use anyhow::Result;

use torchenv::core::Manifest;
use torchenv::util::{GlobalContext, Shell};

pub fn execute(shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let manifest_path = ctx.find_manifest()?;
    let manifest = Manifest::load(&manifest_path)?;

    let mut names = manifest.env_names();
    let isolated = &manifest.settings.isolated_build_env;
    if manifest.settings.isolated_build && !names.contains(isolated) {
        names.push(isolated.clone());
    }

    if shell.is_json() {
        let envs: Vec<_> = names
            .iter()
            .map(|name| {
                serde_json::json!({
                    "name": name,
                    "isolated_build": manifest.is_isolated_build_env(name),
                })
            })
            .collect();
        shell.json_event(&serde_json::json!({
            "reason": "environments",
            "environments": envs,
        }));
        return Ok(());
    }

    for name in &names {
        if manifest.is_isolated_build_env(name) {
            println!("{} (isolated build)", name);
        } else {
            println!("{}", name);
        }
    }

    Ok(())
}
