//! Requirement set building.

use crate::core::environment::{EnvironmentConfig, EnvironmentInputs};
use crate::core::requirement::{extras_suffix, RequirementList};

/// Build the requirements to scan for PyTorch distributions.
///
/// The host's dependency names come first, followed by the environment's
/// own package unless `skip_install` is set. In develop mode the package is
/// referenced by its source directory, otherwise by the built artifact.
pub fn build_requirements(inputs: &EnvironmentInputs, config: &EnvironmentConfig) -> RequirementList {
    let mut requirements = RequirementList::new();
    for dep in &inputs.dependencies {
        requirements.push(dep.clone());
    }

    if config.skip_install {
        return requirements;
    }

    let target = if config.use_develop {
        &inputs.setup_source_dir
    } else {
        &inputs.package_artifact
    };

    let mut target = target.display().to_string();
    if !config.extras.is_empty() {
        target.push_str(&extras_suffix(&config.extras));
    }
    requirements.push(target);

    requirements
}
