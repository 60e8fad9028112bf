//! PyTorch distribution filtering.

use anyhow::Result;

use crate::core::requirement::{strip_marker, DistributionSet, RequirementList};
use crate::host::DistributionExtractor;

/// Find the PyTorch distributions among `requirements`.
///
/// Environment markers are stripped from the extractor's specifiers and
/// duplicates collapsed. Extractor failures propagate.
pub fn filter_distributions(
    extractor: &dyn DistributionExtractor,
    requirements: &RequirementList,
) -> Result<DistributionSet> {
    let specifiers = extractor.extract_dists(requirements)?;

    let dists: DistributionSet = specifiers
        .iter()
        .map(|specifier| strip_marker(specifier))
        .filter(|dist| !dist.is_empty())
        .collect();

    tracing::debug!(
        "{} PyTorch distribution(s) among {} requirement(s)",
        dists.len(),
        requirements.len()
    );

    Ok(dists)
}
