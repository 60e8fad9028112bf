//! Requirement lists and PyTorch distribution sets.

use std::fmt;

/// Ordered requirement strings handed to the distribution extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementList {
    requirements: Vec<String>,
}

impl RequirementList {
    /// Create an empty requirement list.
    pub fn new() -> Self {
        RequirementList {
            requirements: Vec::new(),
        }
    }

    /// Append a requirement.
    pub fn push(&mut self, requirement: impl Into<String>) {
        self.requirements.push(requirement.into());
    }

    /// Get the requirements in order.
    pub fn as_slice(&self) -> &[String] {
        &self.requirements
    }

    /// Iterate over the requirements.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.requirements.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

impl From<Vec<String>> for RequirementList {
    fn from(requirements: Vec<String>) -> Self {
        RequirementList { requirements }
    }
}

/// Canonical PyTorch distribution identifiers (name plus version constraint).
///
/// Members are unique and keep the order in which they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistributionSet {
    dists: Vec<String>,
}

impl DistributionSet {
    /// Create an empty distribution set.
    pub fn new() -> Self {
        DistributionSet { dists: Vec::new() }
    }

    /// Insert a distribution, returning `false` if it was already present.
    pub fn insert(&mut self, dist: impl Into<String>) -> bool {
        let dist = dist.into();
        if self.dists.contains(&dist) {
            return false;
        }
        self.dists.push(dist);
        true
    }

    /// Iterate over the distributions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.dists.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.dists
    }

    pub fn len(&self) -> usize {
        self.dists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dists.is_empty()
    }
}

impl fmt::Display for DistributionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dists.join(", "))
    }
}

impl<S: Into<String>> FromIterator<S> for DistributionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = DistributionSet::new();
        for dist in iter {
            set.insert(dist);
        }
        set
    }
}

/// Strip an environment marker (`; python_version < "3.8"`, `; extra == 'x'`)
/// from a distribution specifier.
///
/// Everything from the first `;` on is dropped, along with the whitespace
/// separating it from the specifier.
pub fn strip_marker(specifier: &str) -> &str {
    match specifier.split_once(';') {
        Some((head, _)) => head.trim_end(),
        None => specifier.trim_end(),
    }
}

/// Format an extras suffix: `["x", "y"]` -> `[x,y]`.
pub fn extras_suffix(extras: &[String]) -> String {
    format!("[{}]", extras.join(","))
}
