//! Core data structures for torchenv.
//!
//! This module contains the foundational types used throughout torchenv:
//! - Environment configuration and inputs
//! - Requirements and PyTorch distribution sets
//! - Channels and computation backends
//! - The manifest and its attribute registry

pub mod attributes;
pub mod backend;
pub mod channel;
pub mod environment;
pub mod manifest;
pub mod plan;
pub mod requirement;

pub use backend::ComputationBackend;
pub use channel::Channel;
pub use environment::{EnvironmentConfig, EnvironmentInputs};
pub use manifest::{find_manifest, Manifest, ManifestError, MANIFEST_NAME};
pub use plan::InstallPlan;
pub use requirement::{DistributionSet, RequirementList};
