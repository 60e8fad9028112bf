//! Environment attributes added by torchenv.
//!
//! These are the per-environment settings torchenv contributes on top of the
//! host's own environment schema. `torchenv help-ini` prints this table.

use std::fmt;

/// Value type of an environment attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    Bool,
    String,
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::Bool => write!(f, "bool"),
            AttributeType::String => write!(f, "string"),
        }
    }
}

/// A registered environment attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvAttribute {
    pub name: &'static str,
    pub kind: AttributeType,
    pub default: &'static str,
    pub help: &'static str,
    /// Name of the attribute replacing this one, if deprecated
    pub deprecated_by: Option<&'static str>,
}

pub const DISABLE_LIGHT_THE_TORCH: &str = "disable_light_the_torch";
pub const PYTORCH_FORCE_CPU: &str = "pytorch_force_cpu";
pub const FORCE_CPU: &str = "force_cpu";
pub const PYTORCH_CHANNEL: &str = "pytorch_channel";

/// All attributes, in registration order.
pub const ATTRIBUTES: &[EnvAttribute] = &[
    EnvAttribute {
        name: DISABLE_LIGHT_THE_TORCH,
        kind: AttributeType::Bool,
        default: "false",
        help: "disable installing PyTorch distributions with light-the-torch",
        deprecated_by: None,
    },
    EnvAttribute {
        name: PYTORCH_FORCE_CPU,
        kind: AttributeType::Bool,
        default: "false",
        help: "disable the computation backend detection and use the CPU backend",
        deprecated_by: None,
    },
    EnvAttribute {
        name: FORCE_CPU,
        kind: AttributeType::Bool,
        default: "false",
        help: "disable the computation backend detection and use the CPU backend",
        deprecated_by: Some(PYTORCH_FORCE_CPU),
    },
    EnvAttribute {
        name: PYTORCH_CHANNEL,
        kind: AttributeType::String,
        default: crate::core::channel::DEFAULT_CHANNEL,
        help: "channel to download the PyTorch distributions from, e.g. 'stable' or 'nightly'",
        deprecated_by: None,
    },
];

/// Render the attribute table in `--help-ini` style.
pub fn format_help() -> String {
    let width = ATTRIBUTES.iter().map(|a| a.name.len()).max().unwrap_or(0);
    let mut output = String::from("torchenv environment settings:\n");
    for attr in ATTRIBUTES {
        output.push_str(&format!(
            "{:<width$} <{}>   (default: {}) {}\n",
            attr.name,
            attr.kind,
            attr.default,
            attr.help,
            width = width
        ));
        if let Some(replacement) = attr.deprecated_by {
            output.push_str(&format!(
                "{:<width$} deprecated, use '{}' instead\n",
                "",
                replacement,
                width = width
            ));
        }
    }
    output
}
