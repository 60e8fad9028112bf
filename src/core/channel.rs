//! Release channels for PyTorch distributions.

use std::fmt;

/// Channel used when none is configured.
pub const DEFAULT_CHANNEL: &str = "stable";

/// A named release track (e.g. `stable`, `test`, `nightly`).
///
/// The value is passed through verbatim; whether the link resolver knows the
/// channel is its own business. A channel is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Channel(String);

impl Channel {
    /// Create a channel, falling back to [`DEFAULT_CHANNEL`] for blank input.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.trim().is_empty() {
            Channel::default()
        } else {
            Channel(name)
        }
    }

    /// Get the channel name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Channel {
    fn default() -> Self {
        Channel(DEFAULT_CHANNEL.to_string())
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Channel {
    fn from(s: &str) -> Self {
        Channel::new(s)
    }
}

impl From<String> for Channel {
    fn from(s: String) -> Self {
        Channel::new(s)
    }
}
