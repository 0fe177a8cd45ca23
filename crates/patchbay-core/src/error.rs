//! Error types for the Patchbay framework.

use std::fmt;

/// Errors that can occur in Patchbay plugins.
///
/// Native hosts have no error channel, so these never cross the ABI. The
/// wrapper logs them and hands the host a null handle or pointer instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginError {
    /// Plugin initialization failed.
    InitializationFailed(String),
    /// Static plugin metadata is unusable (empty name, interior NUL, ...).
    InvalidConfig(String),
    /// The host handed us something we cannot work with.
    HostError(String),
}

impl fmt::Display for PluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Self::InvalidConfig(msg) => write!(f, "Invalid plugin config: {}", msg),
            Self::HostError(msg) => write!(f, "Host error: {}", msg),
        }
    }
}

impl std::error::Error for PluginError {}

/// Result type for Patchbay operations.
pub type PluginResult<T> = Result<T, PluginError>;
