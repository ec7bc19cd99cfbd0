//! Error types for deskwall.
//!
//! This module provides the unified error type used throughout the crate.
//! Range checks are the only errors raised locally; service failures are
//! wrapped without reinterpretation.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

use crate::config::ConfigError;
use crate::service::ServiceError;

/// Errors that can occur during application execution.
#[derive(Debug, Error)]
pub enum DeskwallError {
    /// The monitor index is outside `[0, count)`.
    #[error("Monitor index {index} is out of range ({count} monitor(s) connected)")]
    IndexOutOfRange { index: i64, count: u32 },
    /// The desktop wallpaper service reported a failure.
    #[error(transparent)]
    Service(#[from] ServiceError),
    /// An aspect ratio term was zero.
    #[error("Cannot compute aspect ratio of {width}:{height}: terms must be non-zero")]
    AspectRatio { width: u32, height: u32 },
    /// Invalid command arguments.
    #[error("{0}")]
    InvalidArguments(String),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// IO error.
    #[error("IO error: {0}")]
    IoError(String),
    /// Generic command error.
    #[error("{0}")]
    CommandError(String),
}

impl DeskwallError {
    /// Stable name of the variant, used as the `kind` field in JSON output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::IndexOutOfRange { .. } => "IndexOutOfRange",
            Self::Service(_) => "ServiceError",
            Self::AspectRatio { .. } => "AspectRatio",
            Self::InvalidArguments(_) => "InvalidArguments",
            Self::ConfigError(_) => "ConfigError",
            Self::IoError(_) => "IoError",
            Self::CommandError(_) => "CommandError",
        }
    }
}

impl Serialize for DeskwallError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DeskwallError", 2)?;
        state.serialize_field("kind", self.kind())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

impl From<std::io::Error> for DeskwallError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err.to_string()) }
}

impl From<serde_json::Error> for DeskwallError {
    fn from(err: serde_json::Error) -> Self { Self::CommandError(err.to_string()) }
}

impl From<ConfigError> for DeskwallError {
    fn from(err: ConfigError) -> Self { Self::ConfigError(err.to_string()) }
}

impl From<String> for DeskwallError {
    fn from(msg: String) -> Self { Self::CommandError(msg) }
}

impl From<&str> for DeskwallError {
    fn from(msg: &str) -> Self { Self::CommandError(msg.to_string()) }
}
