//! Error types shared by the ports, the controllers, and the CLI.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias for crate-level operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure reported by one of the remote API ports.
///
/// Serializable so that recorded cassettes can carry the exact failure
/// kind across a replay.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ApiError {
    /// The requested entity does not exist (anymore).
    #[error("not found: {0}")]
    NotFound(String),
    /// Transport failure or server-side error; worth retrying later.
    #[error("network error: {0}")]
    Network(String),
    /// Missing or rejected credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// The server refused the payload.
    #[error("validation failed: {0}")]
    Validation(String),
    /// The server holds a conflicting version of the resource.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl ApiError {
    /// Whether the failure may clear up on its own.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// The human-readable reason without the kind prefix.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::NotFound(msg)
            | Self::Network(msg)
            | Self::Unauthorized(msg)
            | Self::Validation(msg)
            | Self::Conflict(msg) => msg,
        }
    }
}

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A remote call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Invalid or missing configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Local I/O failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A cassette could not be read, parsed, or written.
    #[error("cassette error: {0}")]
    Cassette(String),

    /// Command-line arguments did not parse.
    #[error(transparent)]
    Usage(#[from] clap::Error),
}
