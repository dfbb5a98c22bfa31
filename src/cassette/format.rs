//! Cassette data structures for recording and replaying interactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded call to one of the API ports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name (`links`, `account`, `rss`).
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Arguments sent to the port.
    pub input: serde_json::Value,
    /// `{"Ok": value}` or `{"Err": api_error}`.
    pub output: serde_json::Value,
}

/// A named sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Base URL of the server the interactions were captured from.
    pub server: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Reads a cassette from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::Cassette(format!("failed to read {}: {e}", path.display()))
        })?;
        serde_yaml::from_str(&content)
            .map_err(|e| crate::Error::Cassette(format!("failed to parse {}: {e}", path.display())))
    }
}
