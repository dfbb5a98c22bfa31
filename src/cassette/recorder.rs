//! Captures port calls for one cassette file.
//!
//! Inputs are stored with credentials masked: any object key named in
//! [`SECRET_KEYS`] has its value replaced by [`REDACTED`] at every depth.
//! Outputs are stored as-is.

use std::path::PathBuf;

use chrono::Utc;
use serde_json::Value;
use tracing::trace;

use super::format::{Cassette, Interaction};
use crate::error::{Error, Result};

/// Input keys whose values never reach a cassette.
pub const SECRET_KEYS: [&str; 2] = ["password", "token"];

/// Placeholder written in place of a secret.
pub const REDACTED: &str = "[redacted]";

/// Builds up one port's cassette in memory until [`finish`](Self::finish).
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    server: String,
    interactions: Vec<Interaction>,
}

impl CassetteRecorder {
    /// A recorder for the cassette at `path`, captured from `server`.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        server: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            server: server.into(),
            interactions: Vec::new(),
        }
    }

    /// Appends a call. Sequence numbers follow call order.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        mut input: Value,
        output: Value,
    ) {
        redact(&mut input);
        let interaction = Interaction {
            seq: self.interactions.len() as u64,
            port: port.into(),
            method: method.into(),
            input,
            output,
        };
        trace!(
            seq = interaction.seq,
            port = %interaction.port,
            method = %interaction.method,
            "interaction recorded"
        );
        self.interactions.push(interaction);
    }

    /// Calls captured so far.
    #[must_use]
    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    /// Number of calls captured so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    /// Writes the cassette, creating its directory if needed, and
    /// returns the file path.
    ///
    /// # Errors
    ///
    /// Returns `Cassette` if the recording cannot be serialized and `Io`
    /// if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf> {
        let cassette = Cassette {
            name: self.name,
            recorded_at: Utc::now(),
            server: self.server,
            interactions: self.interactions,
        };
        let yaml = serde_yaml::to_string(&cassette)
            .map_err(|e| Error::Cassette(format!("failed to encode {}: {e}", cassette.name)))?;
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }
}

/// Masks every secret in `value`, recursing into arrays and objects.
fn redact(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                if SECRET_KEYS.contains(&key.as_str()) {
                    *field = Value::String(REDACTED.to_string());
                } else {
                    redact(field);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact),
        _ => {}
    }
}
