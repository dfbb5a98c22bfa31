//! Replaying adapters that serve recorded interactions.

pub mod account;
pub mod links;
pub mod rss;

use serde::de::DeserializeOwned;

use crate::cassette::config::SharedReplayer;
use crate::error::ApiError;

pub use account::ReplayingAccountApi;
pub use links::ReplayingLinkApi;
pub use rss::ReplayingRssApi;

/// Take the next recorded output for a port method.
///
/// # Panics
///
/// Panics when the port has no cassette or the cassette is exhausted.
pub(crate) fn next_output(
    replayer: Option<&SharedReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let Some(replayer) = replayer else {
        panic!("{port} port not configured in CassetteConfig: no cassette loaded for {port}");
    };
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_interaction(port, method).output
}

/// Decode a recorded `{"Ok": value}` / `{"Err": api_error}` output.
///
/// A bare string under `Err` is read as a network failure, which keeps
/// hand-written cassettes short.
///
/// # Panics
///
/// Panics when the output matches neither shape.
pub(crate) fn replay_result<T: DeserializeOwned>(output: serde_json::Value) -> Result<T, ApiError> {
    if let Some(err) = output.get("Err") {
        if let Some(msg) = err.as_str() {
            return Err(ApiError::Network(msg.to_string()));
        }
        let err: ApiError = serde_json::from_value(err.clone())
            .unwrap_or_else(|e| panic!("malformed recorded error {err}: {e}"));
        return Err(err);
    }
    let value = output
        .get("Ok")
        .cloned()
        .unwrap_or_else(|| panic!("recorded output has neither Ok nor Err: {output}"));
    Ok(serde_json::from_value(value).unwrap_or_else(|e| panic!("malformed recorded value: {e}")))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use chrono::Utc;
    use serde_json::json;

    use crate::cassette::config::SharedReplayer;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::cassette::replayer::CassetteReplayer;

    /// Builds a shared replayer from `(port, method, output)` triples.
    pub fn replayer(calls: &[(&str, &str, serde_json::Value)]) -> SharedReplayer {
        let interactions = calls
            .iter()
            .enumerate()
            .map(|(seq, (port, method, output))| Interaction {
                seq: seq as u64,
                port: (*port).into(),
                method: (*method).into(),
                input: json!({}),
                output: output.clone(),
            })
            .collect();
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            server: "http://localhost:3000".into(),
            interactions,
        };
        Arc::new(Mutex::new(CassetteReplayer::new(&cassette)))
    }
}
