//! Recording adapters that capture interactions to cassettes.

pub mod account;
pub mod links;
pub mod rss;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;
use crate::error::ApiError;

pub use account::RecordingAccountApi;
pub use links::RecordingLinkApi;
pub use rss::RecordingRssApi;

/// Record a port call and its `Result`.
///
/// Mirror of `replaying::replay_result`: `Ok(v)` is stored as
/// `{"Ok": v}` and `Err(e)` as `{"Err": e}` with the error kind intact.
pub(crate) fn record_result<T, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, ApiError>,
) where
    T: Serialize,
    I: Serialize,
{
    let input_json = serde_json::to_value(input).expect("failed to serialize recording input");
    let output_json = match result {
        Ok(v) => {
            let inner = serde_json::to_value(v).expect("failed to serialize Ok value");
            serde_json::json!({ "Ok": inner })
        }
        Err(e) => {
            let inner = serde_json::to_value(e).expect("failed to serialize Err value");
            serde_json::json!({ "Err": inner })
        }
    };

    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(port, method, input_json, output_json);
}
