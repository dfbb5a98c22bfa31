//! Recording adapter for the `AccountApi` port.

use std::sync::{Arc, Mutex};

use serde_json::json;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{AccountApi, ApiFuture, DeleteAccountRequest};

/// Records account interactions while delegating to an inner implementation.
///
/// The recorder masks the password before it reaches the cassette.
pub struct RecordingAccountApi {
    inner: Arc<dyn AccountApi>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingAccountApi {
    /// Wraps `inner`, appending every call to `recorder`.
    pub fn new(inner: Arc<dyn AccountApi>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl AccountApi for RecordingAccountApi {
    fn delete_account(&self, user_id: i64, request: &DeleteAccountRequest) -> ApiFuture<'_, ()> {
        let request = request.clone();
        Box::pin(async move {
            let result = self.inner.delete_account(user_id, &request).await;
            let input = json!({ "user_id": user_id, "request": request });
            record_result(&self.recorder, "account", "delete_account", &input, &result);
            result
        })
    }
}
