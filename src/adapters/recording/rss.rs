//! Recording adapter for the `RssApi` port.

use std::sync::{Arc, Mutex};

use serde_json::json;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{ApiFuture, RssApi};

/// Records RSS interactions while delegating to an inner implementation.
pub struct RecordingRssApi {
    inner: Arc<dyn RssApi>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingRssApi {
    /// Wraps `inner`, appending every call to `recorder`.
    pub fn new(inner: Arc<dyn RssApi>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl RssApi for RecordingRssApi {
    fn delete_subscription(&self, id: i64) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            let result = self.inner.delete_subscription(id).await;
            let input = json!({ "id": id });
            record_result(&self.recorder, "rss", "delete_subscription", &input, &result);
            result
        })
    }
}
