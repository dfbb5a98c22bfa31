//! Recording adapter for the `LinkApi` port.

use std::sync::{Arc, Mutex};

use serde_json::json;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::model::Link;
use crate::ports::{ApiFuture, LinkApi, LinkSort};

/// Records link interactions while delegating to an inner implementation.
pub struct RecordingLinkApi {
    inner: Arc<dyn LinkApi>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingLinkApi {
    /// Wraps `inner`, appending every call to `recorder`.
    pub fn new(inner: Arc<dyn LinkApi>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl LinkApi for RecordingLinkApi {
    fn fetch_link(&self, id: i64) -> ApiFuture<'_, Link> {
        Box::pin(async move {
            let result = self.inner.fetch_link(id).await;
            record_result(&self.recorder, "links", "fetch_link", &json!({ "id": id }), &result);
            result
        })
    }

    fn update_link(&self, link: &Link) -> ApiFuture<'_, Link> {
        let link = link.clone();
        Box::pin(async move {
            let result = self.inner.update_link(&link).await;
            record_result(&self.recorder, "links", "update_link", &link, &result);
            result
        })
    }

    fn search_links(&self, query: &str, sort: LinkSort) -> ApiFuture<'_, Vec<Link>> {
        let query = query.to_string();
        Box::pin(async move {
            let result = self.inner.search_links(&query, sort).await;
            let input = json!({ "query": query, "sort": sort });
            record_result(&self.recorder, "links", "search_links", &input, &result);
            result
        })
    }
}
