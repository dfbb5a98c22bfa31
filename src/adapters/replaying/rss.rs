//! Replaying adapter for the `RssApi` port.

use super::{next_output, replay_result};
use crate::cassette::config::SharedReplayer;
use crate::ports::{ApiFuture, RssApi};

/// Serves recorded RSS calls from a cassette.
pub struct ReplayingRssApi {
    replayer: Option<SharedReplayer>,
}

impl ReplayingRssApi {
    /// Create a replaying RSS API backed by the given replayer.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer: Some(replayer) }
    }

    /// Create a replaying RSS API with no cassette. Panics when called.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { replayer: None }
    }
}

impl RssApi for ReplayingRssApi {
    fn delete_subscription(&self, _id: i64) -> ApiFuture<'_, ()> {
        let output = next_output(self.replayer.as_ref(), "rss", "delete_subscription");
        Box::pin(async move { replay_result(output) })
    }
}
