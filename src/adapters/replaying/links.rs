//! Replaying adapter for the `LinkApi` port.

use super::{next_output, replay_result};
use crate::cassette::config::SharedReplayer;
use crate::model::Link;
use crate::ports::{ApiFuture, LinkApi, LinkSort};

/// Serves recorded link fetches, updates, and searches from a cassette.
pub struct ReplayingLinkApi {
    replayer: Option<SharedReplayer>,
}

impl ReplayingLinkApi {
    /// Create a replaying link API backed by the given replayer.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer: Some(replayer) }
    }

    /// Create a replaying link API with no cassette. Panics when called.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { replayer: None }
    }
}

impl LinkApi for ReplayingLinkApi {
    fn fetch_link(&self, _id: i64) -> ApiFuture<'_, Link> {
        let output = next_output(self.replayer.as_ref(), "links", "fetch_link");
        Box::pin(async move { replay_result(output) })
    }

    fn update_link(&self, _link: &Link) -> ApiFuture<'_, Link> {
        let output = next_output(self.replayer.as_ref(), "links", "update_link");
        Box::pin(async move { replay_result(output) })
    }

    fn search_links(&self, _query: &str, _sort: LinkSort) -> ApiFuture<'_, Vec<Link>> {
        let output = next_output(self.replayer.as_ref(), "links", "search_links");
        Box::pin(async move { replay_result(output) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::testing::replayer;
    use crate::error::ApiError;
    use crate::model::fixtures::sample_link;
    use serde_json::json;

    #[tokio::test]
    async fn serves_fetches_then_failures_in_order() {
        let link = sample_link();
        let api = ReplayingLinkApi::new(replayer(&[
            ("links", "fetch_link", json!({"Ok": link})),
            ("links", "fetch_link", json!({"Err": {"NotFound": "Link not found."}})),
        ]));

        assert_eq!(api.fetch_link(1).await.unwrap(), link);
        assert_eq!(
            api.fetch_link(1).await.unwrap_err(),
            ApiError::NotFound("Link not found.".into())
        );
    }

    #[tokio::test]
    async fn serves_recorded_update() {
        let mut updated = sample_link();
        updated.name = "B".into();
        let api = ReplayingLinkApi::new(replayer(&[(
            "links",
            "update_link",
            json!({"Ok": updated}),
        )]));

        let result = api.update_link(&sample_link()).await.unwrap();
        assert_eq!(result.name, "B");
    }

    #[tokio::test]
    async fn serves_recorded_search() {
        let api = ReplayingLinkApi::new(replayer(&[
            ("links", "search_links", json!({"Ok": [sample_link()]})),
            ("links", "search_links", json!({"Ok": []})),
        ]));

        assert_eq!(api.search_links("a", LinkSort::default()).await.unwrap(), vec![sample_link()]);
        assert!(api.search_links("zz", LinkSort::NameZA).await.unwrap().is_empty());
    }
}
