//! RSS subscription deletion flow.

use tracing::info;

use crate::context::ServiceContext;
use crate::error::ApiError;

/// Deletes subscription `id`, reporting progress through the notifier.
///
/// # Errors
///
/// Returns the server's error after showing it as a notice.
pub async fn delete_subscription(ctx: &ServiceContext, id: i64) -> Result<(), ApiError> {
    let notice = ctx.notifier.loading("Deleting...");
    let result = ctx.rss.delete_subscription(id).await;
    ctx.notifier.dismiss(notice);

    match &result {
        Ok(()) => {
            info!(subscription = id, "rss subscription deleted");
            ctx.notifier.success("RSS subscription deleted");
        }
        Err(err) => ctx.notifier.error(err.reason()),
    }
    result
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::adapters::memory::{MemoryNotifier, Notice};
    use crate::adapters::replaying::testing::replayer;
    use crate::adapters::replaying::ReplayingRssApi;
    use crate::cassette::config::CassetteConfig;
    use crate::ports::NoticeId;

    fn context(notifier: Arc<MemoryNotifier>, output: serde_json::Value) -> ServiceContext {
        let mut ctx = ServiceContext::replaying_from(&CassetteConfig::default(), notifier).unwrap();
        let calls = [("rss", "delete_subscription", output)];
        ctx.rss = Arc::new(ReplayingRssApi::new(replayer(&calls)));
        ctx
    }

    #[tokio::test]
    async fn success_notice_after_dismissing_loader() {
        let notifier = Arc::new(MemoryNotifier::new());
        let ctx = context(Arc::clone(&notifier), json!({"Ok": null}));

        delete_subscription(&ctx, 7).await.unwrap();

        assert_eq!(
            notifier.notices(),
            vec![
                Notice::Loading(NoticeId(0), "Deleting...".into()),
                Notice::Dismissed(NoticeId(0)),
                Notice::Success("RSS subscription deleted".into()),
            ]
        );
    }

    #[tokio::test]
    async fn failure_reports_reason() {
        let notifier = Arc::new(MemoryNotifier::new());
        let output = json!({"Err": {"NotFound": "Subscription not found."}});
        let ctx = context(Arc::clone(&notifier), output);

        let err = delete_subscription(&ctx, 7).await.unwrap_err();

        assert_eq!(err, ApiError::NotFound("Subscription not found.".into()));
        assert!(notifier.pending().is_empty());
        assert_eq!(
            notifier.notices().last(),
            Some(&Notice::Error("Subscription not found.".into()))
        );
    }
}
