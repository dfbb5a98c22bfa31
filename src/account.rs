//! Account deletion flow.

use tracing::info;

use crate::context::ServiceContext;
use crate::error::ApiError;
use crate::ports::{CancellationDetails, DeleteAccountRequest};

/// Message shown when the password confirmation is missing.
pub const MISSING_FIELDS: &str = "Please fill out all the required fields.";

/// What the caller should do after a successful deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountDeletion {
    /// The account is gone; the session must be ended.
    SignedOut,
}

/// Deletes `user_id` after confirming with `password`.
///
/// Comment and feedback are optional cancellation details forwarded as-is.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] without contacting the server when the
/// password is empty, otherwise the server's error.
pub async fn delete_account(
    ctx: &ServiceContext,
    user_id: i64,
    password: &str,
    comment: Option<String>,
    feedback: Option<String>,
) -> Result<AccountDeletion, ApiError> {
    if password.is_empty() {
        ctx.notifier.error(MISSING_FIELDS);
        return Err(ApiError::Validation(MISSING_FIELDS.into()));
    }

    let request = DeleteAccountRequest {
        password: password.to_string(),
        cancellation_details: CancellationDetails { comment, feedback },
    };

    let notice = ctx.notifier.loading("Deleting...");
    let result = ctx.account.delete_account(user_id, &request).await;
    ctx.notifier.dismiss(notice);

    match result {
        Ok(()) => {
            info!(user = user_id, "account deleted");
            Ok(AccountDeletion::SignedOut)
        }
        Err(err) => {
            ctx.notifier.error(err.reason());
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::adapters::memory::{MemoryNotifier, Notice};
    use crate::adapters::replaying::testing::replayer;
    use crate::adapters::replaying::ReplayingAccountApi;
    use crate::cassette::config::CassetteConfig;
    use crate::ports::NoticeId;

    fn context(notifier: Arc<MemoryNotifier>) -> ServiceContext {
        ServiceContext::replaying_from(&CassetteConfig::default(), notifier).unwrap()
    }

    #[tokio::test]
    async fn empty_password_is_rejected_locally() {
        let notifier = Arc::new(MemoryNotifier::new());
        let ctx = context(Arc::clone(&notifier));

        let err = delete_account(&ctx, 1, "", None, None).await.unwrap_err();

        assert_eq!(err, ApiError::Validation(MISSING_FIELDS.into()));
        assert_eq!(notifier.notices(), vec![Notice::Error(MISSING_FIELDS.into())]);
    }

    #[tokio::test]
    async fn success_signs_out() {
        let notifier = Arc::new(MemoryNotifier::new());
        let mut ctx = context(Arc::clone(&notifier));
        ctx.account = Arc::new(ReplayingAccountApi::new(replayer(&[(
            "account",
            "delete_account",
            json!({"Ok": null}),
        )])));

        let outcome =
            delete_account(&ctx, 1, "hunter2", Some("bye".into()), None).await.unwrap();

        assert_eq!(outcome, AccountDeletion::SignedOut);
        assert_eq!(
            notifier.notices(),
            vec![Notice::Loading(NoticeId(0), "Deleting...".into()), Notice::Dismissed(NoticeId(0))]
        );
    }

    #[tokio::test]
    async fn wrong_password_shows_server_message() {
        let notifier = Arc::new(MemoryNotifier::new());
        let mut ctx = context(Arc::clone(&notifier));
        ctx.account = Arc::new(ReplayingAccountApi::new(replayer(&[(
            "account",
            "delete_account",
            json!({"Err": {"Unauthorized": "Invalid credentials."}}),
        )])));

        let err = delete_account(&ctx, 1, "wrong", None, None).await.unwrap_err();

        assert_eq!(err, ApiError::Unauthorized("Invalid credentials.".into()));
        assert!(notifier.pending().is_empty());
        assert_eq!(notifier.notices().last(), Some(&Notice::Error("Invalid credentials.".into())));
    }
}
