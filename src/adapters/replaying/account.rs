//! Replaying adapter for the `AccountApi` port.

use super::{next_output, replay_result};
use crate::cassette::config::SharedReplayer;
use crate::ports::{AccountApi, ApiFuture, DeleteAccountRequest};

/// Serves recorded account calls from a cassette.
pub struct ReplayingAccountApi {
    replayer: Option<SharedReplayer>,
}

impl ReplayingAccountApi {
    /// Create a replaying account API backed by the given replayer.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer: Some(replayer) }
    }

    /// Create a replaying account API with no cassette. Panics when called.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { replayer: None }
    }
}

impl AccountApi for ReplayingAccountApi {
    fn delete_account(&self, _user_id: i64, _request: &DeleteAccountRequest) -> ApiFuture<'_, ()> {
        let output = next_output(self.replayer.as_ref(), "account", "delete_account");
        Box::pin(async move { replay_result(output) })
    }
}
