//! RSS subscription port.

use super::ApiFuture;

/// Manages RSS subscriptions on the server.
pub trait RssApi: Send + Sync {
    /// Deletes a subscription.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the deletion or cannot be reached.
    fn delete_subscription(&self, id: i64) -> ApiFuture<'_, ()>;
}
