//! Notification port for transient user-facing messages.

/// Handle to a pending loading notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoticeId(pub u64);

/// Presents transient messages (loading, success, error) to the user.
///
/// Injected into every controller that reports progress, so tests can
/// observe the exact sequence of notices.
pub trait Notifier: Send + Sync {
    /// Shows a loading notice that stays until dismissed.
    fn loading(&self, message: &str) -> NoticeId;

    /// Removes a loading notice.
    fn dismiss(&self, id: NoticeId);

    /// Shows a success message.
    fn success(&self, message: &str);

    /// Shows an error message.
    fn error(&self, message: &str);
}
