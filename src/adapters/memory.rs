//! In-memory notifier that keeps every notice for later inspection.

use std::sync::Mutex;

use crate::ports::{NoticeId, Notifier};

/// A notice as it was presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Loading notice with its handle.
    Loading(NoticeId, String),
    /// A loading notice was removed.
    Dismissed(NoticeId),
    /// Success message.
    Success(String),
    /// Error message.
    Error(String),
}

/// Collects notices instead of showing them.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotifier {
    /// Creates an empty notice log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notice so far, oldest first.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notice log lock poisoned").clone()
    }

    /// Loading notices that were never dismissed.
    #[must_use]
    pub fn pending(&self) -> Vec<NoticeId> {
        let notices = self.notices();
        notices
            .iter()
            .filter_map(|n| match n {
                Notice::Loading(id, _) if !notices.contains(&Notice::Dismissed(*id)) => Some(*id),
                _ => None,
            })
            .collect()
    }

    fn push(&self, notice: Notice) {
        self.notices.lock().expect("notice log lock poisoned").push(notice);
    }
}

impl Notifier for MemoryNotifier {
    fn loading(&self, message: &str) -> NoticeId {
        let mut notices = self.notices.lock().expect("notice log lock poisoned");
        let next = notices.iter().filter(|n| matches!(n, Notice::Loading(..))).count();
        let id = NoticeId(next as u64);
        notices.push(Notice::Loading(id, message.to_string()));
        id
    }

    fn dismiss(&self, id: NoticeId) {
        self.push(Notice::Dismissed(id));
    }

    fn success(&self, message: &str) {
        self.push(Notice::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(Notice::Error(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_undismissed_loading_notices() {
        let notifier = MemoryNotifier::new();
        let first = notifier.loading("Updating...");
        let second = notifier.loading("Deleting...");
        notifier.dismiss(first);
        notifier.success("Updated!");

        assert_eq!(notifier.pending(), vec![second]);
        assert_eq!(notifier.notices().last(), Some(&Notice::Success("Updated!".into())));
    }
}
