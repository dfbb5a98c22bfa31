//! Terminal notifier for the CLI.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::ports::{NoticeId, Notifier};

/// Prints notices to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    next_id: AtomicU64,
}

impl ConsoleNotifier {
    /// Creates a console notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for ConsoleNotifier {
    fn loading(&self, message: &str) -> NoticeId {
        let id = NoticeId(self.next_id.fetch_add(1, Ordering::Relaxed));
        eprintln!("… {message}");
        id
    }

    fn dismiss(&self, id: NoticeId) {
        debug!(notice = id.0, "notice dismissed");
    }

    fn success(&self, message: &str) {
        eprintln!("✓ {message}");
    }

    fn error(&self, message: &str) {
        eprintln!("✗ {message}");
    }
}
