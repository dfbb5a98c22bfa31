//! Link details controller: view/edit modes over a polled link.
//!
//! A mounted view owns one [`PollingScheduler`] and one [`DraftStore`].
//! Snapshots produced by the poll task travel over a channel and are
//! folded into the store by the view itself, so the store never leaves
//! its owner.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::context::ServiceContext;
use crate::draft::{ChangeSet, DraftStore, LinkPatch, SubmitOutcome};
use crate::error::ApiError;
use crate::model::{ArchivalPolicy, Link};
use crate::poll::{PollState, PollingScheduler};
use crate::ports::{LinkApi, Notifier};
use crate::readiness::{at_least_one_format_available, is_ready};
use crate::store::Directory;

/// Whether the user is looking at or editing the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Read-only display of the authoritative copy.
    #[default]
    View,
    /// Editing the draft.
    Edit,
}

/// A mounted link details view.
pub struct LinkView {
    mode: Mode,
    store: DraftStore,
    scheduler: PollingScheduler,
    snapshots: mpsc::UnboundedReceiver<Link>,
    links: Arc<dyn LinkApi>,
    notifier: Arc<dyn Notifier>,
    directory: Arc<Directory>,
}

impl LinkView {
    /// Mounts a view for `link` and starts readiness polling.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn mount(ctx: &ServiceContext, link: Link, mode: Mode) -> Self {
        let mut scheduler = PollingScheduler::new(Arc::clone(&ctx.links), ctx.poll);
        let policy = ctx.directory.archival_policy(link.collection_id);
        let snapshots = start_polling(&mut scheduler, link.id, policy);

        Self {
            mode,
            store: DraftStore::new(link),
            scheduler,
            snapshots,
            links: Arc::clone(&ctx.links),
            notifier: Arc::clone(&ctx.notifier),
            directory: Arc::clone(&ctx.directory),
        }
    }

    /// Fetches `id` once and mounts a view for it.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; a `NotFound` means there is nothing to show.
    pub async fn open(ctx: &ServiceContext, id: i64, mode: Mode) -> Result<Self, ApiError> {
        let link = ctx.links.fetch_link(id).await?;
        Ok(Self::mount(ctx, link, mode))
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// What the user sees: the draft while editing, the server copy otherwise.
    #[must_use]
    pub fn displayed(&self) -> &Link {
        match self.mode {
            Mode::View => self.store.authoritative(),
            Mode::Edit => self.store.draft(),
        }
    }

    /// The draft store, for inspection.
    #[must_use]
    pub fn store(&self) -> &DraftStore {
        &self.store
    }

    /// Policy of the link's current collection.
    #[must_use]
    pub fn policy(&self) -> ArchivalPolicy {
        self.directory.archival_policy(self.store.authoritative().collection_id)
    }

    /// Whether every required format of the server copy is processed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        is_ready(self.store.authoritative(), &self.policy())
    }

    /// Whether the preserved-formats pane has anything to show.
    #[must_use]
    pub fn has_preserved_formats(&self) -> bool {
        at_least_one_format_available(self.store.authoritative())
    }

    /// Readiness polling state.
    #[must_use]
    pub fn poll_state(&self) -> PollState {
        self.scheduler.state()
    }

    /// Switches to edit mode, keeping any edits made earlier.
    pub fn enter_edit(&mut self) {
        self.apply_pending();
        self.mode = Mode::Edit;
    }

    /// Switches to view mode without submitting.
    pub fn enter_view(&mut self) {
        self.mode = Mode::View;
    }

    /// Edits the draft, entering edit mode if needed.
    pub fn update_field(&mut self, patch: LinkPatch) {
        self.mode = Mode::Edit;
        self.store.update_field(patch);
    }

    /// Pending changes against the server copy.
    #[must_use]
    pub fn change_set(&self) -> ChangeSet {
        self.store.change_set()
    }

    /// Drops the draft and shows the server copy.
    pub fn discard(&mut self) {
        self.store.discard();
        self.mode = Mode::View;
    }

    /// Folds every snapshot the poll produced so far into the store.
    pub fn apply_pending(&mut self) {
        while let Ok(snapshot) = self.snapshots.try_recv() {
            self.store.refresh(snapshot);
        }
    }

    /// Waits for the next polled snapshot and folds it in.
    ///
    /// Returns `None` once polling has finished and every snapshot was seen.
    ///
    /// A snapshot older than the server copy is still returned but does
    /// not change the store.
    pub async fn next_snapshot(&mut self) -> Option<Link> {
        let snapshot = self.snapshots.recv().await?;
        self.store.refresh(snapshot.clone());
        Some(snapshot)
    }

    /// Submits the draft when it differs from the server copy.
    ///
    /// Successful updates show a success notice and return to view
    /// mode. Failures show the server's reason and stay in edit mode
    /// with the draft intact. Moving the link to another collection
    /// restarts polling under that collection's policy.
    ///
    /// # Errors
    ///
    /// Returns the update error unchanged.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, ApiError> {
        self.apply_pending();
        if self.store.change_set().is_empty() {
            debug!(link = self.store.authoritative().id, "nothing to submit");
            return self.store.submit(self.links.as_ref()).await;
        }

        let collection_before = self.store.authoritative().collection_id;
        let notice = self.notifier.loading("Updating...");
        let result = self.store.submit(self.links.as_ref()).await;
        self.notifier.dismiss(notice);

        match &result {
            Ok(outcome) => {
                self.notifier.success("Updated!");
                self.mode = Mode::View;
                if outcome.link().collection_id != collection_before {
                    self.restart_polling();
                }
            }
            Err(err) => self.notifier.error(err.reason()),
        }
        result
    }

    /// Tears the view down, cancelling any pending poll.
    pub fn unmount(mut self) {
        self.scheduler.stop();
    }

    fn restart_polling(&mut self) {
        let link_id = self.store.authoritative().id;
        let policy = self.policy();
        debug!(link = link_id, ?policy, "collection changed, restarting poll");
        self.snapshots = start_polling(&mut self.scheduler, link_id, policy);
    }
}

/// Starts `scheduler` and returns the channel its snapshots arrive on.
fn start_polling(
    scheduler: &mut PollingScheduler,
    link_id: i64,
    policy: ArchivalPolicy,
) -> mpsc::UnboundedReceiver<Link> {
    let (tx, snapshots) = mpsc::unbounded_channel();
    scheduler.start(link_id, policy, move |snapshot| {
        // The receiver is gone only once the view is torn down or restarted.
        let _ = tx.send(snapshot);
    });
    snapshots
}
