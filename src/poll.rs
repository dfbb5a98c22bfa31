//! Readiness polling for a mounted link view.
//!
//! One scheduler per view. It fetches the link right away, hands every
//! snapshot to the view, and keeps fetching at a fixed interval until the
//! archival formats required by the collection are all processed. At most
//! one poll task (and so one pending timer) exists per scheduler; starting
//! again or stopping aborts it first.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::PollConfig;
use crate::model::{ArchivalPolicy, Link};
use crate::ports::LinkApi;
use crate::readiness::is_ready;

/// Whether a scheduler is still waiting for readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// A poll task is live.
    Polling,
    /// Nothing scheduled: ready, stopped, out of attempts, or never started.
    Idle,
}

#[derive(Debug)]
struct Shared {
    /// Bumped by every `start`/`stop`; a task only reports on its own run.
    generation: u64,
    state: PollState,
}

/// Fetches a link repeatedly until it is ready.
pub struct PollingScheduler {
    api: Arc<dyn LinkApi>,
    config: PollConfig,
    shared: Arc<Mutex<Shared>>,
    handle: Option<JoinHandle<()>>,
}

impl PollingScheduler {
    /// Creates an idle scheduler.
    #[must_use]
    pub fn new(api: Arc<dyn LinkApi>, config: PollConfig) -> Self {
        Self {
            api,
            config,
            shared: Arc::new(Mutex::new(Shared { generation: 0, state: PollState::Idle })),
            handle: None,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> PollState {
        self.shared().state
    }

    /// Starts polling `link_id`, replacing any poll already running.
    ///
    /// The first fetch happens immediately. `on_snapshot` receives every
    /// successfully fetched copy, including the one that turns out ready.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn start<F>(&mut self, link_id: i64, policy: ArchivalPolicy, on_snapshot: F)
    where
        F: FnMut(Link) + Send + 'static,
    {
        self.abort_task();
        let generation = {
            let mut shared = self.shared();
            shared.generation += 1;
            shared.state = PollState::Polling;
            shared.generation
        };

        let api = Arc::clone(&self.api);
        let shared = Arc::clone(&self.shared);
        let config = self.config;
        debug!(link = link_id, generation, "poll started");
        self.handle = Some(tokio::spawn(async move {
            poll_until_ready(api.as_ref(), link_id, policy, config, on_snapshot).await;
            let mut current = lock(&shared);
            if current.generation == generation {
                current.state = PollState::Idle;
            }
        }));
    }

    /// Cancels the pending fetch or timer. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if self.abort_task() {
            debug!("poll stopped");
        }
        let mut shared = self.shared();
        shared.generation += 1;
        shared.state = PollState::Idle;
    }

    fn shared(&self) -> MutexGuard<'_, Shared> {
        lock(&self.shared)
    }

    /// Aborts the live task, if any. Returns whether there was one.
    fn abort_task(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().expect("poll state lock poisoned")
}

impl Drop for PollingScheduler {
    fn drop(&mut self) {
        self.abort_task();
    }
}

async fn poll_until_ready<F>(
    api: &dyn LinkApi,
    link_id: i64,
    policy: ArchivalPolicy,
    config: PollConfig,
    mut on_snapshot: F,
) where
    F: FnMut(Link),
{
    let mut attempts: u32 = 0;
    loop {
        attempts += 1;
        match api.fetch_link(link_id).await {
            Ok(link) => {
                let ready = is_ready(&link, &policy);
                on_snapshot(link);
                if ready {
                    info!(link = link_id, attempts, "link ready");
                    return;
                }
            }
            // A failed fetch only means we do not know yet.
            Err(err) if err.is_transient() => {
                debug!(link = link_id, attempts, error = %err, "readiness fetch failed");
            }
            Err(err) => warn!(link = link_id, attempts, error = %err, "readiness fetch rejected"),
        }

        if config.max_attempts.is_some_and(|max| attempts >= max) {
            warn!(link = link_id, attempts, "giving up on readiness polling");
            return;
        }
        tokio::time::sleep(config.interval).await;
    }
}
