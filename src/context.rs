//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::adapters::live::{ConsoleNotifier, LinkwardenClient};
use crate::adapters::recording::{RecordingAccountApi, RecordingLinkApi, RecordingRssApi};
use crate::adapters::replaying::{ReplayingAccountApi, ReplayingLinkApi, ReplayingRssApi};
use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::config::{Config, PollConfig};
use crate::error::Result;
use crate::ports::{AccountApi, LinkApi, Notifier, RssApi};
use crate::store::Directory;

/// Bundles the ports and shared state handed to every controller.
///
/// Constructors wire up different adapter implementations (live,
/// recording, replaying). Fields are public so tests can swap a single
/// port.
pub struct ServiceContext {
    /// Link retrieval and update.
    pub links: Arc<dyn LinkApi>,
    /// Account management.
    pub account: Arc<dyn AccountApi>,
    /// RSS subscription management.
    pub rss: Arc<dyn RssApi>,
    /// User-facing notices.
    pub notifier: Arc<dyn Notifier>,
    /// Collections and tags referenced by links.
    pub directory: Arc<Directory>,
    /// Readiness polling cadence.
    pub poll: PollConfig,
}

impl ServiceContext {
    /// Creates a live context talking to the configured server.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn live(config: &Config) -> Result<Self> {
        let directory = Arc::new(Directory::new());
        let client = Arc::new(LinkwardenClient::new(config, Arc::clone(&directory))?);
        Ok(Self {
            links: Arc::clone(&client) as Arc<dyn LinkApi>,
            account: Arc::clone(&client) as Arc<dyn AccountApi>,
            rss: client,
            notifier: Arc::new(ConsoleNotifier::new()),
            directory,
            poll: config.poll,
        })
    }

    /// Creates a live context whose API calls are captured into a
    /// recording session under `root`.
    ///
    /// The session must be finished after the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or the cassette directory cannot be created.
    pub fn recording_at(config: &Config, root: &Path) -> Result<(Self, RecordingSession)> {
        let live = Self::live(config)?;
        let session = RecordingSession::new(root, &config.base_url)?;
        info!(dir = %session.output_dir().display(), "recording API interactions");

        let ctx = Self {
            links: Arc::new(RecordingLinkApi::new(live.links, Arc::clone(&session.links))),
            account: Arc::new(RecordingAccountApi::new(
                live.account,
                Arc::clone(&session.account),
            )),
            rss: Arc::new(RecordingRssApi::new(live.rss, Arc::clone(&session.rss))),
            notifier: live.notifier,
            directory: live.directory,
            poll: live.poll,
        };
        Ok((ctx, session))
    }

    /// Creates a replaying context from a single cassette serving every port.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path, notifier: Arc<dyn Notifier>) -> Result<Self> {
        Self::replaying_from(&CassetteConfig::monolithic(path), notifier)
    }

    /// Creates a replaying context from per-port cassettes.
    ///
    /// Ports without a cassette panic when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let replayers = config.load_all()?;
        let links =
            replayers.links.map_or_else(ReplayingLinkApi::unconfigured, ReplayingLinkApi::new);
        let account = replayers
            .account
            .map_or_else(ReplayingAccountApi::unconfigured, ReplayingAccountApi::new);
        let rss = replayers.rss.map_or_else(ReplayingRssApi::unconfigured, ReplayingRssApi::new);
        Ok(Self {
            links: Arc::new(links),
            account: Arc::new(account),
            rss: Arc::new(rss),
            notifier,
            directory: Arc::new(Directory::new()),
            poll: PollConfig::default(),
        })
    }
}
