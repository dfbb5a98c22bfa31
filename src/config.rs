//! Runtime configuration.
//!
//! Values come from CLI flags, falling back to environment variables
//! (optionally loaded from a `.env` file):
//!
//! - `LINKWARDEN_URL` - server base URL (default: `http://localhost:3000`)
//! - `LINKWARDEN_TOKEN` - API access token
//! - `LINKWARDEN_POLL_INTERVAL_MS` - readiness poll cadence (default: 5000)
//! - `LINKWARDEN_POLL_MAX_ATTEMPTS` - optional cap on readiness fetches
//! - `LINKWARDEN_RECORD` - directory to record API cassettes into

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default server location.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default delay between readiness fetches.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Readiness polling cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Delay between the end of one fetch and the start of the next.
    pub interval: Duration,
    /// Stop after this many fetches without reaching readiness.
    /// `None` keeps polling until ready or stopped.
    pub max_attempts: Option<u32>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self { interval: DEFAULT_POLL_INTERVAL, max_attempts: None }
    }
}

impl PollConfig {
    /// Builds a poll config from raw settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the interval or attempt cap is zero.
    pub fn new(interval_ms: u64, max_attempts: Option<u32>) -> Result<Self> {
        if interval_ms == 0 {
            return Err(Error::Config("poll interval must be greater than zero".into()));
        }
        if max_attempts == Some(0) {
            return Err(Error::Config("poll max attempts must be at least one".into()));
        }
        Ok(Self { interval: Duration::from_millis(interval_ms), max_attempts })
    }
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Server base URL, without the `/api/v1` suffix.
    pub base_url: String,
    /// Bearer token for the API.
    pub token: Option<String>,
    /// Readiness polling cadence.
    pub poll: PollConfig,
    /// When set, API interactions are recorded to cassettes under this directory.
    pub record_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            poll: PollConfig::default(),
            record_dir: None,
        }
    }
}
