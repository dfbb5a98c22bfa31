//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{Config, PollConfig, DEFAULT_BASE_URL};
use crate::error::Result;
use crate::ports::LinkSort;

/// Top-level CLI parser for `linkward`.
#[derive(Debug, Parser)]
#[command(name = "linkward", version, about = "Watch and edit Linkwarden links")]
pub struct Cli {
    /// Linkwarden server URL.
    #[arg(long, env = "LINKWARDEN_URL", default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// API access token.
    #[arg(long, env = "LINKWARDEN_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Milliseconds between readiness fetches.
    #[arg(long, env = "LINKWARDEN_POLL_INTERVAL_MS", default_value_t = 5000)]
    pub poll_interval_ms: u64,

    /// Give up on readiness after this many fetches.
    #[arg(long, env = "LINKWARDEN_POLL_MAX_ATTEMPTS")]
    pub poll_max_attempts: Option<u32>,

    /// Record API interactions to cassettes under this directory.
    #[arg(long, env = "LINKWARDEN_RECORD")]
    pub record: Option<PathBuf>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Effective configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the poll settings are out of range.
    pub fn config(&self) -> Result<Config> {
        Ok(Config {
            base_url: self.url.trim_end_matches('/').to_string(),
            token: self.token.clone(),
            poll: PollConfig::new(self.poll_interval_ms, self.poll_max_attempts)?,
            record_dir: self.record.clone(),
        })
    }
}

/// Supported subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Poll a link until its archives are ready, printing each snapshot.
    Watch {
        /// Link ID.
        id: i64,
    },
    /// Edit a link; only changed fields are sent.
    Edit(EditArgs),
    /// Search links by name, URL, description, or tag.
    Search {
        /// Text to look for.
        query: String,
        /// Result order.
        #[arg(long, value_enum, default_value_t = LinkSort::DateNewestFirst)]
        sort: LinkSort,
    },
    /// Delete a user account.
    DeleteAccount {
        /// User ID.
        user_id: i64,
        /// Current password, required as confirmation.
        #[arg(long, default_value = "")]
        password: String,
        /// Why the account is being deleted.
        #[arg(long)]
        comment: Option<String>,
        /// Free-form feedback.
        #[arg(long)]
        feedback: Option<String>,
    },
    /// Delete an RSS subscription.
    RssDelete {
        /// Subscription ID.
        id: i64,
    },
}

/// Arguments for `linkward edit`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct EditArgs {
    /// Link ID.
    pub id: i64,
    /// New name.
    #[arg(long)]
    pub name: Option<String>,
    /// New URL.
    #[arg(long)]
    pub url: Option<String>,
    /// New description.
    #[arg(long)]
    pub description: Option<String>,
    /// Move to this collection ID.
    #[arg(long)]
    pub collection: Option<i64>,
    /// Tag names; replaces the current tags when given. Unknown names are
    /// created.
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}
