//! Core library entry for the `linkward` CLI.
//!
//! Tracks whether a Linkwarden link's archives are ready and reconciles
//! user edits against the server copy.

pub mod account;
pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod draft;
pub mod error;
pub mod model;
pub mod poll;
pub mod ports;
pub mod readiness;
pub mod rss;
pub mod store;
pub mod view;

use clap::Parser;

pub use error::{ApiError, Error, Result};

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns [`Error::Usage`] when argument parsing fails, otherwise the
/// command's error.
pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args)?;
    let config = cli.config()?;
    commands::dispatch(&cli.command, &config)
}
