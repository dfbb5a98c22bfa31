//! Cassettes for recording and replaying API interactions.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;
