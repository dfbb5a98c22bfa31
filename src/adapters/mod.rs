//! Port implementations: live HTTP, cassette recording and replay, and
//! an in-memory notice log.

pub mod live;
pub mod memory;
pub mod recording;
pub mod replaying;
