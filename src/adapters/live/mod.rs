//! Live adapters talking to a real Linkwarden server and terminal.

pub mod http;
pub mod notify;

pub use http::LinkwardenClient;
pub use notify::ConsoleNotifier;
