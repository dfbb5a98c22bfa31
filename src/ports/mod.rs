//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the controllers and an
//! external system (the Linkwarden REST API, the user-facing notice
//! area). Implementations live in `src/adapters/`.

pub mod account;
pub mod links;
pub mod notify;
pub mod rss;

use std::future::Future;
use std::pin::Pin;

use crate::error::ApiError;

pub use account::{AccountApi, CancellationDetails, DeleteAccountRequest};
pub use links::{LinkApi, LinkSort};
pub use notify::{NoticeId, Notifier};
pub use rss::RssApi;

/// Boxed future returned by the API ports, keeping the traits dyn-compatible.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;
