//! Link, collection, and tag records.
//!
//! Links reference their collection and tags by id only; the resolved
//! records live in [`crate::store::Directory`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Value the archiver stores in a format field when it gave up on it.
pub const UNAVAILABLE: &str = "unavailable";

/// A bookmarked link as confirmed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Server-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Target URL; `None` for content-only links.
    pub url: Option<String>,
    /// Free-form description.
    pub description: String,
    /// Owning collection.
    pub collection_id: i64,
    /// Attached tags, in display order.
    pub tag_ids: Vec<i64>,
    /// Tags to create by name on the next update. Always empty on a
    /// server copy.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub new_tags: Vec<String>,
    /// PDF artifact path.
    pub pdf: Option<String>,
    /// Single-file webpage snapshot path.
    pub monolith: Option<String>,
    /// Screenshot path.
    pub image: Option<String>,
    /// Preview thumbnail path.
    pub preview: Option<String>,
    /// Readability extraction path.
    pub readable: Option<String>,
    /// Icon override.
    pub icon: Option<String>,
    /// Icon color override.
    pub color: Option<String>,
    /// Icon weight override.
    pub icon_weight: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last accepted mutation; owned by the server.
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Raw value of an artifact field.
    #[must_use]
    pub fn format(&self, format: ArchivedFormat) -> Option<&str> {
        match format {
            ArchivedFormat::Pdf => self.pdf.as_deref(),
            ArchivedFormat::Monolith => self.monolith.as_deref(),
            ArchivedFormat::Image => self.image.as_deref(),
            ArchivedFormat::Preview => self.preview.as_deref(),
            ArchivedFormat::Readable => self.readable.as_deref(),
        }
    }
}

/// The preserved formats an archiver can produce for a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchivedFormat {
    /// PDF rendering.
    Pdf,
    /// Single-file HTML snapshot.
    Monolith,
    /// Full-page screenshot.
    Image,
    /// Thumbnail preview.
    Preview,
    /// Readability text extraction.
    Readable,
}

/// Which formats a collection requires for its links.
///
/// Missing fields deserialize as "not mandatory".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchivalPolicy {
    /// Screenshot is mandatory.
    pub archive_as_screenshot: bool,
    /// Monolith snapshot is mandatory.
    pub archive_as_monolith: bool,
    /// PDF is mandatory.
    pub archive_as_pdf: bool,
}

/// A collection of links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Server-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Owning user.
    pub owner_id: i64,
    /// Formats required for links in this collection.
    #[serde(default)]
    pub policy: ArchivalPolicy,
}

/// A tag that can be attached to links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Server-assigned identifier.
    pub id: i64,
    /// Tag label.
    pub name: String,
}
