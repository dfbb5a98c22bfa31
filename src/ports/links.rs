//! Link retrieval and update port.

use serde::{Deserialize, Serialize};

use super::ApiFuture;
use crate::model::Link;

/// Result order for [`LinkApi::search_links`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum LinkSort {
    /// Most recently created first.
    #[default]
    DateNewestFirst,
    /// Oldest first.
    DateOldestFirst,
    /// Name, A to Z.
    NameAZ,
    /// Name, Z to A.
    NameZA,
    /// Description, A to Z.
    DescriptionAZ,
    /// Description, Z to A.
    DescriptionZA,
}

impl LinkSort {
    /// Numeric code the server expects in the `sort` query parameter.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::DateNewestFirst => 0,
            Self::DateOldestFirst => 1,
            Self::NameAZ => 2,
            Self::NameZA => 3,
            Self::DescriptionAZ => 4,
            Self::DescriptionZA => 5,
        }
    }
}

/// Reads and writes links on the server.
pub trait LinkApi: Send + Sync {
    /// Fetches the current server copy of a link.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Network`, or `Unauthorized`.
    fn fetch_link(&self, id: i64) -> ApiFuture<'_, Link>;

    /// Replaces a link with `link` and returns the canonical result,
    /// including a fresh `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `Validation`, `Conflict`, `Network`, or `Unauthorized`.
    fn update_link(&self, link: &Link) -> ApiFuture<'_, Link>;

    /// Links matching `query` in name, URL, description, or tags.
    ///
    /// # Errors
    ///
    /// Returns `Network` or `Unauthorized`.
    fn search_links(&self, query: &str, sort: LinkSort) -> ApiFuture<'_, Vec<Link>>;
}

#[cfg(test)]
mod tests {
    use super::LinkSort;

    #[test]
    fn sort_codes_follow_server_order() {
        assert_eq!(LinkSort::default().code(), 0);
        assert_eq!(LinkSort::NameZA.code(), 3);
        assert_eq!(LinkSort::DescriptionZA.code(), 5);
    }
}
