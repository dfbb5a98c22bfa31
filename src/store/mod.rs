//! Directory of collections and tags referenced by links.
//!
//! Links carry only ids. Everything that used to travel embedded in a
//! link (collection name, owner, archival policy, tag names) is kept
//! here once, keyed by id, and refreshed whenever the API returns a
//! newer copy.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::model::{ArchivalPolicy, Collection, Tag};

#[derive(Debug, Default)]
struct Entries {
    collections: HashMap<i64, Collection>,
    tags: HashMap<i64, Tag>,
}

/// Id-keyed lookup for collections and tags.
#[derive(Debug, Default)]
pub struct Directory {
    entries: RwLock<Entries>,
}

impl Directory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a collection.
    pub fn upsert_collection(&self, collection: Collection) {
        let mut entries = self.entries.write().expect("directory lock poisoned");
        entries.collections.insert(collection.id, collection);
    }

    /// Inserts or replaces a tag.
    pub fn upsert_tag(&self, tag: Tag) {
        let mut entries = self.entries.write().expect("directory lock poisoned");
        entries.tags.insert(tag.id, tag);
    }

    /// Looks up a collection by id.
    #[must_use]
    pub fn collection(&self, id: i64) -> Option<Collection> {
        let entries = self.entries.read().expect("directory lock poisoned");
        entries.collections.get(&id).cloned()
    }

    /// Looks up a tag by id.
    #[must_use]
    pub fn tag(&self, id: i64) -> Option<Tag> {
        let entries = self.entries.read().expect("directory lock poisoned");
        entries.tags.get(&id).cloned()
    }

    /// Looks up a tag by its exact name.
    #[must_use]
    pub fn tag_by_name(&self, name: &str) -> Option<Tag> {
        let entries = self.entries.read().expect("directory lock poisoned");
        entries.tags.values().find(|tag| tag.name == name).cloned()
    }

    /// Archival policy of a collection; unknown collections mandate nothing.
    #[must_use]
    pub fn archival_policy(&self, collection_id: i64) -> ArchivalPolicy {
        self.collection(collection_id).map(|c| c.policy).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn research() -> Collection {
        Collection {
            id: 10,
            name: "Research".into(),
            owner_id: 1,
            policy: ArchivalPolicy { archive_as_pdf: true, ..ArchivalPolicy::default() },
        }
    }

    #[test]
    fn resolves_policy_of_known_collection() {
        let dir = Directory::new();
        dir.upsert_collection(research());
        assert!(dir.archival_policy(10).archive_as_pdf);
    }

    #[test]
    fn unknown_collection_has_empty_policy() {
        let dir = Directory::new();
        assert_eq!(dir.archival_policy(99), ArchivalPolicy::default());
    }

    #[test]
    fn upsert_replaces_stale_copy() {
        let dir = Directory::new();
        dir.upsert_collection(research());
        dir.upsert_collection(Collection { name: "Reading".into(), ..research() });
        assert_eq!(dir.collection(10).unwrap().name, "Reading");
    }

    #[test]
    fn finds_tags_by_id_and_name() {
        let dir = Directory::new();
        dir.upsert_tag(Tag { id: 3, name: "rust".into() });
        dir.upsert_tag(Tag { id: 4, name: "async".into() });

        assert_eq!(dir.tag(3).unwrap().name, "rust");
        assert_eq!(dir.tag_by_name("async").unwrap().id, 4);
        assert!(dir.tag_by_name("go").is_none());
    }
}
