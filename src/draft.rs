//! Draft reconciliation for link edits.
//!
//! The store keeps two copies of a link: the authoritative one last
//! confirmed by the server, and the draft the user edits. Only a draft
//! that differs on a user-editable field is ever sent. Server-owned
//! fields (timestamps, archive artifacts) never count as a change.

use tracing::{debug, info};

use crate::error::ApiError;
use crate::model::Link;
use crate::ports::LinkApi;

/// A link field the user can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkField {
    /// `name`
    Name,
    /// `url`
    Url,
    /// `description`
    Description,
    /// `collection_id`
    Collection,
    /// `tag_ids` and `new_tags`
    Tags,
    /// `icon`
    Icon,
    /// `color`
    Color,
    /// `icon_weight`
    IconWeight,
}

impl LinkField {
    /// Every field taken into account when diffing, in display order.
    pub const COMPARED: [Self; 8] = [
        Self::Name,
        Self::Url,
        Self::Description,
        Self::Collection,
        Self::Tags,
        Self::Icon,
        Self::Color,
        Self::IconWeight,
    ];

    fn differs(self, a: &Link, b: &Link) -> bool {
        match self {
            Self::Name => a.name != b.name,
            Self::Url => a.url != b.url,
            Self::Description => a.description != b.description,
            Self::Collection => a.collection_id != b.collection_id,
            Self::Tags => a.tag_ids != b.tag_ids || a.new_tags != b.new_tags,
            Self::Icon => a.icon != b.icon,
            Self::Color => a.color != b.color,
            Self::IconWeight => a.icon_weight != b.icon_weight,
        }
    }
}

/// Fields on which the draft differs from the authoritative copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    fields: Vec<LinkField>,
}

impl ChangeSet {
    /// Whether there is nothing to send.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Changed fields, in [`LinkField::COMPARED`] order.
    #[must_use]
    pub fn fields(&self) -> &[LinkField] {
        &self.fields
    }

    /// Whether `field` changed.
    #[must_use]
    pub fn contains(&self, field: LinkField) -> bool {
        self.fields.contains(&field)
    }
}

/// A shallow edit. Each `Some` replaces the corresponding draft field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPatch {
    /// New name.
    pub name: Option<String>,
    /// New URL; `Some(None)` clears it.
    pub url: Option<Option<String>>,
    /// New description.
    pub description: Option<String>,
    /// Move to another collection.
    pub collection_id: Option<i64>,
    /// Replace the list of existing tags.
    pub tag_ids: Option<Vec<i64>>,
    /// Replace the list of tags to create by name.
    pub new_tags: Option<Vec<String>>,
    /// New icon; `Some(None)` clears it.
    pub icon: Option<Option<String>>,
    /// New icon color; `Some(None)` clears it.
    pub color: Option<Option<String>>,
    /// New icon weight; `Some(None)` clears it.
    pub icon_weight: Option<Option<String>>,
}

impl LinkPatch {
    fn apply(self, link: &mut Link) {
        if let Some(name) = self.name {
            link.name = name;
        }
        if let Some(url) = self.url {
            link.url = url;
        }
        if let Some(description) = self.description {
            link.description = description;
        }
        if let Some(collection_id) = self.collection_id {
            link.collection_id = collection_id;
        }
        if let Some(tag_ids) = self.tag_ids {
            link.tag_ids = tag_ids;
        }
        if let Some(new_tags) = self.new_tags {
            link.new_tags = new_tags;
        }
        if let Some(icon) = self.icon {
            link.icon = icon;
        }
        if let Some(color) = self.color {
            link.color = color;
        }
        if let Some(icon_weight) = self.icon_weight {
            link.icon_weight = icon_weight;
        }
    }
}

/// What a successful submit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing changed; no request was made.
    Unchanged(Link),
    /// The server accepted the draft and returned its canonical copy.
    Updated(Link),
}

impl SubmitOutcome {
    /// The link now considered authoritative.
    #[must_use]
    pub fn link(&self) -> &Link {
        match self {
            Self::Unchanged(link) | Self::Updated(link) => link,
        }
    }
}

/// Authoritative copy plus editable draft of one link.
#[derive(Debug, Clone)]
pub struct DraftStore {
    authoritative: Link,
    draft: Link,
}

impl DraftStore {
    /// Starts from a server-confirmed snapshot, with a pristine draft.
    #[must_use]
    pub fn new(authoritative: Link) -> Self {
        let draft = authoritative.clone();
        Self { authoritative, draft }
    }

    /// Last server-confirmed copy.
    #[must_use]
    pub fn authoritative(&self) -> &Link {
        &self.authoritative
    }

    /// Current draft.
    #[must_use]
    pub fn draft(&self) -> &Link {
        &self.draft
    }

    /// Reseeds both copies from a fresh snapshot, dropping pending edits.
    pub fn begin_edit(&mut self, authoritative: Link) {
        self.draft = authoritative.clone();
        self.authoritative = authoritative;
    }

    /// Applies `patch` to the draft only.
    pub fn update_field(&mut self, patch: LinkPatch) {
        patch.apply(&mut self.draft);
    }

    /// Fields on which the draft differs from the authoritative copy.
    #[must_use]
    pub fn change_set(&self) -> ChangeSet {
        let fields = LinkField::COMPARED
            .into_iter()
            .filter(|field| field.differs(&self.draft, &self.authoritative))
            .collect();
        ChangeSet { fields }
    }

    /// Takes a newer server snapshot without losing pending edits.
    ///
    /// Server-owned fields of the draft follow the snapshot; edited
    /// fields stay as the user left them. A snapshot older than the
    /// authoritative copy is dropped; returns whether it was taken.
    pub fn refresh(&mut self, snapshot: Link) -> bool {
        if snapshot.updated_at < self.authoritative.updated_at {
            debug!(
                link = snapshot.id,
                snapshot = %snapshot.updated_at,
                current = %self.authoritative.updated_at,
                "dropping stale snapshot"
            );
            return false;
        }
        let mut draft = snapshot.clone();
        for field in self.change_set().fields() {
            copy_field(*field, &self.draft, &mut draft);
        }
        self.draft = draft;
        self.authoritative = snapshot;
        true
    }

    /// Sends the draft if it differs from the authoritative copy.
    ///
    /// On success both copies become the server's canonical result.
    ///
    /// # Errors
    ///
    /// Returns the API error unchanged; the draft is kept for another try.
    pub async fn submit(&mut self, api: &dyn LinkApi) -> Result<SubmitOutcome, ApiError> {
        let changes = self.change_set();
        if changes.is_empty() {
            debug!(link = self.authoritative.id, "draft unchanged, nothing to submit");
            return Ok(SubmitOutcome::Unchanged(self.authoritative.clone()));
        }

        debug!(link = self.draft.id, changed = ?changes.fields(), "submitting draft");
        let canonical = api.update_link(&self.draft).await?;
        info!(link = canonical.id, "link updated");
        self.begin_edit(canonical.clone());
        Ok(SubmitOutcome::Updated(canonical))
    }

    /// Drops all edits; the draft reverts to the authoritative copy.
    pub fn discard(&mut self) {
        self.draft = self.authoritative.clone();
    }
}

fn copy_field(field: LinkField, from: &Link, to: &mut Link) {
    match field {
        LinkField::Name => to.name.clone_from(&from.name),
        LinkField::Url => to.url.clone_from(&from.url),
        LinkField::Description => to.description.clone_from(&from.description),
        LinkField::Collection => to.collection_id = from.collection_id,
        LinkField::Tags => {
            to.tag_ids.clone_from(&from.tag_ids);
            to.new_tags.clone_from(&from.new_tags);
        }
        LinkField::Icon => to.icon.clone_from(&from.icon),
        LinkField::Color => to.color.clone_from(&from.color),
        LinkField::IconWeight => to.icon_weight.clone_from(&from.icon_weight),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;
    use serde_json::json;

    use super::*;
    use crate::adapters::replaying::testing::replayer;
    use crate::adapters::replaying::ReplayingLinkApi;
    use crate::model::fixtures::{sample_link, t0};

    fn rename(name: &str) -> LinkPatch {
        LinkPatch { name: Some(name.into()), ..LinkPatch::default() }
    }

    #[test]
    fn fresh_store_has_no_changes() {
        let store = DraftStore::new(sample_link());
        assert!(store.change_set().is_empty());
    }

    #[test]
    fn patch_touches_draft_only() {
        let mut store = DraftStore::new(sample_link());
        store.update_field(LinkPatch {
            tag_ids: Some(vec![3, 4]),
            url: Some(None),
            ..rename("B")
        });

        assert_eq!(store.draft().name, "B");
        assert_eq!(store.draft().url, None);
        assert_eq!(store.authoritative().name, "A");
        let changes = store.change_set();
        assert_eq!(changes.fields(), &[LinkField::Name, LinkField::Url, LinkField::Tags]);
    }

    #[test]
    fn reverting_an_edit_clears_the_change() {
        let mut store = DraftStore::new(sample_link());
        store.update_field(rename("B"));
        store.update_field(rename("A"));
        assert!(store.change_set().is_empty());
    }

    #[test]
    fn server_owned_fields_are_not_changes() {
        let mut store = DraftStore::new(sample_link());
        let mut snapshot = sample_link();
        snapshot.updated_at = t0() + Duration::seconds(30);
        snapshot.pdf = Some("archives/10/1.pdf".into());
        store.authoritative = snapshot;
        assert!(store.change_set().is_empty());
    }

    #[test]
    fn refresh_keeps_edits_and_takes_server_fields() {
        let mut store = DraftStore::new(sample_link());
        store.update_field(rename("B"));

        let mut snapshot = sample_link();
        snapshot.pdf = Some("archives/10/1.pdf".into());
        snapshot.description = "set elsewhere".into();
        assert!(store.refresh(snapshot));

        assert_eq!(store.draft().name, "B");
        assert_eq!(store.draft().pdf.as_deref(), Some("archives/10/1.pdf"));
        assert_eq!(store.draft().description, "set elsewhere");
        assert_eq!(store.change_set().fields(), &[LinkField::Name]);
    }

    #[test]
    fn snapshot_older_than_authoritative_is_dropped() {
        let mut canonical = sample_link();
        canonical.name = "B".into();
        canonical.updated_at = t0() + Duration::seconds(1);
        let mut store = DraftStore::new(canonical.clone());

        let mut stale = sample_link();
        stale.pdf = Some("archives/10/1.pdf".into());
        assert!(!store.refresh(stale));

        assert_eq!(store.authoritative(), &canonical);
        assert_eq!(store.draft(), &canonical);
    }

    #[test]
    fn tags_to_create_count_as_a_change() {
        let mut store = DraftStore::new(sample_link());
        store.update_field(LinkPatch {
            new_tags: Some(vec!["reading".into()]),
            ..LinkPatch::default()
        });
        assert_eq!(store.change_set().fields(), &[LinkField::Tags]);

        let mut snapshot = sample_link();
        snapshot.pdf = Some("archives/10/1.pdf".into());
        store.refresh(snapshot);
        assert_eq!(store.draft().new_tags, vec!["reading".to_string()]);
    }

    #[test]
    fn discard_reverts_to_authoritative() {
        let mut store = DraftStore::new(sample_link());
        store.update_field(rename("B"));
        store.discard();
        assert_eq!(store.draft(), store.authoritative());
    }

    #[tokio::test]
    async fn unchanged_submit_makes_no_request() {
        let api = ReplayingLinkApi::unconfigured();
        let mut store = DraftStore::new(sample_link());
        store.begin_edit(sample_link());

        let outcome = store.submit(&api).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Unchanged(sample_link()));
    }

    #[tokio::test]
    async fn successful_submit_adopts_server_copy() {
        let mut canonical = sample_link();
        canonical.name = "B".into();
        canonical.updated_at = t0() + Duration::seconds(1);
        let api = ReplayingLinkApi::new(replayer(&[(
            "links",
            "update_link",
            json!({"Ok": canonical}),
        )]));

        let mut store = DraftStore::new(sample_link());
        store.update_field(rename("B"));
        let outcome = store.submit(&api).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Updated(canonical.clone()));
        assert_eq!(store.authoritative(), &canonical);
        assert_eq!(store.draft(), &canonical);
        assert!(store.change_set().is_empty());
    }

    #[tokio::test]
    async fn conflict_preserves_draft() {
        let replayer = replayer(&[("links", "update_link", json!({"Err": {"Conflict": "stale"}}))]);
        let api = ReplayingLinkApi::new(Arc::clone(&replayer));

        let mut store = DraftStore::new(sample_link());
        store.update_field(rename("B"));
        let err = store.submit(&api).await.unwrap_err();

        assert_eq!(err, ApiError::Conflict("stale".into()));
        assert_eq!(store.draft().name, "B");
        assert_eq!(store.authoritative(), &sample_link());
        assert_eq!(replayer.lock().unwrap().remaining("links", "update_link"), 0);
    }
}
