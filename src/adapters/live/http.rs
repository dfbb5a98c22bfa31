//! Live adapter for the API ports using the Linkwarden REST API.
//!
//! Responses come wrapped as `{"response": ...}`; on failure `response`
//! holds the server's message. Links arrive with their collection and
//! tags embedded. Those are split off into the [`Directory`] so that the
//! rest of the crate only sees id references, and re-embedded on update.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ApiError, Error, Result};
use crate::model::{ArchivalPolicy, Collection, Link, Tag};
use crate::ports::{AccountApi, ApiFuture, DeleteAccountRequest, LinkApi, LinkSort, RssApi};
use crate::store::Directory;

/// HTTP client for a Linkwarden server.
pub struct LinkwardenClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    directory: Arc<Directory>,
}

impl LinkwardenClient {
    /// Creates a client for the server named in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &Config, directory: Arc<Directory>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            directory,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{path}", self.base_url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("request failed: {e}")))?;
        read_response(response).await
    }

    /// Records the embedded collection and tags, returning the bare link.
    fn absorb(&self, wire: WireLink) -> Link {
        let collection = Collection {
            id: wire.collection.id,
            name: wire.collection.name,
            owner_id: wire.collection.owner_id,
            policy: ArchivalPolicy {
                archive_as_screenshot: wire.collection.archive_as_screenshot,
                archive_as_monolith: wire.collection.archive_as_monolith,
                archive_as_pdf: wire.collection.archive_as_pdf,
            },
        };
        self.directory.upsert_collection(collection);

        let mut tag_ids = Vec::with_capacity(wire.tags.len());
        for tag in wire.tags {
            match tag.id {
                Some(id) => {
                    self.directory.upsert_tag(Tag { id, name: tag.name });
                    tag_ids.push(id);
                }
                None => warn!(link = wire.id, tag = %tag.name, "ignoring tag without an id"),
            }
        }

        Link {
            id: wire.id,
            name: wire.name,
            url: wire.url,
            description: wire.description.unwrap_or_default(),
            collection_id: wire.collection.id,
            tag_ids,
            new_tags: Vec::new(),
            pdf: wire.pdf,
            monolith: wire.monolith,
            image: wire.image,
            preview: wire.preview,
            readable: wire.readable,
            icon: wire.icon,
            color: wire.color,
            icon_weight: wire.icon_weight,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        }
    }

    /// Rebuilds the embedded wire shape from the directory.
    ///
    /// Tags to create go out by name only; the server creates them.
    fn embed(&self, link: &Link) -> Result<WireLink, ApiError> {
        let collection = self.directory.collection(link.collection_id).ok_or_else(|| {
            ApiError::Validation(format!("unknown collection {}", link.collection_id))
        })?;
        let mut tags = link
            .tag_ids
            .iter()
            .map(|id| {
                self.directory
                    .tag(*id)
                    .map(|tag| WireTag { id: Some(tag.id), name: tag.name })
                    .ok_or_else(|| ApiError::Validation(format!("unknown tag {id}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        tags.extend(link.new_tags.iter().map(|name| WireTag { id: None, name: name.clone() }));

        Ok(WireLink {
            id: link.id,
            name: link.name.clone(),
            url: link.url.clone(),
            description: Some(link.description.clone()),
            collection: WireCollection {
                id: collection.id,
                name: collection.name,
                owner_id: collection.owner_id,
                archive_as_screenshot: collection.policy.archive_as_screenshot,
                archive_as_monolith: collection.policy.archive_as_monolith,
                archive_as_pdf: collection.policy.archive_as_pdf,
            },
            tags,
            pdf: link.pdf.clone(),
            monolith: link.monolith.clone(),
            image: link.image.clone(),
            preview: link.preview.clone(),
            readable: link.readable.clone(),
            icon: link.icon.clone(),
            color: link.color.clone(),
            icon_weight: link.icon_weight.clone(),
            created_at: link.created_at,
            updated_at: link.updated_at,
        })
    }
}

impl LinkApi for LinkwardenClient {
    fn fetch_link(&self, id: i64) -> ApiFuture<'_, Link> {
        Box::pin(async move {
            debug!(link = id, "fetching link");
            let request = self.client.get(self.url(&format!("links/{id}")));
            let wire: WireLink = self.send(request).await?;
            Ok(self.absorb(wire))
        })
    }

    fn update_link(&self, link: &Link) -> ApiFuture<'_, Link> {
        let body = self.embed(link);
        let id = link.id;
        Box::pin(async move {
            let body = body?;
            debug!(link = id, "updating link");
            let request = self.client.put(self.url(&format!("links/{id}"))).json(&body);
            let wire: WireLink = self.send(request).await?;
            Ok(self.absorb(wire))
        })
    }

    fn search_links(&self, query: &str, sort: LinkSort) -> ApiFuture<'_, Vec<Link>> {
        let query = query.to_string();
        Box::pin(async move {
            debug!(%query, ?sort, "searching links");
            let sort = sort.code().to_string();
            let request = self
                .client
                .get(self.url("links"))
                .query(&[("searchQueryString", query.as_str()), ("sort", sort.as_str())]);
            let wires: Vec<WireLink> = self.send(request).await?;
            Ok(wires.into_iter().map(|wire| self.absorb(wire)).collect())
        })
    }
}

impl AccountApi for LinkwardenClient {
    fn delete_account(&self, user_id: i64, request: &DeleteAccountRequest) -> ApiFuture<'_, ()> {
        let request = request.clone();
        Box::pin(async move {
            debug!(user = user_id, "deleting account");
            let builder = self.client.delete(self.url(&format!("users/{user_id}")));
            let _: serde_json::Value = self.send(builder.json(&request)).await?;
            Ok(())
        })
    }
}

impl RssApi for LinkwardenClient {
    fn delete_subscription(&self, id: i64) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            debug!(subscription = id, "deleting rss subscription");
            let request = self.client.delete(self.url(&format!("rss/{id}")));
            let _: serde_json::Value = self.send(request).await?;
            Ok(())
        })
    }
}

async fn read_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(format!("failed to read response: {e}")))?;

    if !status.is_success() {
        let message = serde_json::from_str::<Envelope<String>>(&text)
            .map(|envelope| envelope.response)
            .unwrap_or(text);
        return Err(classify(status, message));
    }

    serde_json::from_str::<Envelope<T>>(&text)
        .map(|envelope| envelope.response)
        .map_err(|e| ApiError::Network(format!("failed to parse response: {e}")))
}

/// Maps an HTTP failure status onto the error taxonomy.
pub(crate) fn classify(status: StatusCode, message: String) -> ApiError {
    match status {
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ApiError::Validation(message),
        StatusCode::CONFLICT => ApiError::Conflict(message),
        _ => ApiError::Network(format!("server error ({}): {message}", status.as_u16())),
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    response: T,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireLink {
    id: i64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    description: Option<String>,
    collection: WireCollection,
    #[serde(default)]
    tags: Vec<WireTag>,
    #[serde(default)]
    pdf: Option<String>,
    #[serde(default)]
    monolith: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    preview: Option<String>,
    #[serde(default)]
    readable: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    icon_weight: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCollection {
    id: i64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    owner_id: i64,
    #[serde(default)]
    archive_as_screenshot: bool,
    #[serde(default)]
    archive_as_monolith: bool,
    #[serde(default, rename = "archiveAsPDF")]
    archive_as_pdf: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireTag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    name: String,
}
