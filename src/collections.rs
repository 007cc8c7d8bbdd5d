//! Collections: named tabular datasets used in message personalization.

use crate::{metadata::RequestMetadata, response::null_as_default, ApiClient, Result};
use http::Method;
use serde::{Deserialize, Serialize};

const COLLECTIONS_PATH: &str = "/v1/collections";

/// Body for creating or updating a collection.
///
/// Unset fields are left out of the request entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionRequest {
    /// The collection name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// A URL Customer.io downloads the collection data from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl CollectionRequest {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the collection name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the data URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// A collection as returned by the API.
///
/// `created_at` and `updated_at` are Unix timestamps in seconds, kept as the
/// API sends them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Collection {
    /// Size of the collection data in bytes.
    #[serde(deserialize_with = "null_as_default")]
    pub bytes: i64,
    /// When the collection was created, in Unix seconds.
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: i64,
    /// Collection identifier.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Collection name, referenced from liquid templates.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Number of rows.
    #[serde(deserialize_with = "null_as_default")]
    pub rows: i64,
    /// Column names.
    #[serde(deserialize_with = "null_as_default")]
    pub schema: Vec<String>,
    /// When the collection was last updated, in Unix seconds.
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: i64,
}

/// Response to creating or updating a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CollectionResponse {
    /// The created or updated collection.
    #[serde(deserialize_with = "null_as_default")]
    pub collection: Collection,
}

/// Response to listing collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListCollectionsResponse {
    /// Every collection in the workspace.
    #[serde(deserialize_with = "null_as_default")]
    pub collections: Vec<Collection>,
}

impl ApiClient {
    /// Creates a collection.
    ///
    /// Sends `POST /v1/collections`.
    pub async fn create_collection(&self, request: &CollectionRequest) -> Result<CollectionResponse> {
        let metadata = RequestMetadata::new(Method::POST, COLLECTIONS_PATH);
        self.base.send(metadata, Some(request)).await?.decode()
    }

    /// Lists every collection in the workspace.
    ///
    /// Sends `GET /v1/collections`.
    pub async fn list_collections(&self) -> Result<ListCollectionsResponse> {
        let metadata = RequestMetadata::new(Method::GET, COLLECTIONS_PATH);
        self.base.send::<()>(metadata, None).await?.decode()
    }

    /// Updates a collection's name or data URL.
    ///
    /// Sends `PUT /v1/collections/{collection_id}`.
    pub async fn update_collection(
        &self,
        collection_id: impl AsRef<str>,
        request: &CollectionRequest,
    ) -> Result<CollectionResponse> {
        let metadata = RequestMetadata::new(Method::PUT, COLLECTIONS_PATH).segment(collection_id);
        self.base.send(metadata, Some(request)).await?.decode()
    }
}
