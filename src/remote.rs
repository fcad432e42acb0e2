//! Remote document store client.
//!
//! This module talks to the remote key-value JSON document service that
//! holds the authoritative copy of the movie collection. Documents are
//! keyed by the movie identifier's string form under the `movies`
//! collection:
//!
//! - `GET /movies.json` — the full collection as a keyed mapping
//! - `PUT /movies/<id>.json` — upsert one document
//! - `DELETE /movies/<id>.json` — remove one document (idempotent)
//!
//! Every call is a single attempt with a fixed timeout; there is no
//! retry or backoff.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, Url};
use uuid::Uuid;

use crate::error::{MovieError, MovieResult};
use crate::models::MovieRepresentation;
use crate::validation::validate_identifier;

/// Name of the remote collection holding movie documents
const COLLECTION: &str = "movies";

/// Client for the remote document store
pub struct RemoteStore {
    client: Client,
    base_url: Url,
}

impl RemoteStore {
    /// Create a new remote store client
    pub fn new(base_url: Url, timeout_secs: u64) -> MovieResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| MovieError::network(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    fn collection_url(&self) -> MovieResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| MovieError::BadRequest("base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(&format!("{}.json", COLLECTION));
        Ok(url)
    }

    fn document_url(&self, id: &Uuid) -> MovieResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| MovieError::BadRequest("base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(COLLECTION)
            .push(&format!("{}.json", id));
        Ok(url)
    }

    /// Upsert one movie document, keyed by its identifier.
    ///
    /// The representation must carry a parseable identifier; this is
    /// checked before any bytes go on the wire.
    pub async fn put_movie(&self, representation: &MovieRepresentation) -> MovieResult<()> {
        let id = validate_identifier(&representation.identifier, "identifier")
            .map_err(|e| MovieError::FailedEncode(e.to_string()))?;

        let url = self.document_url(&id)?;
        let response = self
            .client
            .put(url)
            .json(representation)
            .send()
            .await
            .map_err(|e| MovieError::network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MovieError::network(format!(
                "PUT failed with status {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Delete one movie document. Deleting a key that does not exist is
    /// not an error; the remote service treats it as success.
    pub async fn delete_movie(&self, id: &Uuid) -> MovieResult<()> {
        let url = self.document_url(id)?;
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|e| MovieError::network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MovieError::network(format!(
                "DELETE failed with status {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Fetch the entire collection as a mapping from document key to
    /// representation.
    ///
    /// Decoding is atomic: either the whole payload parses or the call
    /// fails with `FailedDecode`. An empty body is `NoData`; the literal
    /// body `null` (how the service represents an empty collection)
    /// yields an empty mapping.
    pub async fn fetch_all(&self) -> MovieResult<HashMap<String, MovieRepresentation>> {
        let url = self.collection_url()?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MovieError::network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MovieError::network(format!(
                "GET failed with status {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| MovieError::network(e.to_string()))?;

        if body.trim().is_empty() {
            return Err(MovieError::NoData);
        }
        if body.trim() == "null" {
            return Ok(HashMap::new());
        }

        serde_json::from_str(&body).map_err(|e| MovieError::FailedDecode(e.to_string()))
    }
}
