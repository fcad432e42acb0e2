//! Search provider client.
//!
//! This module performs read-only queries against the external movie
//! search API: `GET <endpoint>?query=<term>&api_key=<credential>`.
//! Results are transient candidates; caching them is the controller's
//! concern so that a failed search never disturbs the previous results.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::{MovieError, MovieResult};
use crate::models::{SearchResults, SearchedMovie};
use crate::validation::validate_search_term;

/// Client for the external search API
pub struct SearchClient {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl SearchClient {
    /// Create a new search client
    pub fn new(endpoint: Url, api_key: impl Into<String>, timeout_secs: u64) -> MovieResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| MovieError::network(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
        })
    }

    fn query_url(&self, term: &str) -> MovieResult<Url> {
        if self.endpoint.cannot_be_a_base() {
            return Err(MovieError::BadRequest(
                "search endpoint cannot be used as a base URL".to_string(),
            ));
        }
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("query", term)
            .append_pair("api_key", &self.api_key);
        Ok(url)
    }

    /// Search for movies matching `term`.
    ///
    /// Single attempt; the caller decides what to do with the results.
    pub async fn search(&self, term: &str) -> MovieResult<Vec<SearchedMovie>> {
        validate_search_term(term)?;
        let url = self.query_url(term)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MovieError::network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MovieError::network(format!(
                "search failed with status {}",
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

        let results: SearchResults =
            serde_json::from_str(&body).map_err(|e| MovieError::FailedDecode(e.to_string()))?;
        Ok(results.results)
    }
}
