//! Movie controller: the orchestration facade.
//!
//! Ties together the local store, the remote document store client and
//! the search client behind the four operations the presentation layer
//! needs: `search`, `push`, `pull` and `delete_remote`.
//!
//! The controller is constructed from an explicit `Config` and a shared
//! `Database` handle; it holds no global state. Search results live in a
//! single overwritable cache that only a successful search replaces.
//! Pulls are serialized behind an async mutex so two overlapping pulls
//! can never interleave partial batches.

use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::database::Database;
use crate::error::{MovieError, MovieResult};
use crate::models::{Movie, SearchedMovie};
use crate::reconcile::{ReconcileSummary, Reconciler};
use crate::remote::RemoteStore;
use crate::search::SearchClient;

/// Orchestration facade over the local store, remote store and search API
pub struct MovieController {
    db: Arc<Mutex<Database>>,
    remote: RemoteStore,
    search_client: SearchClient,
    searched_movies: Mutex<Vec<SearchedMovie>>,
    pull_guard: tokio::sync::Mutex<()>,
}

impl MovieController {
    /// Create a new controller from validated configuration and a shared
    /// database handle
    pub fn new(config: &Config, db: Arc<Mutex<Database>>) -> MovieResult<Self> {
        let timeout = config.request_timeout_secs();
        let remote = RemoteStore::new(config.base_url().clone(), timeout)?;
        let search_client =
            SearchClient::new(config.search_endpoint().clone(), config.api_key(), timeout)?;

        Ok(Self {
            db,
            remote,
            search_client,
            searched_movies: Mutex::new(Vec::new()),
            pull_guard: tokio::sync::Mutex::new(()),
        })
    }

    /// Shared handle to the local store
    pub fn database(&self) -> Arc<Mutex<Database>> {
        self.db.clone()
    }

    /// Search the external provider and cache the results.
    ///
    /// On success the previous result set is replaced wholesale; on
    /// failure the cache keeps the prior results.
    pub async fn search(&self, term: &str) -> MovieResult<Vec<SearchedMovie>> {
        let results = self.search_client.search(term).await?;
        *self.searched_movies.lock().unwrap() = results.clone();
        Ok(results)
    }

    /// Snapshot of the current search result cache
    pub fn searched_movies(&self) -> Vec<SearchedMovie> {
        self.searched_movies.lock().unwrap().clone()
    }

    /// Push one local movie to the remote store.
    ///
    /// The movie must already carry its identifier (assigned at local
    /// creation); without one this fails before any network call.
    pub async fn push(&self, movie: &Movie) -> MovieResult<()> {
        if movie.identifier.is_none() {
            return Err(MovieError::NoIdentifier);
        }
        let representation = movie.representation().ok_or_else(|| {
            MovieError::FailedEncode(format!(
                "movie '{}' has no wire representation",
                movie.title
            ))
        })?;
        self.remote.put_movie(&representation).await
    }

    /// Pull the remote snapshot and merge it into the local store.
    ///
    /// Concurrent pulls serialize behind the guard; a second caller waits
    /// for the first pass to commit and then runs against the merged
    /// state.
    pub async fn pull(&self) -> MovieResult<ReconcileSummary> {
        let _guard = self.pull_guard.lock().await;
        Reconciler::new(self.db.clone(), &self.remote).reconcile().await
    }

    /// Delete one movie's document from the remote store.
    ///
    /// The local copy is untouched; local deletion is a separate,
    /// explicit store operation.
    pub async fn delete_remote(&self, movie: &Movie) -> MovieResult<()> {
        let id = movie.identifier.ok_or(MovieError::NoIdentifier)?;
        self.remote.delete_movie(&id).await
    }
}
