//! Reconciliation between the local collection and the remote snapshot.
//!
//! This is the merge core. One pass fetches the full remote mapping,
//! correlates it with local movies by identifier, and applies the result
//! in a single transaction:
//!
//! - present on both sides: remote field values overwrite local ones
//!   unconditionally (remote-wins; the remote store has no per-record
//!   versioning to compare against)
//! - present only remotely: a local movie is created under the
//!   remote-provided identifier, which is what keeps re-runs idempotent
//! - present only locally: left untouched; absence from the snapshot is
//!   never a deletion signal
//!
//! Documents whose identifier does not parse are skipped with a warning;
//! they cannot be correlated to anything. Failure of the remote fetch
//! aborts the pass before any local mutation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::database::Database;
use crate::error::MovieResult;
use crate::models::{Movie, MovieRepresentation};
use crate::remote::RemoteStore;

/// Outcome of one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Local movies overwritten from their remote copy
    pub updated: usize,
    /// Local movies created from remote-only documents
    pub created: usize,
    /// Remote documents skipped for an unparseable identifier
    pub skipped: usize,
}

/// Runs reconciliation passes against one local store and one remote
pub struct Reconciler<'a> {
    db: Arc<Mutex<Database>>,
    remote: &'a RemoteStore,
}

impl<'a> Reconciler<'a> {
    /// Create a reconciler over the given store and remote client
    pub fn new(db: Arc<Mutex<Database>>, remote: &'a RemoteStore) -> Self {
        Self { db, remote }
    }

    /// Run one full reconciliation pass.
    ///
    /// All-or-nothing: a failed remote read returns before the store is
    /// touched, and the local writes land in one transaction or not at
    /// all. An empty remote collection is a vacuous success.
    pub async fn reconcile(&self) -> MovieResult<ReconcileSummary> {
        let documents = self.remote.fetch_all().await?;
        let (remote_by_id, skipped) = Self::index_by_identifier(documents);

        if remote_by_id.is_empty() {
            return Ok(ReconcileSummary {
                skipped,
                ..Default::default()
            });
        }

        let ids: Vec<Uuid> = remote_by_id.keys().copied().collect();

        let mut db = self.db.lock().unwrap();
        let existing = db.get_movies_by_ids(&ids)?;

        let mut remaining = remote_by_id;
        let mut updates = Vec::with_capacity(existing.len());
        for movie in existing {
            let Some(id) = movie.identifier else { continue };
            if let Some(rep) = remaining.remove(&id) {
                updates.push(Movie {
                    identifier: Some(id),
                    title: rep.title,
                    has_watched: rep.has_watched,
                });
            }
        }

        // Whatever is left has no local counterpart; create it under the
        // remote-provided identifier.
        let creations: Vec<Movie> = remaining.into_values().filter_map(|rep| rep.to_movie()).collect();

        db.apply_remote_batch(&updates, &creations)?;

        Ok(ReconcileSummary {
            updated: updates.len(),
            created: creations.len(),
            skipped,
        })
    }

    /// Build the identifier-keyed batch from one raw remote mapping.
    ///
    /// Unparseable identifiers are logged and dropped. Two string keys
    /// that parse to the same UUID collapse to one entry, an arbitrary
    /// one of the two (such a payload is a precondition violation; the
    /// remote store is keyed by identifier and cannot hold true
    /// duplicates).
    fn index_by_identifier(
        documents: HashMap<String, MovieRepresentation>,
    ) -> (HashMap<Uuid, MovieRepresentation>, usize) {
        let mut by_id = HashMap::with_capacity(documents.len());
        let mut skipped = 0;

        for (key, rep) in documents {
            match rep.parsed_identifier() {
                Some(id) => {
                    by_id.insert(id, rep);
                }
                None => {
                    tracing::warn!(
                        "Skipping remote document '{}': unparseable identifier '{}'",
                        key,
                        rep.identifier
                    );
                    skipped += 1;
                }
            }
        }

        (by_id, skipped)
    }
}
