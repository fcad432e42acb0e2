//! Database operations for MovieCore.
//!
//! This module provides all local data access using SQLite. It owns the
//! canonical on-device collection of movies.
//!
//! UUIDs are stored as BLOB (16 bytes). Reconciliation writes go through
//! `apply_remote_batch`, which commits the whole batch in one transaction
//! so concurrent readers never observe a partially applied merge.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::error::{MovieError, MovieResult};
use crate::models::Movie;
use crate::validation::validate_title;

/// Database wrapper for SQLite operations
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create a new database connection
    pub fn new<P: AsRef<Path>>(db_path: P) -> MovieResult<Self> {
        let conn = Connection::open(db_path)?;

        // Enable WAL mode for better concurrent access
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        let db = Self { conn };
        db.init_database()?;
        Ok(db)
    }

    /// Create an in-memory database (for testing)
    pub fn new_in_memory() -> MovieResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init_database()?;
        Ok(db)
    }

    /// Initialize database schema
    fn init_database(&self) -> MovieResult<()> {
        self.conn.execute_batch(
            r#"
            -- Movies table with UUID4 BLOB primary key
            CREATE TABLE IF NOT EXISTS movies (
                id BLOB PRIMARY KEY,
                title TEXT NOT NULL,
                has_watched INTEGER NOT NULL DEFAULT 0
            );
            "#,
        )?;
        Ok(())
    }

    fn movie_from_row(row: &Row) -> rusqlite::Result<Movie> {
        let id_bytes: Vec<u8> = row.get(0)?;
        let identifier = Uuid::from_slice(&id_bytes).ok();
        Ok(Movie {
            identifier,
            title: row.get(1)?,
            has_watched: row.get::<_, i64>(2)? != 0,
        })
    }

    /// Create and persist a new movie with a fresh identifier
    pub fn add_movie(&self, title: &str) -> MovieResult<Movie> {
        validate_title(title)?;
        let movie = Movie::new(title);
        let id = movie.identifier.ok_or(MovieError::NoIdentifier)?;

        self.conn.execute(
            "INSERT INTO movies (id, title, has_watched) VALUES (?1, ?2, ?3)",
            params![id.as_bytes().as_slice(), movie.title, movie.has_watched as i64],
        )?;

        Ok(movie)
    }

    /// Get all movies, ordered by title
    pub fn get_all_movies(&self) -> MovieResult<Vec<Movie>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, has_watched FROM movies ORDER BY title")?;
        let movies = stmt
            .query_map([], Self::movie_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(movies)
    }

    /// Get a single movie by identifier
    pub fn get_movie(&self, id: &Uuid) -> MovieResult<Option<Movie>> {
        let movie = self
            .conn
            .query_row(
                "SELECT id, title, has_watched FROM movies WHERE id = ?1",
                params![id.as_bytes().as_slice()],
                Self::movie_from_row,
            )
            .optional()?;
        Ok(movie)
    }

    /// Get all movies whose identifier is in the given set.
    ///
    /// One query with an IN clause; this is the batch correlation used by
    /// reconciliation, not N individual lookups.
    pub fn get_movies_by_ids(&self, ids: &[Uuid]) -> MovieResult<Vec<Movie>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT id, title, has_watched FROM movies WHERE id IN ({})",
            placeholders
        );

        let id_blobs: Vec<Vec<u8>> = ids.iter().map(|id| id.as_bytes().to_vec()).collect();
        let mut stmt = self.conn.prepare(&sql)?;
        let movies = stmt
            .query_map(rusqlite::params_from_iter(id_blobs.iter()), Self::movie_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(movies)
    }

    /// Count movies in the collection
    pub fn count_movies(&self) -> MovieResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Set the watched flag on a movie
    pub fn set_watched(&self, id: &Uuid, has_watched: bool) -> MovieResult<bool> {
        let changed = self.conn.execute(
            "UPDATE movies SET has_watched = ?1 WHERE id = ?2",
            params![has_watched as i64, id.as_bytes().as_slice()],
        )?;
        Ok(changed > 0)
    }

    /// Delete a movie from the local collection.
    ///
    /// Local deletion is always an explicit request from the caller; it is
    /// never inferred from a movie being absent in the remote snapshot.
    pub fn delete_movie(&self, id: &Uuid) -> MovieResult<bool> {
        let deleted = self.conn.execute(
            "DELETE FROM movies WHERE id = ?1",
            params![id.as_bytes().as_slice()],
        )?;
        Ok(deleted > 0)
    }

    /// Apply one reconciliation batch in a single transaction.
    ///
    /// `updates` overwrite title and watched flag of existing rows;
    /// `creations` insert new rows under their remote-provided identifier.
    /// On any failure the transaction rolls back and the committed state
    /// is left exactly as it was.
    pub fn apply_remote_batch(
        &mut self,
        updates: &[Movie],
        creations: &[Movie],
    ) -> MovieResult<()> {
        let tx = self.conn.transaction()?;

        for movie in updates {
            let id = movie.identifier.ok_or(MovieError::NoIdentifier)?;
            tx.execute(
                "UPDATE movies SET title = ?1, has_watched = ?2 WHERE id = ?3",
                params![
                    movie.title,
                    movie.has_watched as i64,
                    id.as_bytes().as_slice()
                ],
            )
            .map_err(|e| MovieError::save_failed(e.to_string()))?;
        }

        for movie in creations {
            let id = movie.identifier.ok_or(MovieError::NoIdentifier)?;
            tx.execute(
                "INSERT INTO movies (id, title, has_watched) VALUES (?1, ?2, ?3)",
                params![
                    id.as_bytes().as_slice(),
                    movie.title,
                    movie.has_watched as i64
                ],
            )
            .map_err(|e| MovieError::save_failed(e.to_string()))?;
        }

        tx.commit()
            .map_err(|e| MovieError::save_failed(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get_movie() {
        let db = Database::new_in_memory().unwrap();
        let movie = db.add_movie("Alien").unwrap();

        let fetched = db.get_movie(&movie.identifier.unwrap()).unwrap().unwrap();
        assert_eq!(fetched, movie);
    }

    #[test]
    fn test_add_movie_rejects_empty_title() {
        let db = Database::new_in_memory().unwrap();
        assert!(db.add_movie("").is_err());
        assert_eq!(db.count_movies().unwrap(), 0);
    }

    #[test]
    fn test_get_all_movies_ordered() {
        let db = Database::new_in_memory().unwrap();
        db.add_movie("Zodiac").unwrap();
        db.add_movie("Alien").unwrap();

        let all = db.get_all_movies().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title, "Alien");
        assert_eq!(all[1].title, "Zodiac");
    }

    #[test]
    fn test_get_movies_by_ids() {
        let db = Database::new_in_memory().unwrap();
        let a = db.add_movie("Alien").unwrap();
        let b = db.add_movie("Blade Runner").unwrap();
        db.add_movie("Casablanca").unwrap();

        let ids = [a.identifier.unwrap(), b.identifier.unwrap()];
        let mut fetched = db.get_movies_by_ids(&ids).unwrap();
        fetched.sort_by(|x, y| x.title.cmp(&y.title));

        assert_eq!(fetched.len(), 2);
        assert_eq!(fetched[0].title, "Alien");
        assert_eq!(fetched[1].title, "Blade Runner");
    }

    #[test]
    fn test_get_movies_by_ids_empty_set() {
        let db = Database::new_in_memory().unwrap();
        db.add_movie("Alien").unwrap();
        assert!(db.get_movies_by_ids(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_set_watched() {
        let db = Database::new_in_memory().unwrap();
        let movie = db.add_movie("Alien").unwrap();
        let id = movie.identifier.unwrap();

        assert!(db.set_watched(&id, true).unwrap());
        assert!(db.get_movie(&id).unwrap().unwrap().has_watched);

        // Unknown id changes nothing
        assert!(!db.set_watched(&Uuid::new_v4(), true).unwrap());
    }

    #[test]
    fn test_delete_movie() {
        let db = Database::new_in_memory().unwrap();
        let movie = db.add_movie("Alien").unwrap();
        let id = movie.identifier.unwrap();

        assert!(db.delete_movie(&id).unwrap());
        assert!(db.get_movie(&id).unwrap().is_none());
        assert!(!db.delete_movie(&id).unwrap());
    }

    #[test]
    fn test_apply_remote_batch() {
        let mut db = Database::new_in_memory().unwrap();
        let existing = db.add_movie("Alien").unwrap();

        let mut updated = existing.clone();
        updated.title = "Alien (1979)".to_string();
        updated.has_watched = true;

        let created = Movie::new("Blade Runner");
        db.apply_remote_batch(&[updated.clone()], &[created.clone()])
            .unwrap();

        assert_eq!(db.count_movies().unwrap(), 2);
        let fetched = db
            .get_movie(&existing.identifier.unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(fetched.title, "Alien (1979)");
        assert!(fetched.has_watched);
        assert!(db
            .get_movie(&created.identifier.unwrap())
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_apply_remote_batch_rolls_back_on_failure() {
        let mut db = Database::new_in_memory().unwrap();
        db.add_movie("Alien").unwrap();

        // Second creation violates the primary key, failing the batch
        // mid-way; nothing from the batch may survive.
        let dup = Movie::new("Blade Runner");
        let err = db
            .apply_remote_batch(&[], &[dup.clone(), dup.clone()])
            .unwrap_err();
        assert!(matches!(err, MovieError::SaveFailed(_)));

        assert_eq!(db.count_movies().unwrap(), 1);
        assert!(db.get_movie(&dup.identifier.unwrap()).unwrap().is_none());
    }
}
