//! MovieCore - Rust implementation of the MyMovies application core.
//!
//! This library provides the core functionality for MyMovies:
//! - Data models (Movie, MovieRepresentation, SearchedMovie)
//! - Local database operations (SQLite)
//! - Remote document store client (pull/push/delete)
//! - Reconciliation between local and remote state (remote-wins)
//! - Search provider integration
//! - Configuration management
//!
//! This is a pure Rust library designed to sit underneath a presentation
//! layer; it renders nothing and starts no runtime of its own. All
//! remote operations are async and single-attempt, and every failure is
//! reported as a `MovieResult` value, never a panic.

pub mod config;
pub mod controller;
pub mod database;
pub mod error;
pub mod models;
pub mod reconcile;
pub mod remote;
pub mod search;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use controller::MovieController;
pub use database::Database;
pub use error::{MovieError, MovieResult};
pub use models::{Movie, MovieRepresentation, SearchedMovie};
pub use reconcile::{ReconcileSummary, Reconciler};
