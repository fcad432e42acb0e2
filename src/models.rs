//! Data models for MovieCore.
//!
//! This module defines the core entities: the locally persisted `Movie`,
//! its wire form `MovieRepresentation`, and the transient `SearchedMovie`
//! returned by the search provider.
//!
//! Movie identifiers are UUID4, assigned once at local creation and never
//! reassigned. On the wire they travel as hyphenated strings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a movie in the local collection.
///
/// The identifier is `None` only for detached values that were never
/// created through the store; every persisted movie carries one.
/// Not a wire type: `MovieRepresentation` is what goes over the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    /// Unique identifier (UUID4), assigned at creation
    pub identifier: Option<Uuid>,
    /// Display title (non-empty)
    pub title: String,
    /// Whether the user has watched this movie
    pub has_watched: bool,
}

impl Movie {
    /// Create a new movie with a freshly generated identifier
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            identifier: Some(Uuid::new_v4()),
            title: title.into(),
            has_watched: false,
        }
    }

    /// Get the identifier as a hyphenated string (if present)
    pub fn identifier_string(&self) -> Option<String> {
        self.identifier.map(|id| id.to_string())
    }

    /// Build the wire representation of this movie.
    ///
    /// Returns `None` when the movie has no identifier or an empty title;
    /// such a movie is unrepresentable on the wire and must not be pushed.
    pub fn representation(&self) -> Option<MovieRepresentation> {
        let identifier = self.identifier?;
        if self.title.is_empty() {
            return None;
        }
        Some(MovieRepresentation {
            identifier: identifier.to_string(),
            title: self.title.clone(),
            has_watched: self.has_watched,
        })
    }
}

/// Wire form of a movie as stored by the remote document service.
///
/// The remote store keys documents by the identifier's string form, so a
/// representation read back with an unparseable identifier cannot be
/// correlated to any local movie and is skipped during merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRepresentation {
    /// String form of the movie's UUID
    pub identifier: String,
    /// Display title
    pub title: String,
    /// Watched flag
    #[serde(rename = "hasWatched")]
    pub has_watched: bool,
}

impl MovieRepresentation {
    /// Parse the identifier back into a UUID, if well-formed
    pub fn parsed_identifier(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.identifier).ok()
    }

    /// Materialize a local movie from this representation, keeping the
    /// remote-provided identifier.
    ///
    /// Returns `None` when the identifier does not parse.
    pub fn to_movie(&self) -> Option<Movie> {
        let identifier = self.parsed_identifier()?;
        Some(Movie {
            identifier: Some(identifier),
            title: self.title.clone(),
            has_watched: self.has_watched,
        })
    }
}

/// A movie returned by the external search provider.
///
/// Not yet part of the local collection; the user picks one and the
/// presentation layer creates a `Movie` from its title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchedMovie {
    /// Display title
    pub title: String,
    /// Provider's own numeric id
    pub id: Option<i64>,
    /// Plot summary
    #[serde(default)]
    pub overview: Option<String>,
    /// Release date as provided ("YYYY-MM-DD")
    #[serde(default)]
    pub release_date: Option<String>,
    /// Relative poster image path
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Average user rating
    #[serde(default)]
    pub vote_average: Option<f64>,
}

/// Envelope for the search provider's response body
#[derive(Debug, Deserialize)]
pub struct SearchResults {
    pub results: Vec<SearchedMovie>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_creation() {
        let movie = Movie::new("Alien");

        assert!(movie.identifier.is_some());
        assert_eq!(movie.title, "Alien");
        assert!(!movie.has_watched);
    }

    #[test]
    fn test_representation_round_trip() {
        let movie = Movie::new("Alien");
        let rep = movie.representation().unwrap();

        assert_eq!(rep.identifier, movie.identifier.unwrap().to_string());
        assert_eq!(rep.title, "Alien");
        assert!(!rep.has_watched);

        let back = rep.to_movie().unwrap();
        assert_eq!(back, movie);
    }

    #[test]
    fn test_representation_requires_identifier() {
        let movie = Movie {
            identifier: None,
            title: "Alien".to_string(),
            has_watched: false,
        };
        assert!(movie.representation().is_none());
    }

    #[test]
    fn test_representation_requires_title() {
        let movie = Movie {
            identifier: Some(Uuid::new_v4()),
            title: String::new(),
            has_watched: true,
        };
        assert!(movie.representation().is_none());
    }

    #[test]
    fn test_wire_field_name() {
        let movie = Movie::new("Alien");
        let json = serde_json::to_string(&movie.representation().unwrap()).unwrap();
        assert!(json.contains("\"hasWatched\":false"));
    }

    #[test]
    fn test_unparseable_identifier() {
        let rep = MovieRepresentation {
            identifier: "not-a-uuid".to_string(),
            title: "Alien".to_string(),
            has_watched: false,
        };
        assert!(rep.parsed_identifier().is_none());
        assert!(rep.to_movie().is_none());
    }

    #[test]
    fn test_search_results_decode() {
        let body = r#"{"results":[{"id":348,"title":"Alien","overview":"In space...","release_date":"1979-05-25","poster_path":"/alien.jpg","vote_average":8.1}]}"#;
        let parsed: SearchResults = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].title, "Alien");
        assert_eq!(parsed.results[0].id, Some(348));
    }
}
