//! Input validation for MovieCore.
//!
//! This module provides validation functions for user inputs and wire
//! payloads. All validators return MovieError::Validation on failure.

use uuid::Uuid;

use crate::error::{MovieError, MovieResult};

// Limits
pub const MAX_TITLE_LENGTH: usize = 500;
pub const MAX_SEARCH_TERM_LENGTH: usize = 500;

/// Validate a movie title.
///
/// Titles must be non-empty (after trimming) and within the length cap.
pub fn validate_title(value: &str) -> MovieResult<()> {
    if value.trim().is_empty() {
        return Err(MovieError::validation("title", "must not be empty"));
    }
    if value.len() > MAX_TITLE_LENGTH {
        return Err(MovieError::validation(
            "title",
            format!(
                "must be at most {} bytes, got {}",
                MAX_TITLE_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Validate an identifier string from the wire (hyphenated UUID).
pub fn validate_identifier(value: &str, field_name: &str) -> MovieResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| {
        MovieError::validation(field_name, format!("invalid UUID '{}': {}", value, e))
    })
}

/// Validate a search term before building the provider query.
pub fn validate_search_term(value: &str) -> MovieResult<()> {
    if value.trim().is_empty() {
        return Err(MovieError::validation("search_term", "must not be empty"));
    }
    if value.len() > MAX_SEARCH_TERM_LENGTH {
        return Err(MovieError::validation(
            "search_term",
            format!(
                "must be at most {} bytes, got {}",
                MAX_SEARCH_TERM_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_title() {
        assert!(validate_title("Alien").is_ok());
    }

    #[test]
    fn test_empty_title() {
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn test_overlong_title() {
        let long = "a".repeat(MAX_TITLE_LENGTH + 1);
        assert!(validate_title(&long).is_err());
    }

    #[test]
    fn test_valid_identifier() {
        let id = Uuid::new_v4();
        let parsed = validate_identifier(&id.to_string(), "identifier").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_invalid_identifier() {
        let err = validate_identifier("garbage", "identifier").unwrap_err();
        assert!(matches!(err, MovieError::Validation { .. }));
    }

    #[test]
    fn test_search_term() {
        assert!(validate_search_term("blade runner").is_ok());
        assert!(validate_search_term("").is_err());
    }
}
