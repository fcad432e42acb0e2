//! Configuration management for MovieCore.
//!
//! This module handles loading and saving application configuration
//! to/from a JSON file. The config directory can be customized.
//!
//! Endpoint URLs are parsed and validated once at load time; an invalid
//! URL is a startup error, never a crash deep in a request path.

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{MovieError, MovieResult};

fn default_base_url() -> String {
    "https://mymovies-6e344.firebaseio.com/".to_string()
}

fn default_search_endpoint() -> String {
    "https://api.themoviedb.org/3/search/movie".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Remote document store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the remote document store
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Search provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search endpoint URL
    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,
    /// Access credential sent as the api_key query parameter
    #[serde(default)]
    pub api_key: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_search_endpoint(),
            api_key: String::new(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigData {
    /// Path to the database file
    #[serde(default)]
    pub database_file: String,
    /// Remote document store settings
    #[serde(default)]
    pub remote: RemoteConfig,
    /// Search provider settings
    #[serde(default)]
    pub search: SearchConfig,
    /// Per-request timeout in seconds (single attempt, no retry)
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ConfigData {
    fn default() -> Self {
        Self {
            database_file: String::new(),
            remote: RemoteConfig::default(),
            search: SearchConfig::default(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

/// Configuration manager
#[derive(Debug)]
pub struct Config {
    config_dir: PathBuf,
    config_file: PathBuf,
    data: ConfigData,
    base_url: Url,
    search_endpoint: Url,
}

impl Config {
    /// Create a new configuration manager rooted at `config_dir`.
    ///
    /// Loads `config.json` if present, otherwise writes defaults.
    /// Fails fast with `MovieError::Config` when either endpoint URL
    /// does not parse.
    pub fn new(config_dir: PathBuf) -> MovieResult<Self> {
        fs::create_dir_all(&config_dir)?;
        let config_file = config_dir.join("config.json");

        let data = if config_file.exists() {
            let content = fs::read_to_string(&config_file)?;
            serde_json::from_str(&content)
                .map_err(|e| MovieError::Config(format!("invalid config file: {}", e)))?
        } else {
            let mut default = ConfigData::default();
            default.database_file = config_dir.join("movies.db").to_string_lossy().to_string();
            default
        };

        let base_url = Url::parse(&data.remote.base_url).map_err(|e| {
            MovieError::Config(format!(
                "invalid remote base_url '{}': {}",
                data.remote.base_url, e
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(MovieError::Config(format!(
                "remote base_url '{}' cannot be used as a base URL",
                data.remote.base_url
            )));
        }

        let search_endpoint = Url::parse(&data.search.endpoint).map_err(|e| {
            MovieError::Config(format!(
                "invalid search endpoint '{}': {}",
                data.search.endpoint, e
            ))
        })?;
        if search_endpoint.cannot_be_a_base() {
            return Err(MovieError::Config(format!(
                "search endpoint '{}' cannot be used as a base URL",
                data.search.endpoint
            )));
        }

        let config = Self {
            config_dir,
            config_file,
            data,
            base_url,
            search_endpoint,
        };

        // Save default config if it doesn't exist
        if !config.config_file.exists() {
            config.save()?;
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> MovieResult<()> {
        let content = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.config_file, content)?;
        Ok(())
    }

    /// Get the configuration directory path
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Get the database file path
    pub fn database_file(&self) -> &str {
        &self.data.database_file
    }

    /// Set the database file path
    pub fn set_database_file(&mut self, path: &str) -> MovieResult<()> {
        self.data.database_file = path.to_string();
        self.save()
    }

    /// Get the validated remote store base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the validated search endpoint URL
    pub fn search_endpoint(&self) -> &Url {
        &self.search_endpoint
    }

    /// Get the search provider access credential
    pub fn api_key(&self) -> &str {
        &self.data.search.api_key
    }

    /// Set the search provider access credential
    pub fn set_api_key(&mut self, key: &str) -> MovieResult<()> {
        self.data.search.api_key = key.to_string();
        self.save()
    }

    /// Get the per-request timeout in seconds
    pub fn request_timeout_secs(&self) -> u64 {
        self.data.request_timeout_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::new(temp_dir.path().to_path_buf()).unwrap();

        assert!(config.database_file().ends_with("movies.db"));
        assert_eq!(config.request_timeout_secs(), 30);
        assert_eq!(config.base_url().scheme(), "https");
        assert!(config.api_key().is_empty());
    }

    #[test]
    fn test_config_persistence() {
        let temp_dir = TempDir::new().unwrap();

        {
            let mut config = Config::new(temp_dir.path().to_path_buf()).unwrap();
            config.set_api_key("secret").unwrap();
        }

        {
            let config = Config::new(temp_dir.path().to_path_buf()).unwrap();
            assert_eq!(config.api_key(), "secret");
        }
    }

    #[test]
    fn test_invalid_base_url_fails_fast() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.json");
        fs::write(
            &config_file,
            r#"{"remote": {"base_url": "not a url"}}"#,
        )
        .unwrap();

        let err = Config::new(temp_dir.path().to_path_buf()).unwrap_err();
        assert!(matches!(err, MovieError::Config(_)));
    }

    #[test]
    fn test_cannot_be_a_base_url_fails_fast() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.json");
        fs::write(
            &config_file,
            r#"{"search": {"endpoint": "mailto:nobody@example.com"}}"#,
        )
        .unwrap();

        let err = Config::new(temp_dir.path().to_path_buf()).unwrap_err();
        assert!(matches!(err, MovieError::Config(_)));
    }

    #[test]
    fn test_malformed_config_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("config.json"), "{not json").unwrap();

        let err = Config::new(temp_dir.path().to_path_buf()).unwrap_err();
        assert!(matches!(err, MovieError::Config(_)));
    }
}
