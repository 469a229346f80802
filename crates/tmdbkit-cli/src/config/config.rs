//! `AppConfig` struct and TOML read/write.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tmdbkit_api::tmdb::TmdbClientBuilder;
use url::Url;

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB client settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// TMDB client defaults.
///
/// The bearer token is not stored here; it is read from
/// `TMDB_API_TOKEN` at runtime.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TmdbConfig {
    /// Default response language (e.g. "en-US").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Default region (ISO 3166-1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Base URL override (e.g. a local proxy).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}

impl TmdbConfig {
    /// Applies these settings to a client builder.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL.
    pub fn apply(&self, mut builder: TmdbClientBuilder) -> Result<TmdbClientBuilder> {
        if let Some(ref language) = self.language {
            builder = builder.language(language);
        }
        if let Some(ref region) = self.region {
            builder = builder.region(region);
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(ref base_url) = self.base_url {
            let url = Url::parse(base_url)
                .with_context(|| format!("invalid tmdb.base_url: {base_url}"))?;
            builder = builder.base_url(url);
        }
        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use tmdbkit_api::tmdb::TmdbClient;

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert!(config.tmdb.language.is_none());
        assert!(config.tmdb.timeout_secs.is_none());
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        // Arrange
        let config = AppConfig {
            tmdb: TmdbConfig {
                language: Some(String::from("ja-JP")),
                region: Some(String::from("JP")),
                timeout_secs: Some(5),
                base_url: None,
            },
        };

        // Act
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        // Assert
        assert_eq!(parsed, config);
        assert!(!toml_str.contains("base_url"));
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            tmdb: TmdbConfig {
                language: Some(String::from("en-US")),
                ..TmdbConfig::default()
            },
        };

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb]\nregion = \"GB\"\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.tmdb.region.as_deref(), Some("GB"));
        assert!(config.tmdb.language.is_none());
    }

    #[test]
    fn test_load_invalid_toml_is_error() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb\n").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.unwrap_err().to_string().contains("failed to parse"));
    }

    #[test]
    fn test_apply_sets_client_defaults() {
        // Arrange
        let config = TmdbConfig {
            language: Some(String::from("de-DE")),
            region: Some(String::from("DE")),
            timeout_secs: Some(3),
            base_url: Some(String::from("http://localhost:9999/")),
        };

        // Act
        let client = config
            .apply(TmdbClient::builder().api_token("t"))
            .unwrap()
            .build()
            .unwrap();

        // Assert
        assert_eq!(client.defaults().language.as_deref(), Some("de-DE"));
        assert_eq!(client.defaults().region.as_deref(), Some("DE"));
        assert_eq!(client.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_apply_rejects_bad_base_url() {
        // Arrange
        let config = TmdbConfig {
            base_url: Some(String::from("not a url")),
            ..TmdbConfig::default()
        };

        // Act
        let result = config.apply(TmdbClient::builder());

        // Assert
        assert!(result.unwrap_err().to_string().contains("tmdb.base_url"));
    }
}
