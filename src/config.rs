//! TOML configuration.
//!
//! ```toml
//! documents = "public/search.json"
//! base_url = "https://docs.example.org"
//!
//! [index]
//! title_boost = 10.0
//! content_boost = 1.0
//!
//! [typeahead]
//! min_length = 1
//! limit = 3
//! display = "title"
//!
//! [query]
//! on_dangling = "skip"
//! cache_size = 128
//! ```
//!
//! Every key is optional.

use crate::adapter::DanglingPolicy;
use crate::error::Result;
use crate::search::{IndexCache, IndexConfig};
use crate::typeahead::TypeaheadConfig;
use anyhow::{Context, ensure};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// JSON file holding the site's document array
    pub documents: Option<PathBuf>,
    /// Prefix for site-relative urls when navigating
    pub base_url: Option<String>,
    /// Where built indexes are cached; defaults to the platform cache directory
    pub cache_dir: Option<PathBuf>,
    pub index: IndexConfig,
    pub typeahead: TypeaheadConfig,
    pub query: QueryConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub on_dangling: DanglingPolicy,
    /// Number of recent queries whose results are kept; 0 disables the cache
    pub cache_size: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            on_dangling: DanglingPolicy::Skip,
            cache_size: 128,
        }
    }
}

impl Config {
    /// `<config_dir>/sitesearch/config.toml` on this platform.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sitesearch").join("config.toml"))
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`, or from the default location when it
    /// exists, or falls back to defaults.
    ///
    /// A relative `documents` or `cache_dir` path is taken relative to the
    /// configuration file.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if tokio::fs::try_exists(&path).await.unwrap_or(false) => path,
                _ => {
                    tracing::debug!("No configuration file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let text = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read configuration at {}", path.display()))?;
        let mut config = Self::from_toml(&text)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.documents = config.documents.map(|p| base.join(p));
            config.cache_dir = config.cache_dir.map(|p| base.join(p));
        }

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.typeahead.limit >= 1, "typeahead.limit must be at least 1");
        ensure!(
            self.typeahead.min_length >= 1,
            "typeahead.min_length must be at least 1"
        );
        ensure!(
            self.index.title_boost > 0.0 && self.index.content_boost > 0.0,
            "index boosts must be positive"
        );
        Ok(())
    }

    /// Configured cache directory, else the platform default.
    pub fn cache_dir(&self) -> Option<PathBuf> {
        self.cache_dir.clone().or_else(IndexCache::default_dir)
    }
}
