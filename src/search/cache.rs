//! On-disk cache of built search indexes, keyed by document and config fingerprint.

use super::index::{IndexConfig, SearchIndex};
use crate::store::DocumentStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use xxhash_rust::xxh3::Xxh3;

/// Bumped whenever tokenization or scoring changes, so older files are ignored.
const CACHE_FORMAT: u32 = 2;

#[derive(Serialize, Deserialize)]
struct CachedIndex {
    format: u32,
    key: u64,
    index: SearchIndex,
}

/// Directory of postcard-encoded indexes named `index-<key>.bin`.
#[derive(Debug, Clone)]
pub struct IndexCache {
    dir: PathBuf,
}

impl IndexCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<cache_dir>/sitesearch` on this platform, if it has one.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join("sitesearch"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Key identifying the index a store and config would produce.
    pub fn key(store: &DocumentStore, config: &IndexConfig) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.update(&CACHE_FORMAT.to_le_bytes());
        hasher.update(&store.fingerprint().to_le_bytes());
        hasher.update(&config.title_boost.to_le_bytes());
        hasher.update(&config.content_boost.to_le_bytes());
        hasher.digest()
    }

    fn path_for(&self, key: u64) -> PathBuf {
        self.dir.join(format!("index-{:016x}.bin", key))
    }

    /// Loads the cached index for this store, or builds and caches a new one.
    ///
    /// Cache failures are logged and never prevent a usable index from being returned.
    pub async fn load_or_build(&self, store: &DocumentStore, config: &IndexConfig) -> SearchIndex {
        let key = Self::key(store, config);
        let path = self.path_for(key);

        if let Some(index) = Self::load(&path, key).await {
            tracing::debug!(
                "Loaded cached search index ({} terms, {} docs) from {}",
                index.term_count(),
                index.document_count(),
                path.display()
            );
            return index;
        }

        tracing::info!("Building search index for {} documents", store.len());
        let index = SearchIndex::build(store, config);
        self.store(&path, key, &index).await;
        index
    }

    /// Load a cached index from disk, deleting it if it is unreadable or stale.
    async fn load(path: &Path, key: u64) -> Option<SearchIndex> {
        let bytes = tokio::fs::read(path).await.ok()?;

        // Deserialize in spawn_blocking since it's CPU intensive
        let decoded = tokio::task::spawn_blocking(move || {
            postcard::from_bytes::<CachedIndex>(&bytes)
        })
        .await
        .ok()?;

        match decoded {
            Ok(cached) if cached.format == CACHE_FORMAT && cached.key == key => Some(cached.index),
            Ok(_) => {
                tracing::info!("Cached index at {} is stale, rebuilding", path.display());
                let _ = tokio::fs::remove_file(path).await;
                None
            }
            Err(e) => {
                tracing::warn!("Failed to deserialize cached index at {}: {}", path.display(), e);
                let _ = tokio::fs::remove_file(path).await;
                None
            }
        }
    }

    /// Store an index to disk. Writes to a temporary file first so readers never
    /// see a partial index.
    async fn store(&self, path: &Path, key: u64, index: &SearchIndex) {
        let cached = CachedIndex {
            format: CACHE_FORMAT,
            key,
            index: index.clone(),
        };

        let bytes = match tokio::task::spawn_blocking(move || postcard::to_stdvec(&cached)).await {
            Ok(Ok(bytes)) => bytes,
            Ok(Err(e)) => {
                tracing::warn!("Failed to encode search index: {}", e);
                return;
            }
            Err(e) => {
                tracing::warn!("Index encoding task failed: {}", e);
                return;
            }
        };

        if let Err(e) = tokio::fs::create_dir_all(&self.dir).await {
            tracing::warn!("Failed to create cache directory {}: {}", self.dir.display(), e);
            return;
        }

        let tmp = path.with_extension(format!("tmp{}", std::process::id()));
        let written = match tokio::fs::write(&tmp, &bytes).await {
            Ok(()) => tokio::fs::rename(&tmp, path).await,
            Err(e) => Err(e),
        };

        match written {
            Ok(()) => tracing::debug!("Cached search index to {}", path.display()),
            Err(e) => {
                tracing::warn!("Failed to write search index to {}: {}", path.display(), e);
                let _ = tokio::fs::remove_file(&tmp).await;
            }
        }
    }
}
