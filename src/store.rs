//! Insertion-ordered, url-keyed store of document records.

use crate::document::DocumentRecord;
use crate::error::StoreError;
use ahash::AHashMap;
use serde::Deserialize;
use std::collections::hash_map::Entry;
use std::path::Path;
use xxhash_rust::xxh3::Xxh3;

/// Immutable collection of the site's pages.
///
/// Records keep the order they were loaded in. Every url is non-empty and unique,
/// which is checked once when the store is built.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    records: Vec<DocumentRecord>,
    by_url: AHashMap<String, usize>,
}

/// On-disk layouts accepted by [`DocumentStore::load`].
#[derive(Deserialize)]
#[serde(untagged)]
enum StoreFile {
    Bare(Vec<DocumentRecord>),
    Wrapped { documents: Vec<DocumentRecord> },
}

impl DocumentStore {
    /// Builds a store, rejecting empty or duplicate urls.
    pub fn from_records(records: Vec<DocumentRecord>) -> Result<Self, StoreError> {
        let mut by_url = AHashMap::with_capacity(records.len());

        for (position, record) in records.iter().enumerate() {
            if record.url.is_empty() {
                return Err(StoreError::EmptyUrl { position });
            }
            match by_url.entry(record.url.clone()) {
                Entry::Occupied(existing) => {
                    return Err(StoreError::DuplicateUrl {
                        url: record.url.clone(),
                        first: *existing.get(),
                        second: position,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
            }
        }

        tracing::debug!("Document store holds {} records", records.len());
        Ok(Self { records, by_url })
    }

    /// Reads a JSON document array (bare, or under a `documents` key) from disk.
    pub async fn load(path: &Path) -> Result<Self, StoreError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let file: StoreFile =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let records = match file {
            StoreFile::Bare(records) | StoreFile::Wrapped { documents: records } => records,
        };

        tracing::info!("Loaded {} documents from {}", records.len(), path.display());
        Self::from_records(records)
    }

    /// Looks up the record whose url is exactly `url`.
    pub fn find_by_url(&self, url: &str) -> Option<&DocumentRecord> {
        self.position_of(url).map(|position| &self.records[position])
    }

    /// Position of the record with the given url, in load order.
    pub fn position_of(&self, url: &str) -> Option<usize> {
        self.by_url.get(url).copied()
    }

    pub fn get(&self, position: usize) -> Option<&DocumentRecord> {
        self.records.get(position)
    }

    /// Every record satisfying `predicate`, in load order.
    pub fn find_all<F>(&self, mut predicate: F) -> Vec<&DocumentRecord>
    where
        F: FnMut(&DocumentRecord) -> bool,
    {
        self.records.iter().filter(|record| predicate(record)).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DocumentRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Content hash of every record in order. Two stores with the same
    /// fingerprint produce the same index.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh3::new();
        for record in &self.records {
            for field in [&record.title, &record.content, &record.url] {
                hasher.update(&(field.len() as u64).to_le_bytes());
                hasher.update(field.as_bytes());
            }
        }
        hasher.digest()
    }
}

impl<'a> IntoIterator for &'a DocumentStore {
    type Item = &'a DocumentRecord;
    type IntoIter = std::slice::Iter<'a, DocumentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use rstest::rstest;

    fn records() -> Vec<DocumentRecord> {
        vec![
            DocumentRecord::new("Install", "<p>Install the tool</p>", "/docs/install/"),
            DocumentRecord::new("Usage", "<p>Run it</p>", "/docs/usage/"),
            DocumentRecord::new("FAQ", "<p>Questions</p>", "/docs/faq/"),
        ]
    }

    #[test]
    fn test_lookup_by_url() {
        let store = DocumentStore::from_records(records()).unwrap();
        let_assert!(Some(record) = store.find_by_url("/docs/usage/"));
        check!(record.title == "Usage");
        check!(store.position_of("/docs/faq/") == Some(2));
        check!(store.find_by_url("/docs/missing/").is_none());
        check!(store.find_by_url("/docs/usage").is_none());
    }

    #[test]
    fn test_preserves_insertion_order() {
        let store = DocumentStore::from_records(records()).unwrap();
        let titles: Vec<_> = store.iter().map(|r| r.title.as_str()).collect();
        check!(titles == ["Install", "Usage", "FAQ"]);
    }

    #[test]
    fn test_duplicate_url_rejected() {
        let mut docs = records();
        docs.push(DocumentRecord::new("Usage again", "", "/docs/usage/"));

        let_assert!(Err(StoreError::DuplicateUrl { url, first, second }) =
            DocumentStore::from_records(docs));
        check!(url == "/docs/usage/");
        check!(first == 1);
        check!(second == 3);
    }

    #[test]
    fn test_empty_url_rejected() {
        let mut docs = records();
        docs.insert(1, DocumentRecord::new("Orphan", "", ""));

        let_assert!(Err(StoreError::EmptyUrl { position }) = DocumentStore::from_records(docs));
        check!(position == 1);
    }

    #[test]
    fn test_find_all_keeps_order() {
        let store = DocumentStore::from_records(records()).unwrap();
        let found = store.find_all(|r| r.content.contains("<p>"));
        check!(found.len() == 3);
        check!(found[0].url == "/docs/install/");

        check!(store.find_all(|r| r.title.is_empty()).is_empty());
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = DocumentStore::from_records(records()).unwrap();
        let b = DocumentStore::from_records(records()).unwrap();
        check!(a.fingerprint() == b.fingerprint());

        let mut changed = records();
        changed[2].content.push('!');
        let c = DocumentStore::from_records(changed).unwrap();
        check!(a.fingerprint() != c.fingerprint());
    }

    #[rstest]
    #[case(r#"[{"title":"A","content":"x","url":"/a/"}]"#)]
    #[case(r#"{"documents":[{"title":"A","content":"x","url":"/a/"}]}"#)]
    #[case(r#"[{"title":"A","url":"/a/"}]"#)]
    #[tokio::test]
    async fn test_load_accepts_layouts(#[case] json: &str) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search.json");
        std::fs::write(&path, json).unwrap();

        let store = DocumentStore::load(&path).await.unwrap();
        check!(store.len() == 1);
        check!(store.find_by_url("/a/").map(|r| r.title.as_str()) == Some("A"));
    }

    #[tokio::test]
    async fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search.json");
        std::fs::write(&path, "var documents = [];").unwrap();

        let_assert!(Err(StoreError::Parse { .. }) = DocumentStore::load(&path).await);
        let_assert!(
            Err(StoreError::Io { .. }) = DocumentStore::load(&dir.path().join("nope.json")).await
        );
    }
}
