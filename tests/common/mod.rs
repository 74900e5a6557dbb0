//! Shared test fixtures for integration tests.
//!
//! Every fixture is built from `tests/fixtures/site.json`, an eight-page
//! documentation site in which "page" appears in six documents.

use rstest::fixture;
use sitesearch::{DocumentStore, IndexConfig, QueryAdapter, SearchIndex};
use std::path::PathBuf;
use std::sync::Arc;

/// Returns the project root directory (where Cargo.toml lives).
#[allow(dead_code)] // Used across different integration test crates
pub fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

#[allow(dead_code)]
pub fn site_json() -> PathBuf {
    project_root().join("tests/fixtures/site.json")
}

#[fixture]
pub fn store() -> Arc<DocumentStore> {
    let text = std::fs::read_to_string(site_json()).expect("fixture should be readable");
    let records = serde_json::from_str(&text).expect("fixture should parse");
    Arc::new(DocumentStore::from_records(records).expect("fixture urls are unique"))
}

#[fixture]
pub fn adapter(store: Arc<DocumentStore>) -> Arc<QueryAdapter> {
    let index = SearchIndex::build(store.as_ref(), &IndexConfig::default());
    Arc::new(QueryAdapter::new(store, Arc::new(index)))
}
