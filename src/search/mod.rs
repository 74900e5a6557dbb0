//! Full-text search over the document store.
//!
//! This module provides TF-IDF based search across site pages, including
//! markup stripping, tokenization, indexing, scoring, and on-disk caching.

pub(crate) mod cache;
pub(crate) mod index;
pub(crate) mod scoring;
pub(crate) mod text;
pub(crate) mod tokenize;

pub use cache::IndexCache;
pub use index::{IndexConfig, SearchHit, SearchIndex};
pub use scoring::{NEAR_MISS_THRESHOLD, relevance_percent, title_similarity};
pub use text::{plain_text, snippet};
