//! Query adapter: turns free-text queries into ranked document records.

use crate::document::DocumentRecord;
use crate::error::SearchError;
use crate::search::{NEAR_MISS_THRESHOLD, SearchIndex, title_similarity};
use crate::store::DocumentStore;
use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};

/// What to do when the index ranks a url the store does not hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DanglingPolicy {
    /// Drop the hit and log a warning.
    #[default]
    Skip,
    /// Fail the whole query with [`SearchError::DanglingReference`].
    Fail,
}

/// A record matched by a query, with the index's relevance score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match<'a> {
    pub record: &'a DocumentRecord,
    pub score: f32,
}

/// An owned, display-ready search result handed to the typeahead.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub title: String,
    pub url: String,
    pub score: f32,
}

impl From<Match<'_>> for Suggestion {
    fn from(m: Match<'_>) -> Self {
        Self {
            title: m.record.title.clone(),
            url: m.record.url.clone(),
            score: m.score,
        }
    }
}

/// Source of suggestions for a typeahead.
///
/// The host calls `provide_suggestions` once per query; the provider hands its
/// ranked results to `respond`.
pub trait SuggestionProvider {
    fn provide_suggestions(
        &self,
        query: &str,
        respond: &mut dyn FnMut(Vec<Suggestion>),
    ) -> Result<(), SearchError>;
}

impl<P: SuggestionProvider + ?Sized> SuggestionProvider for Arc<P> {
    fn provide_suggestions(
        &self,
        query: &str,
        respond: &mut dyn FnMut(Vec<Suggestion>),
    ) -> Result<(), SearchError> {
        (**self).provide_suggestions(query, respond)
    }
}

/// Resolved (store position, score) pairs for one query.
type Resolved = Arc<[(usize, f32)]>;

/// Bridges the text index and the document store.
///
/// Both are shared read-only; the adapter owns only a small cache of recent
/// queries, since typing and deleting characters repeats them often.
pub struct QueryAdapter {
    store: Arc<DocumentStore>,
    index: Arc<SearchIndex>,
    policy: DanglingPolicy,
    recent: Option<Mutex<LruCache<String, Resolved>>>,
}

impl std::fmt::Debug for QueryAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryAdapter")
            .field("documents", &self.store.len())
            .field("indexed", &self.index.document_count())
            .field("policy", &self.policy)
            .field("cached_queries", &self.recent.is_some())
            .finish()
    }
}

impl QueryAdapter {
    pub fn new(store: Arc<DocumentStore>, index: Arc<SearchIndex>) -> Self {
        if store.len() != index.document_count() {
            tracing::warn!(
                "Index covers {} documents but the store holds {}",
                index.document_count(),
                store.len()
            );
        }
        Self {
            store,
            index,
            policy: DanglingPolicy::default(),
            recent: None,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: DanglingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Remember results for up to `capacity` distinct queries. Zero disables caching.
    #[must_use]
    pub fn with_cache_size(mut self, capacity: usize) -> Self {
        self.recent = NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap)));
        self
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    /// Records matching `query`, in the index's relevance order.
    ///
    /// No results is an empty vector. A hit whose url is not in the store is
    /// handled according to the adapter's [`DanglingPolicy`].
    pub fn search(&self, query: &str) -> Result<Vec<Match<'_>>, SearchError> {
        let resolved = match self.cached(query) {
            Some(resolved) => resolved,
            None => {
                let resolved = self.resolve(query)?;
                self.remember(query, resolved.clone());
                resolved
            }
        };

        Ok(resolved
            .iter()
            .filter_map(|&(position, score)| {
                self.store
                    .get(position)
                    .map(|record| Match { record, score })
            })
            .collect())
    }

    /// Looks up a single record by url.
    pub fn lookup(&self, url: &str) -> Option<&DocumentRecord> {
        self.store.find_by_url(url)
    }

    /// Up to `limit` records whose titles resemble `query`, most similar first.
    /// Intended for "did you mean" hints when [`search`](Self::search) finds nothing.
    pub fn did_you_mean(&self, query: &str, limit: usize) -> Vec<&DocumentRecord> {
        if query.trim().is_empty() {
            return vec![];
        }

        let mut scored: Vec<(f64, &DocumentRecord)> = self
            .store
            .iter()
            .map(|record| (title_similarity(query, &record.title), record))
            .filter(|(score, _)| *score >= NEAR_MISS_THRESHOLD)
            .collect();
        scored.sort_by(|(a, _), (b, _)| b.total_cmp(a));

        scored
            .into_iter()
            .take(limit)
            .map(|(_, record)| record)
            .collect()
    }

    fn resolve(&self, query: &str) -> Result<Resolved, SearchError> {
        let mut resolved = vec![];

        for hit in self.index.search(query) {
            match (self.store.position_of(hit.reference), self.policy) {
                (Some(position), _) => resolved.push((position, hit.score)),
                (None, DanglingPolicy::Skip) => {
                    tracing::warn!(
                        reference = hit.reference,
                        "Search index references a document that is not loaded, skipping"
                    );
                }
                (None, DanglingPolicy::Fail) => {
                    return Err(SearchError::DanglingReference {
                        reference: hit.reference.to_string(),
                    });
                }
            }
        }

        Ok(resolved.into())
    }

    fn cached(&self, query: &str) -> Option<Resolved> {
        let recent = self.recent.as_ref()?;
        let mut recent = recent.lock().unwrap_or_else(PoisonError::into_inner);
        recent.get(query).cloned()
    }

    fn remember(&self, query: &str, resolved: Resolved) {
        if let Some(recent) = &self.recent {
            recent
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .put(query.to_string(), resolved);
        }
    }
}

impl SuggestionProvider for QueryAdapter {
    fn provide_suggestions(
        &self,
        query: &str,
        respond: &mut dyn FnMut(Vec<Suggestion>),
    ) -> Result<(), SearchError> {
        let suggestions = self.search(query)?.into_iter().map(Suggestion::from).collect();
        respond(suggestions);
        Ok(())
    }
}
