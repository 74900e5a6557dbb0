//! TF-IDF inverted index implementation for full-text search.

use ahash::AHashSet;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::tokenize::{
    DocId, TermBuilder, TermHash, hash_term, tokenize_and_stem, tokenize_keeping_stop_words,
};
use crate::document::DocumentRecord;

/// Field weights applied while indexing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Multiplier for terms found in a page title
    pub title_boost: f32,
    /// Multiplier for terms found in the page body
    pub content_boost: f32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            title_boost: 10.0,
            content_boost: 1.0,
        }
    }
}

/// One ranked result: the url of a page and its relevance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit<'a> {
    pub reference: &'a str,
    pub score: f32,
}

/// A searchable term index with TF-IDF scoring.
///
/// The index only knows page urls (`refs`); mapping a hit back to its record is
/// the caller's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchIndex {
    /// Map from term hash to (doc_id, weight) pairs, sorted by doc_id
    terms: HashMap<TermHash, Vec<(DocId, f32)>>,
    /// Map from doc_id to page url
    refs: Vec<String>,
}

impl SearchIndex {
    pub(super) fn new(terms: HashMap<TermHash, Vec<(DocId, f32)>>, refs: Vec<String>) -> Self {
        Self { terms, refs }
    }

    /// Indexes the title and content of every record, in order.
    pub fn build<'a, I>(records: I, config: &IndexConfig) -> Self
    where
        I: IntoIterator<Item = &'a DocumentRecord>,
    {
        let mut builder = TermBuilder::new(*config);
        for record in records {
            builder.add_document(&record.url, &record.title, &record.content);
        }
        builder.finalize()
    }

    /// Searches for pages matching any term of the query.
    /// Returns hits sorted by relevance score (highest first); equal scores keep
    /// indexing order.
    ///
    /// The query is tokenized and stemmed just like indexed text, so "configuring"
    /// matches pages that say "configure" or "configuration". A query made only
    /// of stop words is looked up with them kept, which can only match titles.
    /// A query with no indexable terms returns nothing.
    pub fn search(&self, query: &str) -> Vec<SearchHit<'_>> {
        let stemmer = Stemmer::create(Algorithm::English);
        let mut tokens: AHashSet<String> =
            tokenize_and_stem(query, &stemmer).into_iter().collect();
        if tokens.is_empty() {
            tokens = tokenize_keeping_stop_words(query, &stemmer).into_iter().collect();
        }

        if tokens.is_empty() {
            return vec![];
        }

        // Sum the weights of every query term a document contains
        let mut combined_scores: HashMap<DocId, f32> = HashMap::new();
        for token in &tokens {
            if let Some(postings) = self.terms.get(&hash_term(token)) {
                for &(doc_id, weight) in postings {
                    *combined_scores.entry(doc_id).or_insert(0.0) += weight;
                }
            }
        }

        let mut results: Vec<_> = combined_scores.into_iter().collect();
        results.sort_by(|(a_id, a), (b_id, b)| b.total_cmp(a).then(a_id.cmp(b_id)));

        tracing::trace!("Query '{}' matched {} documents", query, results.len());

        results
            .into_iter()
            .map(|(doc_id, score)| SearchHit {
                reference: &self.refs[doc_id as usize],
                score,
            })
            .collect()
    }

    /// Get the number of unique terms in the index
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Get the number of documents in the index
    pub fn document_count(&self) -> usize {
        self.refs.len()
    }
}
