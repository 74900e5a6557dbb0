//! Text tokenization, stemming, and term accumulation for the index.

use ahash::AHashMap;
use rust_stemmers::{Algorithm, Stemmer};
use xxhash_rust::xxh3::xxh3_64;

use super::index::{IndexConfig, SearchIndex};
use super::text::plain_text;

/// Common English stop words to filter out from indexing.
/// These high-frequency words add little value to search relevance.
pub(crate) const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "has", "he", "if", "in",
    "into", "is", "it", "its", "of", "on", "or", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Position of a record in the document store.
pub(crate) type DocId = u32;

/// Term hash for fast lookup
pub(crate) type TermHash = u64;

/// Splits text into lowercase, stemmed terms, dropping stop words.
///
/// Words break on anything that is not a letter or digit. Inside a word, `_`, `-` and
/// lowercase-to-uppercase transitions mark sub-words:
/// - "TypeAhead" → ["type", "ahead", "typeahead"]
/// - "full-text" → ["full", "text", "fulltext"]
/// - "Search" → ["search"]
///
/// Compound words yield their parts plus the joined form, so a query for
/// "typeahead" finds a page that writes "type-ahead".
pub(crate) fn tokenize_and_stem(text: &str, stemmer: &Stemmer) -> Vec<String> {
    tokenize(text, stemmer, false)
}

/// Like [`tokenize_and_stem`], but keeps stop words. Titles are indexed this way
/// so that a page titled "It" can still be found by its title.
pub(crate) fn tokenize_keeping_stop_words(text: &str, stemmer: &Stemmer) -> Vec<String> {
    tokenize(text, stemmer, true)
}

fn tokenize(text: &str, stemmer: &Stemmer, keep_stop_words: bool) -> Vec<String> {
    let mut tokens = vec![];

    let words = text
        .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-'))
        .filter(|word| !word.is_empty());

    for word in words {
        let parts: Vec<&str> = word
            .split(['_', '-'])
            .flat_map(camel_parts)
            .filter(|part| !part.is_empty())
            .collect();

        for part in &parts {
            push_token(part, &mut tokens, stemmer, keep_stop_words);
        }

        if parts.len() > 1 {
            push_token(&parts.concat(), &mut tokens, stemmer, keep_stop_words);
        }
    }

    tokens
}

/// Splits on lowercase → uppercase transitions: "httpServer" → ["http", "Server"].
fn camel_parts(word: &str) -> Vec<&str> {
    let mut parts = vec![];
    let mut start = 0;
    let mut prev_lower = false;

    for (i, c) in word.char_indices() {
        if prev_lower && c.is_uppercase() {
            parts.push(&word[start..i]);
            start = i;
        }
        prev_lower = c.is_lowercase();
    }
    parts.push(&word[start..]);
    parts
}

/// Lowercases, optionally drops stop words, and stems a single token.
fn push_token(token: &str, tokens: &mut Vec<String>, stemmer: &Stemmer, keep_stop_words: bool) {
    let lowercase = token.to_lowercase();

    if !keep_stop_words && STOP_WORDS.contains(&lowercase.as_str()) {
        return;
    }

    let stemmed = stemmer.stem(&lowercase);
    if !stemmed.is_empty() {
        tokens.push(stemmed.into_owned());
    }
}

/// Hashes a term for lookup. Stable across processes, so cached indexes stay valid.
pub(crate) fn hash_term(term: &str) -> TermHash {
    xxh3_64(term.to_lowercase().as_bytes())
}

/// Builder for accumulating term frequencies before TF-IDF finalization.
pub(crate) struct TermBuilder {
    /// Flat map from (term_hash, doc_id) → boosted term frequency
    term_docs: AHashMap<(TermHash, DocId), f32>,
    /// Unboosted token count per document, for length normalization
    doc_lengths: Vec<usize>,
    /// Reference (url) per document, indexed by `DocId`
    refs: Vec<String>,
    stemmer: Stemmer,
    config: IndexConfig,
}

impl TermBuilder {
    pub(crate) fn new(config: IndexConfig) -> Self {
        Self {
            term_docs: AHashMap::default(),
            doc_lengths: vec![],
            refs: vec![],
            stemmer: Stemmer::create(Algorithm::English),
            config,
        }
    }

    /// Registers a document and indexes its title and content.
    pub(crate) fn add_document(&mut self, reference: &str, title: &str, content: &str) {
        let Ok(doc_id) = DocId::try_from(self.refs.len()) else {
            tracing::error!("Index is full, skipping '{}'", reference);
            return;
        };
        self.refs.push(reference.to_string());
        self.doc_lengths.push(0);

        let title_terms = tokenize_keeping_stop_words(title, &self.stemmer);
        self.add_terms(title_terms, doc_id, self.config.title_boost);
        let content_terms = tokenize_and_stem(&plain_text(content), &self.stemmer);
        self.add_terms(content_terms, doc_id, self.config.content_boost);
    }

    /// Adds terms with frequency counting. TF = term_count * boost.
    fn add_terms(&mut self, words: Vec<String>, doc_id: DocId, boost: f32) {
        let mut word_counts: AHashMap<String, usize> = AHashMap::with_capacity(words.len());
        for word in words {
            *word_counts.entry(word).or_insert(0) += 1;
        }

        self.doc_lengths[doc_id as usize] += word_counts.values().sum::<usize>();

        for (word, count) in word_counts {
            *self
                .term_docs
                .entry((hash_term(&word), doc_id))
                .or_insert(0.0) += count as f32 * boost;
        }
    }

    /// Calculates IDF scores and produces the final searchable index.
    ///
    /// weight = ln(1 + tf / length_norm) * ln(1 + total_docs / doc_freq), where
    /// length_norm is the document length relative to the average, clamped to
    /// at least 0.5. Every weight is strictly positive.
    pub(crate) fn finalize(self) -> SearchIndex {
        let start = std::time::Instant::now();
        let total_docs = self.refs.len() as f32;

        let non_empty: Vec<usize> = self.doc_lengths.iter().copied().filter(|&l| l > 0).collect();
        let avg_doc_length = if non_empty.is_empty() {
            1.0
        } else {
            non_empty.iter().sum::<usize>() as f32 / non_empty.len() as f32
        };

        let total_pairs = self.term_docs.len();
        let mut grouped: AHashMap<TermHash, Vec<(DocId, f32)>> = AHashMap::default();
        for ((term_hash, doc_id), tf) in self.term_docs {
            grouped.entry(term_hash).or_default().push((doc_id, tf));
        }

        let terms = grouped
            .into_iter()
            .map(|(term_hash, postings)| {
                let idf = (1.0 + total_docs / postings.len() as f32).ln();

                let mut weighted: Vec<(DocId, f32)> = postings
                    .into_iter()
                    .map(|(doc_id, tf)| {
                        let length = self.doc_lengths[doc_id as usize] as f32;
                        let length_norm = (length / avg_doc_length).max(0.5);
                        (doc_id, (1.0 + tf / length_norm).ln() * idf)
                    })
                    .collect();
                weighted.sort_by_key(|(doc_id, _)| *doc_id);

                (term_hash, weighted)
            })
            .collect();

        let index = SearchIndex::new(terms, self.refs);

        tracing::info!(
            "Built search index: {} unique terms, {} documents, {} term-document pairs in {:?}",
            index.term_count(),
            index.document_count(),
            total_pairs,
            start.elapsed()
        );

        index
    }
}
