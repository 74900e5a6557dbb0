//! Command handlers. Each returns the text to print.

use crate::adapter::QueryAdapter;
use crate::cli::Commands;
use crate::config::Config;
use crate::error::Result;
use crate::format::{format_dropdown, format_matches, format_record, format_stats};
use crate::navigation::BaseUrlNavigator;
use crate::search::{IndexCache, SearchIndex};
use crate::session::SuggestionSession;
use crate::store::DocumentStore;
use crate::typeahead::Typeahead;
use anyhow::{Context, bail, ensure};
use std::sync::Arc;

/// Number of "did you mean" hints shown when a search finds nothing.
const NEAR_MISS_HINTS: usize = 3;

/// Loads the document store and its index, ready for queries.
pub async fn open_adapter(
    documents: &std::path::Path,
    config: &Config,
    use_cache: bool,
) -> Result<Arc<QueryAdapter>> {
    let store = DocumentStore::load(documents)
        .await
        .with_context(|| format!("Failed to open document store {}", documents.display()))?;

    let index = match config.cache_dir().filter(|_| use_cache) {
        Some(dir) => IndexCache::new(dir).load_or_build(&store, &config.index).await,
        None => SearchIndex::build(&store, &config.index),
    };

    Ok(Arc::new(
        QueryAdapter::new(Arc::new(store), Arc::new(index))
            .with_policy(config.query.on_dangling)
            .with_cache_size(config.query.cache_size),
    ))
}

pub async fn execute(
    command: Commands,
    adapter: &Arc<QueryAdapter>,
    config: &Config,
) -> Result<String> {
    match command {
        Commands::Search { query, limit } => {
            ensure!(limit > 0, "Result limit must be at least 1");
            let mut matches = adapter.search(&query)?;
            matches.truncate(limit);
            let near_misses = if matches.is_empty() {
                adapter.did_you_mean(&query, NEAR_MISS_HINTS)
            } else {
                vec![]
            };
            Ok(format_matches(&query, &matches, &near_misses))
        }
        Commands::Suggest { query } => {
            let session = SuggestionSession::new(Arc::clone(adapter), config.typeahead);
            let dropdown = session
                .query(query)
                .await?
                .context("Suggestion was superseded")?;
            Ok(format_dropdown(&dropdown, config.typeahead.display))
        }
        Commands::Open { query, pick } => {
            let navigator = BaseUrlNavigator::new(config.base_url.clone(), Vec::new());
            let mut typeahead = Typeahead::new(Arc::clone(adapter), navigator, config.typeahead);
            typeahead.input(&query)?;

            if pick == 0 || !typeahead.select(pick - 1) {
                bail!("No suggestion at position {} for '{}'", pick, query);
            }

            let (_, navigator) = typeahead.into_parts();
            let written = navigator
                .into_inner()
                .context("Failed to write navigation target")?;
            Ok(String::from_utf8_lossy(&written).into_owned())
        }
        Commands::Lookup { url } => match adapter.lookup(&url) {
            Some(record) => Ok(format_record(record)),
            None => bail!("No page stored under '{}'", url),
        },
        Commands::Check => Ok(format_stats(adapter.store(), adapter.index())),
    }
}
