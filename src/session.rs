//! Asynchronous suggestions with stale-result suppression.
//!
//! Every query takes a generation ticket. When a provider call finishes, its
//! result is only delivered if no newer query was started in the meantime, so a
//! slow answer to an old keystroke never replaces the answer to a newer one.

use crate::adapter::{Suggestion, SuggestionProvider};
use crate::error::SearchError;
use crate::typeahead::{Dropdown, TypeaheadConfig};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Generation number of one submitted query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Runs provider calls on the blocking pool for one text field.
#[derive(Debug)]
pub struct SuggestionSession<P> {
    provider: Arc<P>,
    config: TypeaheadConfig,
    generation: AtomicU64,
}

impl<P> SuggestionSession<P>
where
    P: SuggestionProvider + Send + Sync + 'static,
{
    pub fn new(provider: Arc<P>, config: TypeaheadConfig) -> Self {
        Self {
            provider,
            config,
            generation: AtomicU64::new(0),
        }
    }

    /// Starts a new generation, superseding every earlier ticket.
    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// True while no newer ticket has been issued.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.0
    }

    /// Computes the dropdown for `query`.
    ///
    /// Returns `Ok(None)` when another query was submitted before this one
    /// finished; its result, or its error, is discarded.
    pub async fn query(&self, query: impl Into<String>) -> Result<Option<Dropdown>, SearchError> {
        let ticket = self.begin();
        let query = query.into().trim().to_string();

        if query.chars().count() < self.config.min_length {
            return Ok(self.is_current(ticket).then_some(Dropdown::Hidden));
        }

        let provider = Arc::clone(&self.provider);
        let outcome = tokio::task::spawn_blocking(move || {
            let mut received: Vec<Suggestion> = vec![];
            let result =
                provider.provide_suggestions(&query, &mut |suggestions| received = suggestions);
            result.map(|()| received)
        })
        .await
        .map_err(|e| SearchError::TaskFailed {
            reason: e.to_string(),
        })?;

        if !self.is_current(ticket) {
            tracing::debug!("Discarding suggestions for superseded query {:?}", ticket);
            return Ok(None);
        }

        Ok(Some(Dropdown::from_results(outcome?, self.config.limit)))
    }
}
