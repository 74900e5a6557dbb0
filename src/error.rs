//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for sitesearch operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when building or loading a document store fails.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Two records share the same url.
    #[error("Duplicate url '{url}' at positions {first} and {second}")]
    DuplicateUrl {
        url: String,
        first: usize,
        second: usize,
    },
    /// A record has an empty url and cannot be addressed.
    #[error("Record at position {position} has an empty url")]
    EmptyUrl { position: usize },
    /// The store file could not be read.
    #[error("Failed to read documents from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The store file is not a valid document array.
    #[error("Failed to parse documents in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Error returned when a query cannot be answered consistently.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The index ranked a reference that is not present in the document store.
    #[error("Index references '{reference}' but no such document is loaded")]
    DanglingReference { reference: String },
    /// A background suggestion task panicked or was cancelled.
    #[error("Suggestion task failed: {reason}")]
    TaskFailed { reason: String },
}
