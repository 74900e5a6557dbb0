//! Full-text search and typeahead navigation over a static documentation site.
//!
//! A [`DocumentStore`] holds the site's pages, a [`SearchIndex`] ranks them for
//! a query, and a [`QueryAdapter`] maps ranked urls back to pages. The
//! [`Typeahead`] controller and [`SuggestionSession`] drive live suggestions and
//! hand selections to a [`Navigator`].

pub mod adapter;
pub mod cli;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod format;
pub mod navigation;
pub mod search;
pub mod session;
pub mod store;
pub mod tracing;
pub mod typeahead;

pub use adapter::{DanglingPolicy, Match, QueryAdapter, Suggestion, SuggestionProvider};
pub use config::Config;
pub use document::DocumentRecord;
pub use error::{SearchError, StoreError};
pub use navigation::{BaseUrlNavigator, Navigator, RecordingNavigator, on_select};
pub use search::{IndexCache, IndexConfig, SearchHit, SearchIndex};
pub use session::{SuggestionSession, Ticket};
pub use store::DocumentStore;
pub use typeahead::{DisplayField, Dropdown, Typeahead, TypeaheadConfig};
