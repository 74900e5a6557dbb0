//! The document record: one indexed page of the site.

use serde::{Deserialize, Serialize};

/// One page of the documentation site.
///
/// `url` is the site-relative path of the page and doubles as its key in the
/// [`DocumentStore`](crate::DocumentStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub title: String,
    /// Raw page body, usually HTML.
    #[serde(default)]
    pub content: String,
    pub url: String,
}

impl DocumentRecord {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            url: url.into(),
        }
    }
}
