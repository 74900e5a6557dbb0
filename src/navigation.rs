//! Navigation performed when a suggestion is selected.

use std::io::Write;

/// Receives the target of a selected suggestion.
pub trait Navigator {
    fn navigate(&mut self, url: &str);
}

impl<N: Navigator + ?Sized> Navigator for &mut N {
    fn navigate(&mut self, url: &str) {
        (**self).navigate(url);
    }
}

/// Navigates to `url` if there is one. Returns whether navigation happened.
pub fn on_select<N: Navigator + ?Sized>(navigator: &mut N, url: Option<&str>) -> bool {
    match url {
        Some(url) if !url.is_empty() => {
            tracing::debug!("Navigating to {}", url);
            navigator.navigate(url);
            true
        }
        _ => {
            tracing::debug!("Selection has no url, ignoring");
            false
        }
    }
}

/// Keeps every url it was asked to visit, oldest first.
#[derive(Debug, Default, Clone)]
pub struct RecordingNavigator {
    visited: Vec<String>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    pub fn last(&self) -> Option<&str> {
        self.visited.last().map(String::as_str)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, url: &str) {
        self.visited.push(url.to_string());
    }
}

/// Writes the navigation target, resolved against an optional site base url,
/// as one line to `out`.
///
/// The first failed write is kept and returned by [`into_inner`](Self::into_inner).
#[derive(Debug)]
pub struct BaseUrlNavigator<W> {
    base_url: Option<String>,
    out: W,
    failed: Option<std::io::Error>,
}

impl<W: Write> BaseUrlNavigator<W> {
    pub fn new(base_url: Option<String>, out: W) -> Self {
        Self {
            base_url,
            out,
            failed: None,
        }
    }

    /// Joins a site-relative url onto the base url. Absolute urls and urls
    /// without a configured base are returned unchanged.
    pub fn resolve(&self, url: &str) -> String {
        match &self.base_url {
            Some(base) if !url.contains("://") => {
                format!(
                    "{}/{}",
                    base.trim_end_matches('/'),
                    url.trim_start_matches('/')
                )
            }
            _ => url.to_string(),
        }
    }

    /// The output sink, or the first error hit while writing to it.
    pub fn into_inner(self) -> std::io::Result<W> {
        match self.failed {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }
}

impl<W: Write> Navigator for BaseUrlNavigator<W> {
    fn navigate(&mut self, url: &str) {
        let target = self.resolve(url);
        if let Err(e) = writeln!(self.out, "{}", target) {
            tracing::error!("Failed to write navigation target {}: {}", target, e);
            self.failed.get_or_insert(e);
        }
    }
}
