//! Typeahead controller: the host-side half of live search suggestions.
//!
//! The controller decides when to ask the provider, how many results to show,
//! what label each shows, and routes selection to an injected [`Navigator`].

use crate::adapter::{Suggestion, SuggestionProvider};
use crate::error::SearchError;
use crate::navigation::{Navigator, on_select};
use serde::{Deserialize, Serialize};

/// Which field of a suggestion is used as its label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayField {
    #[default]
    Title,
    Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeaheadConfig {
    /// Characters required before the provider is queried
    pub min_length: usize,
    /// Maximum number of suggestions shown
    pub limit: usize,
    pub display: DisplayField,
}

impl Default for TypeaheadConfig {
    fn default() -> Self {
        Self {
            min_length: 1,
            limit: 3,
            display: DisplayField::Title,
        }
    }
}

/// What the suggestion dropdown currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Dropdown {
    /// Closed: the query is too short, or a suggestion was just selected.
    #[default]
    Hidden,
    /// Open with the "no matches" placeholder.
    NoMatches,
    /// Open with ranked suggestions, best first.
    Suggestions(Vec<Suggestion>),
}

impl Dropdown {
    /// Dropdown for a provider's results: the placeholder when empty, otherwise
    /// the first `limit` suggestions.
    pub fn from_results(mut suggestions: Vec<Suggestion>, limit: usize) -> Self {
        if suggestions.is_empty() {
            Self::NoMatches
        } else {
            suggestions.truncate(limit);
            Self::Suggestions(suggestions)
        }
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        match self {
            Self::Suggestions(suggestions) => suggestions,
            Self::Hidden | Self::NoMatches => &[],
        }
    }

    /// The label shown for each suggestion.
    pub fn labels(&self, display: DisplayField) -> Vec<&str> {
        self.suggestions()
            .iter()
            .map(|s| match display {
                DisplayField::Title => s.title.as_str(),
                DisplayField::Url => s.url.as_str(),
            })
            .collect()
    }
}

/// Live suggestions for one text field.
#[derive(Debug)]
pub struct Typeahead<P, N> {
    provider: P,
    navigator: N,
    config: TypeaheadConfig,
    dropdown: Dropdown,
}

impl<P: SuggestionProvider, N: Navigator> Typeahead<P, N> {
    pub fn new(provider: P, navigator: N, config: TypeaheadConfig) -> Self {
        Self {
            provider,
            navigator,
            config,
            dropdown: Dropdown::Hidden,
        }
    }

    /// Handles a change of the input text and returns the new dropdown state.
    ///
    /// Queries shorter than `min_length` characters (ignoring surrounding
    /// whitespace) close the dropdown without querying the provider.
    pub fn input(&mut self, query: &str) -> Result<&Dropdown, SearchError> {
        let query = query.trim();
        if query.chars().count() < self.config.min_length {
            self.dropdown = Dropdown::Hidden;
            return Ok(&self.dropdown);
        }

        let mut received = None;
        let result = self
            .provider
            .provide_suggestions(query, &mut |suggestions| received = Some(suggestions));

        if let Err(e) = result {
            self.dropdown = Dropdown::Hidden;
            return Err(e);
        }

        self.dropdown = Dropdown::from_results(received.unwrap_or_default(), self.config.limit);
        Ok(&self.dropdown)
    }

    /// Selects the shown suggestion at `position` (0-based) and navigates to it.
    /// Returns false, leaving the dropdown open, when nothing is shown there.
    pub fn select(&mut self, position: usize) -> bool {
        let url = self
            .dropdown
            .suggestions()
            .get(position)
            .map(|s| s.url.as_str());

        let navigated = on_select(&mut self.navigator, url);
        if navigated {
            self.dropdown = Dropdown::Hidden;
        }
        navigated
    }

    pub fn dropdown(&self) -> &Dropdown {
        &self.dropdown
    }

    pub fn labels(&self) -> Vec<&str> {
        self.dropdown.labels(self.config.display)
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn config(&self) -> &TypeaheadConfig {
        &self.config
    }

    pub fn into_parts(self) -> (P, N) {
        (self.provider, self.navigator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::RecordingNavigator;
    use assert2::{check, let_assert};
    use std::cell::Cell;

    /// Returns `count` suggestions for any query and counts calls.
    struct Fixed {
        count: usize,
        calls: Cell<usize>,
    }

    impl Fixed {
        fn new(count: usize) -> Self {
            Self {
                count,
                calls: Cell::new(0),
            }
        }
    }

    impl SuggestionProvider for Fixed {
        fn provide_suggestions(
            &self,
            _query: &str,
            respond: &mut dyn FnMut(Vec<Suggestion>),
        ) -> Result<(), SearchError> {
            self.calls.set(self.calls.get() + 1);
            respond(
                (0..self.count)
                    .map(|i| Suggestion {
                        title: format!("Page {}", i),
                        url: format!("/docs/{}/", i),
                        score: 10.0 - i as f32,
                    })
                    .collect(),
            );
            Ok(())
        }
    }

    struct Broken;

    impl SuggestionProvider for Broken {
        fn provide_suggestions(
            &self,
            _query: &str,
            _respond: &mut dyn FnMut(Vec<Suggestion>),
        ) -> Result<(), SearchError> {
            Err(SearchError::DanglingReference {
                reference: "/gone/".to_string(),
            })
        }
    }

    fn typeahead(count: usize) -> Typeahead<Fixed, RecordingNavigator> {
        Typeahead::new(
            Fixed::new(count),
            RecordingNavigator::default(),
            TypeaheadConfig::default(),
        )
    }

    #[test]
    fn test_short_query_skips_provider() {
        let mut typeahead = typeahead(5);
        check!(typeahead.input("").unwrap() == &Dropdown::Hidden);
        check!(typeahead.input("   ").unwrap() == &Dropdown::Hidden);
        check!(typeahead.provider.calls.get() == 0);

        typeahead.input("a").unwrap();
        check!(typeahead.provider.calls.get() == 1);
    }

    #[test]
    fn test_min_length_counts_characters() {
        let config = TypeaheadConfig {
            min_length: 2,
            ..TypeaheadConfig::default()
        };
        let mut typeahead = Typeahead::new(Fixed::new(1), RecordingNavigator::default(), config);
        check!(typeahead.input("é").unwrap() == &Dropdown::Hidden);
        check!(typeahead.input("éa").unwrap().suggestions().len() == 1);
    }

    #[test]
    fn test_results_capped_in_order() {
        let mut typeahead = typeahead(5);
        typeahead.input("page").unwrap();
        check!(typeahead.labels() == ["Page 0", "Page 1", "Page 2"]);
    }

    #[test]
    fn test_no_matches_placeholder() {
        let mut typeahead = typeahead(0);
        check!(typeahead.input("zzz").unwrap() == &Dropdown::NoMatches);
        check!(typeahead.labels().is_empty());
    }

    #[test]
    fn test_display_url() {
        let config = TypeaheadConfig {
            display: DisplayField::Url,
            ..TypeaheadConfig::default()
        };
        let mut typeahead = Typeahead::new(Fixed::new(2), RecordingNavigator::default(), config);
        typeahead.input("page").unwrap();
        check!(typeahead.labels() == ["/docs/0/", "/docs/1/"]);
    }

    #[test]
    fn test_select_navigates_and_closes() {
        let mut typeahead = typeahead(5);
        typeahead.input("page").unwrap();

        check!(typeahead.select(1));
        check!(typeahead.navigator().visited() == ["/docs/1/"]);
        check!(typeahead.dropdown() == &Dropdown::Hidden);
    }

    #[test]
    fn test_select_out_of_range_is_noop() {
        let mut typeahead = typeahead(5);
        typeahead.input("page").unwrap();

        // Only three are shown even though five matched
        check!(!typeahead.select(3));
        check!(typeahead.navigator().visited().is_empty());
        check!(typeahead.dropdown().suggestions().len() == 3);
    }

    #[test]
    fn test_provider_error_closes_dropdown() {
        let mut typeahead =
            Typeahead::new(Broken, RecordingNavigator::default(), TypeaheadConfig::default());
        let_assert!(Err(SearchError::DanglingReference { .. }) = typeahead.input("x"));
        check!(typeahead.dropdown() == &Dropdown::Hidden);
    }
}
