//! Plain-text rendering of search results for the command line.

use crate::adapter::Match;
use crate::document::DocumentRecord;
use crate::search::{SearchIndex, plain_text, relevance_percent, snippet};
use crate::store::DocumentStore;
use crate::typeahead::{DisplayField, Dropdown};
use std::fmt::Write as _;

/// Characters of page text shown under each result.
const SNIPPET_CHARS: usize = 100;

/// Ranked results with relevance relative to the best hit.
pub fn format_matches(query: &str, matches: &[Match<'_>], near_misses: &[&DocumentRecord]) -> String {
    if matches.is_empty() {
        let mut output = format!("No results found for '{}'.\n", query);
        if !near_misses.is_empty() {
            output.push_str("\nDid you mean:\n");
            for record in near_misses {
                let _ = writeln!(output, "• {} ({})", record.title, record.url);
            }
        }
        return output;
    }

    let mut output = format!("Search results for '{}':\n\n", query);
    let max_score = matches.first().map_or(1.0, |m| m.score);

    for (idx, m) in matches.iter().enumerate() {
        let _ = writeln!(
            output,
            "{}. {} ({}) - relevance: {}%",
            idx + 1,
            m.record.title,
            m.record.url,
            relevance_percent(m.score, max_score)
        );

        let text = plain_text(&m.record.content);
        if !text.is_empty() {
            let _ = writeln!(output, "   {}", snippet(&text, SNIPPET_CHARS));
        }
        output.push('\n');
    }

    output
}

/// The typeahead dropdown, one numbered label per line.
pub fn format_dropdown(dropdown: &Dropdown, display: DisplayField) -> String {
    match dropdown {
        Dropdown::Hidden => String::new(),
        Dropdown::NoMatches => "No matches\n".to_string(),
        Dropdown::Suggestions(_) => {
            let mut output = String::new();
            for (idx, label) in dropdown.labels(display).iter().enumerate() {
                let _ = writeln!(output, "{}. {}", idx + 1, label);
            }
            output
        }
    }
}

/// A single record in full.
pub fn format_record(record: &DocumentRecord) -> String {
    format!(
        "{}\n{}\n\n{}\n",
        record.title,
        record.url,
        plain_text(&record.content)
    )
}

/// Store and index statistics.
pub fn format_stats(store: &DocumentStore, index: &SearchIndex) -> String {
    let untitled = store.find_all(|r| r.title.trim().is_empty()).len();
    let empty = store
        .find_all(|r| plain_text(&r.content).is_empty())
        .len();

    let mut output = String::new();
    let _ = writeln!(output, "Documents:        {}", store.len());
    let _ = writeln!(output, "Indexed:          {}", index.document_count());
    let _ = writeln!(output, "Unique terms:     {}", index.term_count());
    let _ = writeln!(output, "Untitled pages:   {}", untitled);
    let _ = writeln!(output, "Pages w/o text:   {}", empty);
    output
}
