//! Reduces page HTML to plain text before tokenization and display.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// `<script>` and `<style>` elements, whose bodies are never page text.
static HIDDEN_BLOCKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(?:script|style)\b[^>]*>.*?</(?:script|style)\s*>")
        .expect("hidden block pattern is valid")
});

static TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|<[^>]*>").expect("tag pattern is valid"));

static ENTITIES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]{1,6}|#[0-9]{1,7}|[a-zA-Z]+);").expect("entity pattern is valid")
});

/// Strips markup from `html`, decodes common entities and collapses whitespace.
///
/// Tags are replaced by a space so that `<li>one</li><li>two</li>` still yields
/// two words.
pub fn plain_text(html: &str) -> String {
    let without_blocks = HIDDEN_BLOCKS.replace_all(html, " ");
    let without_tags = TAGS.replace_all(&without_blocks, " ");
    let decoded = ENTITIES.replace_all(&without_tags, |caps: &Captures<'_>| decode_entity(caps));

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn decode_entity(caps: &Captures<'_>) -> String {
    let name = &caps[1];
    let decoded = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => name.strip_prefix('#').and_then(|num| {
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => num.parse::<u32>().ok(),
            };
            code.and_then(char::from_u32)
        }),
    };

    decoded.map_or_else(|| caps[0].to_string(), String::from)
}

/// First `max_chars` characters of `text`, cut at a word boundary and marked
/// with an ellipsis when shortened.
pub fn snippet(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_chars).collect();
    let trimmed = match cut.rfind(' ') {
        Some(space) if space > 0 => &cut[..space],
        _ => cut.as_str(),
    };
    format!("{}…", trimmed.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("<p>Hello <b>world</b></p>", "Hello world")]
    #[case("<li>one</li><li>two</li>", "one two")]
    #[case("a &amp; b &lt;c&gt;", "a & b <c>")]
    #[case("caf&#233; &#x41;", "café A")]
    #[case("keep &unknown; as is", "keep &unknown; as is")]
    #[case("<script>var x = 1;</script>text<style>p{}</style>", "text")]
    #[case("<!-- hidden -->shown", "shown")]
    #[case("  spaced\n\tout  ", "spaced out")]
    fn test_plain_text(#[case] html: &str, #[case] expected: &str) {
        check!(plain_text(html) == expected);
    }

    #[rstest]
    #[case("short", 10, "short")]
    #[case("the quick brown fox", 12, "the quick…")]
    #[case("unbroken", 4, "unbr…")]
    fn test_snippet(#[case] text: &str, #[case] max: usize, #[case] expected: &str) {
        check!(snippet(text, max) == expected);
    }
}
