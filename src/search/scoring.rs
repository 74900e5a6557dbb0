//! Relevance presentation and fuzzy title matching.

use rapidfuzz::distance::jaro_winkler;

/// Minimum jaro-winkler similarity for a title to count as a near miss.
pub const NEAR_MISS_THRESHOLD: f64 = 0.8;

/// Expresses `score` as a percentage of the best score in the result set.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn relevance_percent(score: f32, max_score: f32) -> u8 {
    if max_score <= 0.0 {
        return 0;
    }
    // Clamped to 0..=100 before the cast
    (score / max_score * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Case-insensitive similarity of a query to a page title (0.0 to 1.0).
pub fn title_similarity(query: &str, title: &str) -> f64 {
    let query = query.trim().to_lowercase();
    let title = title.to_lowercase();
    jaro_winkler::similarity(query.chars(), title.chars())
}
