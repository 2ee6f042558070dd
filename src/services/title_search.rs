use unicode_normalization::UnicodeNormalization;

use crate::{error::ResolveError, models::CatalogRecord};

use super::sequence_match::SequenceMatcher;

/// Minimum character-match ratio for an approximate title match
pub const FUZZY_CUTOFF: f64 = 0.6;

/// Aggressively normalizes a user query
///
/// NFKD decomposition, lowercase, punctuation and combining marks removed,
/// whitespace runs collapsed and ends trimmed.
pub fn normalize_query(text: &str) -> String {
    let stripped: String = text
        .nfkd()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Block-matching ratio of a catalog key against the query, in `0..=1`
pub fn match_ratio(candidate: &str, query: &str) -> f64 {
    SequenceMatcher::new(candidate, query).ratio()
}

/// Maps a free-text query to a catalog row index
///
/// Exact `title_key` equality wins first; otherwise the closest key with a ratio of
/// at least [`FUZZY_CUTOFF`] is chosen and looked up again by key.
pub fn resolve(query: &str, catalog: &[CatalogRecord]) -> Result<usize, ResolveError> {
    let normalized = normalize_query(query);

    if let Some(index) = find_by_key(catalog, &normalized) {
        tracing::debug!(query = %normalized, index, "Exact title match");
        return Ok(index);
    }

    let best = closest_key(&normalized, catalog).ok_or(ResolveError::NoMatchFound)?;
    tracing::debug!(query = %normalized, matched = %best, "Approximate title match");

    find_by_key(catalog, best).ok_or(ResolveError::MatchedRowMissing)
}

/// First row whose key equals `key`
fn find_by_key(catalog: &[CatalogRecord], key: &str) -> Option<usize> {
    catalog.iter().position(|record| record.title_key == key)
}

/// Best-scoring key above the cutoff; equal scores prefer the greater key
fn closest_key<'a>(query: &str, catalog: &'a [CatalogRecord]) -> Option<&'a str> {
    catalog
        .iter()
        .map(|record| {
            let key = record.title_key.as_str();
            (match_ratio(key, query), key)
        })
        .filter(|(score, _)| *score >= FUZZY_CUTOFF)
        .max_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1)))
        .map(|(_, key)| key)
}
