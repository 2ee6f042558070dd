use crate::models::{CatalogRecord, DisplayRecord};

use super::similarity::SimilarityMatrix;

/// Number of recommendations returned per query
pub const RECOMMENDATION_LIMIT: usize = 10;

/// Ranks every row by similarity to `index` and projects the top results
///
/// Scores are sorted descending with a stable sort, so equal scores keep catalog
/// order. Position 0 of the ranking is dropped as the queried item itself; this is
/// positional, not an identity check.
pub fn recommend(
    index: usize,
    catalog: &[CatalogRecord],
    matrix: &SimilarityMatrix,
) -> Vec<DisplayRecord> {
    let Some(row) = matrix.row(index) else {
        tracing::warn!(index, "Recommendation requested for unknown row");
        return Vec::new();
    };

    let mut ranked: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranked
        .iter()
        .skip(1)
        .take(RECOMMENDATION_LIMIT)
        .filter_map(|&(candidate, score)| {
            let display = try_project_display_record(catalog, candidate);
            if display.is_none() {
                tracing::warn!(candidate, score, "Skipping unreadable catalog row");
            }
            display
        })
        .collect()
}

/// Display fields for a row, or `None` when the row cannot be read
pub fn try_project_display_record(catalog: &[CatalogRecord], row: usize) -> Option<DisplayRecord> {
    catalog.get(row).map(DisplayRecord::from)
}
