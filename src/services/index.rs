use std::{path::Path, time::Instant};

use crate::{
    error::{CatalogError, ResolveError},
    models::{CatalogRecord, DisplayRecord, RecommendationResponse},
};

use super::{
    catalog, features, recommendations,
    similarity::SimilarityMatrix,
    title_search,
    vectorizer::VectorIndex,
};

/// Immutable catalog with its precomputed vectors and similarity matrix
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug)]
pub struct CatalogIndex {
    records: Vec<CatalogRecord>,
    vectors: VectorIndex,
    similarity: SimilarityMatrix,
}

impl CatalogIndex {
    /// Loads a CSV catalog and builds every derived structure
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let records = catalog::load_from_path(path)?;
        Ok(Self::build(records))
    }

    /// Builds an index from records that have not been normalized yet
    pub fn from_records(records: Vec<CatalogRecord>) -> Self {
        Self::build(catalog::normalize_records(records))
    }

    fn build(records: Vec<CatalogRecord>) -> Self {
        let started = Instant::now();

        let blobs = features::compose_all(&records);
        let vectors = VectorIndex::build(&blobs);
        let similarity = SimilarityMatrix::build(vectors.vectors());

        tracing::info!(
            records = records.len(),
            vocabulary = vectors.vocabulary_size(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Catalog index built"
        );

        Self {
            records,
            vectors,
            similarity,
        }
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectors.vocabulary_size()
    }

    #[cfg(test)]
    pub(crate) fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn resolve(&self, query: &str) -> Result<usize, ResolveError> {
        title_search::resolve(query, &self.records)
    }

    pub fn recommend(&self, index: usize) -> Vec<DisplayRecord> {
        recommendations::recommend(index, &self.records, &self.similarity)
    }

    /// Resolves a query and ranks the catalog against the matched row
    pub fn resolve_and_recommend(&self, query: &str) -> RecommendationResponse {
        match self.resolve(query) {
            Ok(index) => RecommendationResponse::Matched {
                matched_kdrama: self.records[index].title.clone(),
                recommendations: self.recommend(index),
            },
            Err(e) => {
                tracing::info!(query, reason = %e, "No recommendation target");
                RecommendationResponse::no_match(e.to_string())
            }
        }
    }
}
