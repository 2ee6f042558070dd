use serde::{Deserialize, Serialize};

/// One catalog row after loading and normalization
///
/// Every field is a plain string; absent values are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRecord {
    pub title: String,
    /// Lowercased, trimmed title used for exact lookups
    pub title_key: String,
    pub rating: String,
    pub genres: String,
    pub synopsis: String,
    pub main_lead1: String,
    pub main_lead2: String,
    pub writer: String,
    pub director: String,
    pub image_url: String,
}

impl CatalogRecord {
    /// Lowercases and trims a display title into its lookup key
    pub fn title_key_for(title: &str) -> String {
        title.to_lowercase().trim().to_string()
    }

    /// Recomputes `title_key` from `title`
    pub fn with_title_key(mut self) -> Self {
        self.title_key = Self::title_key_for(&self.title);
        self
    }
}

/// Fields of a recommended item returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayRecord {
    pub title: String,
    pub image_url: String,
    pub rating: String,
    pub genres: String,
    pub synopsis: String,
}

impl From<&CatalogRecord> for DisplayRecord {
    fn from(record: &CatalogRecord) -> Self {
        Self {
            title: record.title.clone(),
            image_url: record.image_url.clone(),
            rating: record.rating.clone(),
            genres: record.genres.clone(),
            synopsis: record.synopsis.clone(),
        }
    }
}
