use serde::{Deserialize, Serialize};

pub mod record;

pub use record::{CatalogRecord, DisplayRecord};

/// Body of `POST /recommendation`
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    /// Free-text title typed by the user
    pub kdrama: String,
}

/// Body returned by `POST /recommendation`
///
/// Both variants are served with a 200 status; a failed lookup is reported in-band.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RecommendationResponse {
    Matched {
        matched_kdrama: String,
        recommendations: Vec<DisplayRecord>,
    },
    NoMatch {
        error: String,
        recommendations: Vec<DisplayRecord>,
    },
}

impl RecommendationResponse {
    /// Builds the empty in-band failure body
    pub fn no_match(error: impl Into<String>) -> Self {
        RecommendationResponse::NoMatch {
            error: error.into(),
            recommendations: Vec::new(),
        }
    }

    pub fn recommendations(&self) -> &[DisplayRecord] {
        match self {
            RecommendationResponse::Matched {
                recommendations, ..
            }
            | RecommendationResponse::NoMatch {
                recommendations, ..
            } => recommendations,
        }
    }
}
