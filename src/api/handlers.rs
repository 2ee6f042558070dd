use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{RecommendationRequest, RecommendationResponse},
};

use super::AppState;

/// Readiness message
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "K-Drama Recommendation API is running 🚀" }))
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "catalog_size": state.index.len(),
        "vocabulary_size": state.index.vocabulary_size(),
    }))
}

/// Resolves the requested title and returns its closest matches
///
/// A title that cannot be resolved still answers 200 with an `error` field.
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    request: Result<Json<RecommendationRequest>, axum::extract::rejection::JsonRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Json(request) = request?;

    tracing::info!(
        request_id = %request_id,
        query = %request.kdrama,
        "Processing recommendation request"
    );

    let response = state.index.resolve_and_recommend(&request.kdrama);

    tracing::info!(
        request_id = %request_id,
        results = response.recommendations().len(),
        "Recommendation completed"
    );

    Ok(Json(response))
}
