use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    index::MovieRecord,
    middleware::RequestId,
    models::EnrichedRecommendation,
    services::{recommendations, title_search},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct TitleSearchQuery {
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
    pub count: Option<usize>,
    /// Attach catalog metadata to each result
    #[serde(default)]
    pub enrich: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub title: String,
    /// False when the title is not in the corpus; `recommendations` is then empty
    pub found: bool,
    pub recommendations: Vec<EnrichedRecommendation>,
}

const DEFAULT_SEARCH_LIMIT: usize = 20;

// Handlers

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "movies": state.index.len(),
            "enrichment": state.enricher.is_enabled(),
        })),
    )
}

/// Substring search over corpus titles
pub async fn search_titles(
    State(state): State<AppState>,
    Query(params): Query<TitleSearchQuery>,
) -> AppResult<Json<Vec<MovieRecord>>> {
    if params.q.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT).min(state.index.len());
    let titles = title_search::search_titles(&state.index, &params.q, limit)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(titles))
}

/// Top-N similar titles, optionally enriched
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let title = params.title.trim();
    if title.is_empty() {
        return Err(AppError::InvalidInput("title cannot be empty".to_string()));
    }

    let count = params.count.unwrap_or(state.default_count);
    if count == 0 || count > state.max_count {
        return Err(AppError::InvalidInput(format!(
            "count must be between 1 and {}",
            state.max_count
        )));
    }

    tracing::info!(
        request_id = %request_id,
        title = %title,
        count,
        enrich = params.enrich,
        "Processing recommendation request"
    );

    let found = state.index.contains(title);
    let recommendations = if params.enrich {
        recommendations::recommend_enriched(&state.index, &state.enricher, title, count).await
    } else {
        recommendations::recommend(&state.index, title, count)
            .into_iter()
            .map(|recommendation| EnrichedRecommendation {
                recommendation,
                enrichment: None,
            })
            .collect()
    };

    Ok(Json(RecommendationResponse {
        title: title.to_string(),
        found,
        recommendations,
    }))
}

/// A random movie from the corpus
pub async fn random_movie(State(state): State<AppState>) -> AppResult<Json<MovieRecord>> {
    let mut rng = rand::rng();
    title_search::random_movie(&state.index, &mut rng)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("corpus is empty".to_string()))
}
