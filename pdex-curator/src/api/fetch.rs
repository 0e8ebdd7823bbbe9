//! Harvest and promotion handlers
//!
//! POST /api/fetch, POST /api/promote

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::models::{BatchOutcome, FetchReport};
use crate::AppState;

/// POST /api/fetch request
#[derive(Debug, Deserialize)]
pub struct FetchRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub prefix: Option<String>,
}

/// POST /api/promote request
#[derive(Debug, Deserialize)]
pub struct PromoteRequest {
    #[serde(default)]
    pub filenames: Vec<String>,
}

/// POST /api/fetch
///
/// Clears staging, then stages the page's images. Retrying discards any
/// selection not yet promoted.
pub async fn fetch_from_url(
    State(state): State<AppState>,
    Json(request): Json<FetchRequest>,
) -> ApiResult<Json<FetchReport>> {
    let url = request
        .url
        .ok_or_else(|| ApiError::BadRequest("url is required".to_string()))?;

    let report = state
        .catalog
        .fetch_from_url(&url, request.prefix.as_deref())
        .await?;

    Ok(Json(report))
}

/// POST /api/promote
pub async fn promote_selected(
    State(state): State<AppState>,
    Json(request): Json<PromoteRequest>,
) -> ApiResult<Json<BatchOutcome>> {
    let outcome = state.catalog.promote_selected(request.filenames).await?;
    Ok(Json(outcome))
}

pub fn fetch_routes() -> Router<AppState> {
    Router::new()
        .route("/api/fetch", post(fetch_from_url))
        .route("/api/promote", post(promote_selected))
}
