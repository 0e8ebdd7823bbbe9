//! Catalog maintenance and review handlers
//!
//! DELETE /api/assets/:id, POST /api/reconcile, GET /api/cursor, GET /api/progress

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::models::BatchOutcome;
use crate::services::{CurationProgress, CursorView, DiscardOutcome};
use crate::AppState;

/// GET /api/cursor query
#[derive(Debug, Deserialize)]
pub struct CursorQuery {
    /// Kept as raw text: malformed values normalize to 0 rather than 400
    #[serde(default)]
    pub index: Option<String>,
}

/// DELETE /api/assets/:id
pub async fn discard_asset(
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
) -> ApiResult<Json<DiscardOutcome>> {
    Ok(Json(state.catalog.discard_asset(&asset_id).await?))
}

/// POST /api/reconcile
pub async fn reconcile_orphans(State(state): State<AppState>) -> ApiResult<Json<BatchOutcome>> {
    Ok(Json(state.catalog.reconcile_orphans().await?))
}

/// GET /api/cursor?index=N
pub async fn cursor(
    State(state): State<AppState>,
    Query(query): Query<CursorQuery>,
) -> ApiResult<Json<CursorView>> {
    Ok(Json(state.catalog.resolve_entry_point(query.index.as_deref()).await?))
}

/// GET /api/progress
pub async fn progress(State(state): State<AppState>) -> ApiResult<Json<CurationProgress>> {
    Ok(Json(state.catalog.curation_progress().await?))
}

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/api/assets/:id", delete(discard_asset))
        .route("/api/reconcile", post(reconcile_orphans))
        .route("/api/cursor", get(cursor))
        .route("/api/progress", get(progress))
}
