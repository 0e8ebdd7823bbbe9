//! Metadata editor contract
//!
//! GET/PUT /api/records/:id, POST /api/records/:id/draft

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::error::{ApiError, ApiResult};
use crate::models::{MetadataRecord, RecordDraft};
use crate::AppState;

/// GET /api/records/:id
pub async fn read_record(
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
) -> ApiResult<Json<MetadataRecord>> {
    state
        .catalog
        .read_metadata_record(&asset_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("metadata record {}", asset_id)))
}

/// PUT /api/records/:id (full overwrite)
pub async fn write_record(
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
    Json(record): Json<MetadataRecord>,
) -> ApiResult<Json<MetadataRecord>> {
    Ok(Json(state.catalog.write_metadata_record(&asset_id, record).await?))
}

/// POST /api/records/:id/draft
pub async fn write_draft(
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
    Json(draft): Json<RecordDraft>,
) -> ApiResult<Json<MetadataRecord>> {
    Ok(Json(state.catalog.write_record_draft(&asset_id, draft).await?))
}

pub fn record_routes() -> Router<AppState> {
    Router::new()
        .route("/api/records/:id", get(read_record).put(write_record))
        .route("/api/records/:id/draft", post(write_draft))
}
