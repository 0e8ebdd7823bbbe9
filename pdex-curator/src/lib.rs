//! pdex-curator library interface
//!
//! Image harvesting, deduplication, staging/promotion and catalog
//! reconciliation, plus the thin HTTP surface that exposes them.

pub mod api;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};
pub use crate::services::CatalogService;

use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(catalog: CatalogService) -> Self {
        Self {
            catalog,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let stores = state.catalog.stores().clone();

    Router::new()
        .merge(api::fetch_routes())
        .merge(api::catalog_routes())
        .merge(api::record_routes())
        .merge(api::health_routes())
        .nest_service("/images", ServeDir::new(&stores.canonical))
        .nest_service("/staging", ServeDir::new(&stores.staging))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
