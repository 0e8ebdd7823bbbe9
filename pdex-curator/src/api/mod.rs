//! HTTP API handlers
//!
//! Thin JSON wrappers over [`crate::CatalogService`]; no pipeline logic lives here.

pub mod catalog;
pub mod fetch;
pub mod health;
pub mod records;

pub use catalog::catalog_routes;
pub use fetch::fetch_routes;
pub use health::health_routes;
pub use records::record_routes;
