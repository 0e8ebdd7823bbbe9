//! # pdex Common Library
//!
//! Shared code for the pdex catalog tools:
//! - Error type shared by every pipeline stage
//! - Configuration loading and root folder resolution
//! - Store layout (canonical, staging and metadata directories)
//! - Canonical asset model and store listing

pub mod asset;
pub mod config;
pub mod error;
pub mod store;

pub use asset::{Asset, AssetId};
pub use error::{Error, Result};
pub use store::CatalogStores;
