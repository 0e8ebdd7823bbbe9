//! Curation pipeline services
//!
//! Leaves first: fingerprints → page scanning → staging → dedup → fetcher →
//! promotion → reconciliation → cursor. [`CatalogService`] ties them together
//! into the operations exposed to callers.

pub mod catalog;
pub mod cursor;
pub mod dedup;
pub mod fetcher;
pub mod fingerprint;
pub mod metadata_store;
pub mod page_scanner;
pub mod promotion;
pub mod reconciler;
pub mod staging;

pub use catalog::CatalogService;
pub use cursor::{CursorPosition, CursorView};
pub use dedup::{Classification, DedupResolver};
pub use fetcher::ImageFetcher;
pub use fingerprint::{fingerprint, Fingerprint, FingerprintIndex};
pub use metadata_store::MetadataStore;
pub use promotion::{DiscardOutcome, PromotionEngine};
pub use reconciler::{CatalogReconciler, CurationProgress};
pub use staging::StagingArea;

use pdex_common::{Error, Result};

/// Run filesystem-bound work off the async runtime
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| Error::Internal(format!("Blocking task failed: {}", e)))?
}
