//! Promotion of approved candidates and removal of canonical assets
//!
//! Promotion is best-effort, not atomic: a failed move is reported and the
//! remaining selections are still processed. Whatever happens, the staging
//! area is swept afterwards.

use super::metadata_store::MetadataStore;
use super::staging::StagingArea;
use crate::models::{BatchOutcome, ItemFailure};
use pdex_common::store::validate_file_name;
use pdex_common::{CatalogStores, Error, Result};
use serde::Serialize;
use std::path::Path;

/// What `discard_asset` actually removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiscardOutcome {
    pub image_removed: bool,
    pub record_removed: bool,
}

pub struct PromotionEngine {
    stores: CatalogStores,
}

impl PromotionEngine {
    pub fn new(stores: CatalogStores) -> Self {
        Self { stores }
    }

    /// Move the selected staged files into the canonical store, then empty staging
    ///
    /// Selected names missing from staging are skipped silently. `count` is the
    /// number of files moved.
    pub fn promote(&self, selected: &[String]) -> Result<BatchOutcome> {
        let staging = StagingArea::new(self.stores.staging.clone());
        let mut outcome = BatchOutcome::default();

        for name in selected {
            let filename = match validate_file_name(name) {
                Ok(filename) => filename,
                Err(e) => {
                    outcome.record_failure(ItemFailure::new(name.as_str(), e));
                    continue;
                }
            };

            let from = staging.dir().join(filename);
            if !from.is_file() {
                tracing::debug!(filename, "Selected file not in staging, skipping");
                continue;
            }

            let to = self.stores.canonical_path(filename);
            match move_file(&from, &to) {
                Ok(()) => {
                    tracing::info!(filename, "Promoted to canonical store");
                    outcome.record_success();
                }
                Err(e) => outcome.record_failure(ItemFailure::new(filename, e)),
            }
        }

        let swept = staging.clear()?;
        outcome.failures.extend(swept.failures);

        tracing::info!(
            promoted = outcome.count,
            discarded = swept.count,
            failed = outcome.failures.len(),
            "Promotion cycle complete"
        );

        Ok(outcome)
    }

    /// Remove an asset's canonical image(s) and its metadata record
    ///
    /// Idempotent: absent files and records are not errors.
    pub fn discard_asset(&self, asset_id: &str) -> Result<DiscardOutcome> {
        let asset_id = validate_file_name(asset_id)?;
        let mut outcome = DiscardOutcome::default();

        for asset in self.stores.assets_with_id(asset_id)? {
            match std::fs::remove_file(&asset.path) {
                Ok(()) => outcome.image_removed = true,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(Error::io_at("remove", &asset.path, e)),
            }
        }

        outcome.record_removed = MetadataStore::new(self.stores.metadata.clone()).delete(asset_id)?;

        tracing::info!(
            asset_id,
            image_removed = outcome.image_removed,
            record_removed = outcome.record_removed,
            "Asset discarded"
        );

        Ok(outcome)
    }
}

/// Rename, falling back to copy + delete when source and target live on
/// different filesystems
fn move_file(from: &Path, to: &Path) -> Result<()> {
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }

    std::fs::copy(from, to).map_err(|e| Error::io_at("copy", from, e))?;
    std::fs::remove_file(from).map_err(|e| Error::io_at("remove", from, e))?;
    Ok(())
}
