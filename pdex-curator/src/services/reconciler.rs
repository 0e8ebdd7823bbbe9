//! Catalog consistency between canonical assets and metadata records

use super::metadata_store::MetadataStore;
use crate::models::{BatchOutcome, ItemFailure};
use pdex_common::{AssetId, CatalogStores, Result};
use serde::Serialize;

/// How far curation has progressed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurationProgress {
    pub total_assets: usize,
    pub with_record: usize,
    /// Assets without a metadata record, in filename order
    pub missing: Vec<AssetId>,
}

impl CurationProgress {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

pub struct CatalogReconciler {
    stores: CatalogStores,
}

impl CatalogReconciler {
    pub fn new(stores: CatalogStores) -> Self {
        Self { stores }
    }

    /// Delete metadata records whose asset no longer exists
    ///
    /// Never touches the canonical store. `count` is the number of records
    /// removed; running it again right away removes nothing.
    pub fn reconcile_orphans(&self) -> Result<BatchOutcome> {
        let valid_ids = self.stores.asset_ids()?;
        let metadata = MetadataStore::new(self.stores.metadata.clone());
        let mut outcome = BatchOutcome::default();

        for record_id in metadata.list_ids()? {
            if valid_ids.contains(&record_id) {
                continue;
            }

            match metadata.delete(&record_id) {
                Ok(true) => {
                    tracing::info!(record_id = %record_id, "Removed orphan metadata record");
                    outcome.record_success();
                }
                Ok(false) => {}
                Err(e) => outcome.record_failure(ItemFailure::new(record_id, e)),
            }
        }

        tracing::info!(removed = outcome.count, "Orphan reconciliation complete");
        Ok(outcome)
    }

    /// Which assets still lack a metadata record
    pub fn progress(&self) -> Result<CurationProgress> {
        let assets = self.stores.list_assets()?;
        let metadata = MetadataStore::new(self.stores.metadata.clone());

        let missing: Vec<AssetId> = assets
            .iter()
            .filter(|a| !metadata.exists(&a.id))
            .map(|a| a.id.clone())
            .collect();

        Ok(CurationProgress {
            total_assets: assets.len(),
            with_record: assets.len() - missing.len(),
            missing,
        })
    }
}
