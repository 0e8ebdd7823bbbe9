//! Catalog operations
//!
//! The single entry point callers use. Operations are serialized through one
//! gate: each runs to completion before the next starts. Filesystem work runs
//! on the blocking pool and re-reads the stores every time.

use super::cursor::{parse_requested_index, CursorView};
use super::fetcher::ImageFetcher;
use super::metadata_store::MetadataStore;
use super::promotion::{DiscardOutcome, PromotionEngine};
use super::reconciler::{CatalogReconciler, CurationProgress};
use super::run_blocking;
use crate::models::{BatchOutcome, FetchReport, MetadataRecord, RecordDraft};
use pdex_common::config::FetchSettings;
use pdex_common::store::validate_file_name;
use pdex_common::{Asset, CatalogStores, Error, Result};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct CatalogService {
    stores: CatalogStores,
    fetcher: Arc<ImageFetcher>,
    op_gate: Arc<Mutex<()>>,
}

impl CatalogService {
    pub fn new(stores: CatalogStores, fetch_settings: FetchSettings) -> Result<Self> {
        let fetcher = ImageFetcher::new(fetch_settings, stores.clone())?;
        Ok(Self {
            stores,
            fetcher: Arc::new(fetcher),
            op_gate: Arc::new(Mutex::new(())),
        })
    }

    pub fn stores(&self) -> &CatalogStores {
        &self.stores
    }

    /// Fetch a page and stage its images
    ///
    /// Discards whatever the previous fetch left in staging.
    pub async fn fetch_from_url(&self, url: &str, prefix: Option<&str>) -> Result<FetchReport> {
        let _gate = self.op_gate.lock().await;
        self.fetcher.fetch(url, prefix).await
    }

    /// Promote the selected staged files and discard the rest
    pub async fn promote_selected(&self, filenames: Vec<String>) -> Result<BatchOutcome> {
        let _gate = self.op_gate.lock().await;
        let engine = PromotionEngine::new(self.stores.clone());
        run_blocking(move || engine.promote(&filenames)).await
    }

    /// Remove an asset image and its record
    pub async fn discard_asset(&self, asset_id: &str) -> Result<DiscardOutcome> {
        let _gate = self.op_gate.lock().await;
        let engine = PromotionEngine::new(self.stores.clone());
        let asset_id = asset_id.to_string();
        run_blocking(move || engine.discard_asset(&asset_id)).await
    }

    /// Delete metadata records that have no asset
    pub async fn reconcile_orphans(&self) -> Result<BatchOutcome> {
        let _gate = self.op_gate.lock().await;
        let reconciler = CatalogReconciler::new(self.stores.clone());
        run_blocking(move || reconciler.reconcile_orphans()).await
    }

    pub async fn curation_progress(&self) -> Result<CurationProgress> {
        let _gate = self.op_gate.lock().await;
        let reconciler = CatalogReconciler::new(self.stores.clone());
        run_blocking(move || reconciler.progress()).await
    }

    /// Cursor view for a raw requested index (query-string form), or for the
    /// resume point when absent
    pub async fn resolve_entry_point(&self, requested: Option<&str>) -> Result<CursorView> {
        let _gate = self.op_gate.lock().await;
        let requested = parse_requested_index(requested);
        let stores = self.stores.clone();
        run_blocking(move || CursorView::load(&stores, requested)).await
    }

    /// Read a record; `Ok(None)` when the asset has none yet
    pub async fn read_metadata_record(&self, asset_id: &str) -> Result<Option<MetadataRecord>> {
        let _gate = self.op_gate.lock().await;
        let metadata = MetadataStore::new(self.stores.metadata.clone());
        let asset_id = asset_id.to_string();
        run_blocking(move || metadata.read(&asset_id)).await
    }

    /// Overwrite the record of an existing asset
    ///
    /// The asset must exist, so no orphan can be written. The stored record is
    /// bound to the asset (id, serving path, non-empty affiliation).
    pub async fn write_metadata_record(
        &self,
        asset_id: &str,
        record: MetadataRecord,
    ) -> Result<MetadataRecord> {
        let _gate = self.op_gate.lock().await;
        let stores = self.stores.clone();
        let asset_id = asset_id.to_string();

        run_blocking(move || {
            let asset = existing_asset(&stores, &asset_id)?;
            let record = record.bind_to(&asset);
            MetadataStore::new(stores.metadata.clone()).write(&asset.id, &record)?;
            Ok(record)
        })
        .await
    }

    /// Editor form submission: build the record from the draft, then write it
    pub async fn write_record_draft(&self, asset_id: &str, draft: RecordDraft) -> Result<MetadataRecord> {
        let _gate = self.op_gate.lock().await;
        let stores = self.stores.clone();
        let asset_id = asset_id.to_string();

        run_blocking(move || {
            let asset = existing_asset(&stores, &asset_id)?;
            let record = draft.into_record(&asset);
            MetadataStore::new(stores.metadata.clone()).write(&asset.id, &record)?;
            Ok(record)
        })
        .await
    }
}

fn existing_asset(stores: &CatalogStores, asset_id: &str) -> Result<Asset> {
    let asset_id = validate_file_name(asset_id)?;
    stores
        .find_asset(asset_id)?
        .ok_or_else(|| Error::NotFound(format!("asset {}", asset_id)))
}
