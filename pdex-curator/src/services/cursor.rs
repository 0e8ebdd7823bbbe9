//! Curation cursor: where sequential review should resume
//!
//! The session is derived on every call from the canonical store (sorted by
//! filename) and the metadata store. Nothing is persisted.

use super::metadata_store::MetadataStore;
use crate::models::MetadataRecord;
use pdex_common::{Asset, AssetId, CatalogStores, Result};
use serde::Serialize;

/// Listing label for assets without a metadata record
pub const RECORD_MISSING_LABEL: &str = "(record missing)";

/// Index of the first asset lacking a record, or `assets.len()` when every
/// asset has one
pub fn resolve_entry_point<F>(assets: &[Asset], has_record: F) -> usize
where
    F: Fn(&Asset) -> bool,
{
    assets
        .iter()
        .position(|a| !has_record(a))
        .unwrap_or(assets.len())
}

/// Normalize a caller-supplied index
///
/// Absent → `None` (use the resolved entry point). Anything that is not a
/// plain run of digits (negative, signed, blank, garbage) → `Some(0)`.
/// Numbers too large for `usize` saturate and so land on the complete state.
pub fn parse_requested_index(raw: Option<&str>) -> Option<usize> {
    let raw = raw?;

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Some(0);
    }

    Some(raw.parse::<usize>().unwrap_or(usize::MAX))
}

/// Where the cursor points
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CursorPosition {
    Reviewing {
        index: usize,
        total: usize,
        asset: Asset,
        record: Option<MetadataRecord>,
        /// Set when the record file exists but could not be read
        #[serde(skip_serializing_if = "Option::is_none")]
        record_error: Option<String>,
    },
    Complete {
        total: usize,
    },
}

/// One row of the jump-to listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub index: usize,
    pub asset_id: AssetId,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CursorView {
    pub position: CursorPosition,
    pub listing: Vec<ListingEntry>,
}

impl CursorView {
    /// Build the view for an explicit index, or for the resume point when `None`
    pub fn load(stores: &CatalogStores, requested: Option<usize>) -> Result<Self> {
        let assets = stores.list_assets()?;
        let metadata = MetadataStore::new(stores.metadata.clone());

        let index = match requested {
            Some(index) => index,
            None => resolve_entry_point(&assets, |a| metadata.exists(&a.id)),
        };

        let listing = assets
            .iter()
            .enumerate()
            .map(|(i, asset)| ListingEntry {
                index: i,
                asset_id: asset.id.clone(),
                label: listing_label(&metadata, &asset.id),
            })
            .collect();

        let position = match assets.get(index) {
            Some(asset) => {
                let (record, record_error) = match metadata.read(&asset.id) {
                    Ok(record) => (record, None),
                    Err(e) => {
                        tracing::warn!(asset_id = %asset.id, error = %e, "Unreadable metadata record");
                        (None, Some(e.to_string()))
                    }
                };

                CursorPosition::Reviewing {
                    index,
                    total: assets.len(),
                    asset: asset.clone(),
                    record,
                    record_error,
                }
            }
            None => CursorPosition::Complete { total: assets.len() },
        };

        Ok(Self { position, listing })
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.position, CursorPosition::Complete { .. })
    }
}

fn listing_label(metadata: &MetadataStore, asset_id: &str) -> String {
    match metadata.read(asset_id) {
        Ok(Some(record)) => record.display_label(),
        Ok(None) => RECORD_MISSING_LABEL.to_string(),
        Err(e) => {
            tracing::warn!(asset_id, error = %e, "Unreadable metadata record");
            RECORD_MISSING_LABEL.to_string()
        }
    }
}
