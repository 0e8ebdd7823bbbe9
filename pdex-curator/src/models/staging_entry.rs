//! Staged candidates and the fetch report

use super::batch::ItemFailure;
use crate::services::fingerprint::Fingerprint;
use pdex_common::AssetId;
use serde::Serialize;

/// A fetched candidate sitting in the staging area
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagingEntry {
    /// Synthetic `<prefix>_<unix-seconds>_<index>.<ext>` name
    pub filename: String,
    pub fingerprint: Fingerprint,
    pub source_url: String,
    pub size_bytes: usize,
}

/// A staged candidate whose content already exists in the canonical store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateEntry {
    #[serde(flatten)]
    pub entry: StagingEntry,
    pub existing_asset_id: AssetId,
}

/// Outcome of one fetch cycle
#[derive(Debug, Clone, Default, Serialize)]
pub struct FetchReport {
    pub novel: Vec<StagingEntry>,
    pub duplicates: Vec<DuplicateEntry>,
    /// Per-candidate download, type or write failures
    pub failures: Vec<ItemFailure>,
    /// Candidates rejected by URL filters before download
    pub filtered: usize,
    /// Downloads discarded for being below the size threshold
    pub undersized: usize,
}

impl FetchReport {
    /// Number of candidates left in staging
    pub fn staged(&self) -> usize {
        self.novel.len() + self.duplicates.len()
    }
}
