//! Duplicate classification of staged candidates
//!
//! Candidates are compared against the canonical store only. Two candidates
//! of one batch with identical bytes are both novel unless the store already
//! holds that content.

use super::fingerprint::FingerprintIndex;
use crate::models::{DuplicateEntry, StagingEntry};
use pdex_common::AssetId;

/// Classification of one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Content not present in the canonical store
    Novel,
    /// Content identical to an existing canonical asset
    Duplicate { existing_asset_id: AssetId },
}

/// Resolves candidates against a canonical fingerprint index
pub struct DedupResolver {
    index: FingerprintIndex,
}

impl DedupResolver {
    pub fn new(index: FingerprintIndex) -> Self {
        Self { index }
    }

    pub fn classify(&self, entry: &StagingEntry) -> Classification {
        match self.index.lookup(&entry.fingerprint) {
            Some(existing) => Classification::Duplicate {
                existing_asset_id: existing.clone(),
            },
            None => Classification::Novel,
        }
    }

    /// Split candidates into novel ones and duplicates of existing assets
    pub fn partition(&self, entries: Vec<StagingEntry>) -> (Vec<StagingEntry>, Vec<DuplicateEntry>) {
        let mut novel = Vec::new();
        let mut duplicates = Vec::new();

        for entry in entries {
            match self.classify(&entry) {
                Classification::Novel => novel.push(entry),
                Classification::Duplicate { existing_asset_id } => {
                    tracing::info!(
                        staged = %entry.filename,
                        existing = %existing_asset_id,
                        "Duplicate content detected"
                    );
                    duplicates.push(DuplicateEntry {
                        entry,
                        existing_asset_id,
                    });
                }
            }
        }

        (novel, duplicates)
    }
}
