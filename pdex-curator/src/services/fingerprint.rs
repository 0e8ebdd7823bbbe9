//! Content fingerprints and the canonical fingerprint index
//!
//! A fingerprint is the SHA-256 of the exact file bytes. It is the only
//! duplicate criterion: filenames, sizes and visual similarity play no part.
//!
//! The index is rebuilt from scratch for every dedup cycle; nothing is cached
//! between cycles.

use crate::models::ItemFailure;
use pdex_common::store::list_files;
use pdex_common::{Asset, AssetId, Error, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

const READ_CHUNK_BYTES: usize = 1024 * 1024;

/// Lowercase hex SHA-256 of a file's content
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fingerprint of an in-memory byte buffer
pub fn fingerprint(bytes: &[u8]) -> Fingerprint {
    Fingerprint(format!("{:x}", Sha256::digest(bytes)))
}

/// Fingerprint of a file, read in 1MB chunks
pub fn fingerprint_file(path: &Path) -> Result<Fingerprint> {
    let mut file = File::open(path).map_err(|e| Error::io_at("open for hashing", path, e))?;

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; READ_CHUNK_BYTES];

    loop {
        let bytes_read = file
            .read(&mut buffer)
            .map_err(|e| Error::io_at("read for hashing", path, e))?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(Fingerprint(format!("{:x}", hasher.finalize())))
}

/// Fingerprint → canonical asset id
#[derive(Debug, Default)]
pub struct FingerprintIndex {
    by_fingerprint: HashMap<Fingerprint, AssetId>,
    skipped: Vec<ItemFailure>,
}

impl FingerprintIndex {
    /// Hash every catalog image directly inside `store_dir`
    ///
    /// When two assets share content, the first in filename order wins.
    pub fn build(store_dir: &Path) -> Result<Self> {
        let index = Self::from_paths(list_files(store_dir)?);

        tracing::debug!(
            store = %store_dir.display(),
            fingerprints = index.by_fingerprint.len(),
            skipped = index.skipped.len(),
            "Built fingerprint index"
        );

        Ok(index)
    }

    /// Hash the catalog images among `paths`, in the given order
    ///
    /// Unreadable files are skipped (and listed in [`Self::skipped`]); the scan
    /// goes on.
    pub fn from_paths<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut index = Self::default();

        for path in paths {
            let Some(asset) = Asset::from_path(&path) else {
                continue;
            };

            match fingerprint_file(&asset.path) {
                Ok(fp) => {
                    index.by_fingerprint.entry(fp).or_insert(asset.id);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable asset");
                    index.skipped.push(ItemFailure::new(asset.filename, e));
                }
            }
        }

        index
    }

    /// Asset currently holding this content, if any
    pub fn lookup(&self, fingerprint: &Fingerprint) -> Option<&AssetId> {
        self.by_fingerprint.get(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.by_fingerprint.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_fingerprint.is_empty()
    }

    /// Files that could not be hashed during the build
    pub fn skipped(&self) -> &[ItemFailure] {
        &self.skipped
    }
}
