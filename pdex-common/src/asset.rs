//! Canonical asset model

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Asset identifier: the image filename without its extension
pub type AssetId = String;

/// Extensions (lowercase) that mark a file as a catalog asset
pub const ASSET_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// A canonical image file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    /// Filename without extension
    pub id: AssetId,
    /// Filename including extension
    pub filename: String,
    /// Location in the canonical store
    #[serde(skip)]
    pub path: PathBuf,
}

impl Asset {
    /// Build an asset from a path if it names a catalog image
    pub fn from_path(path: &Path) -> Option<Self> {
        if !is_asset_file(path) {
            return None;
        }

        let filename = path.file_name()?.to_str()?.to_string();
        let id = path.file_stem()?.to_str()?.to_string();

        Some(Self {
            id,
            filename,
            path: path.to_path_buf(),
        })
    }
}

/// Check extension (case-insensitive) against the asset extension set
pub fn is_asset_file(path: &Path) -> bool {
    match path.extension() {
        Some(ext) => {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            ASSET_EXTENSIONS.contains(&ext_lower.as_str())
        }
        None => false,
    }
}
