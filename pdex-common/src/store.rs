//! Store layout
//!
//! The catalog lives in three plain directories:
//! - canonical store: approved image assets
//! - staging area: freshly fetched candidates awaiting review
//! - metadata store: one JSON record per asset id
//!
//! Handles are passed explicitly into every component so tests can point each
//! one at its own temporary directory. Nothing here caches directory contents;
//! every listing re-reads the filesystem.

use crate::asset::Asset;
use crate::{Error, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Canonical store location relative to the root folder
pub const CANONICAL_SUBDIR: &str = "images/characters";
/// Staging area location relative to the root folder
pub const STAGING_SUBDIR: &str = "images/temp";
/// Metadata store location relative to the root folder
pub const METADATA_SUBDIR: &str = "content/characters";

/// The three store directories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStores {
    pub canonical: PathBuf,
    pub staging: PathBuf,
    pub metadata: PathBuf,
}

impl CatalogStores {
    pub fn new(canonical: PathBuf, staging: PathBuf, metadata: PathBuf) -> Self {
        Self {
            canonical,
            staging,
            metadata,
        }
    }

    /// Default layout under a root folder
    pub fn under_root(root: &Path) -> Self {
        Self::new(
            root.join(CANONICAL_SUBDIR),
            root.join(STAGING_SUBDIR),
            root.join(METADATA_SUBDIR),
        )
    }

    /// Create any missing store directory (empty)
    pub fn ensure_directories(&self) -> Result<()> {
        for dir in [&self.canonical, &self.staging, &self.metadata] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| Error::io_at("create", dir, e))?;
                tracing::info!(path = %dir.display(), "Created store directory");
            }
        }
        Ok(())
    }

    /// All catalog assets in the canonical store, sorted by filename
    pub fn list_assets(&self) -> Result<Vec<Asset>> {
        Ok(list_files(&self.canonical)?
            .iter()
            .filter_map(|path| Asset::from_path(path))
            .collect())
    }

    /// Ids of every asset currently in the canonical store
    pub fn asset_ids(&self) -> Result<HashSet<String>> {
        Ok(self.list_assets()?.into_iter().map(|a| a.id).collect())
    }

    /// Every canonical file carrying the given id (any asset extension)
    pub fn assets_with_id(&self, asset_id: &str) -> Result<Vec<Asset>> {
        Ok(self
            .list_assets()?
            .into_iter()
            .filter(|a| a.id == asset_id)
            .collect())
    }

    /// First canonical asset (filename order) carrying the given id
    pub fn find_asset(&self, asset_id: &str) -> Result<Option<Asset>> {
        Ok(self.assets_with_id(asset_id)?.into_iter().next())
    }

    /// Path a staged file would occupy
    pub fn staging_path(&self, filename: &str) -> PathBuf {
        self.staging.join(filename)
    }

    /// Path a promoted file would occupy
    pub fn canonical_path(&self, filename: &str) -> PathBuf {
        self.canonical.join(filename)
    }
}

/// Regular files directly inside `dir`, sorted by filename
///
/// Symlinks count as the file they point to. Entry-level errors (including
/// dangling links) are logged and skipped; failing to read `dir` itself is an
/// error.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(dir)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() {
                    files.push(entry.path().to_path_buf());
                }
            }
            Err(e) if e.depth() == 0 => {
                return Err(Error::io_at("list", dir, e.into()));
            }
            Err(e) => {
                tracing::warn!("Error accessing entry in {}: {}", dir.display(), e);
            }
        }
    }

    Ok(files)
}

/// Accept a bare filename only: no separators, no `.`/`..`, no surrounding
/// whitespace
pub fn validate_file_name(name: &str) -> Result<&str> {
    if name.is_empty()
        || name != name.trim()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
    {
        return Err(Error::Validation(format!("Not a plain filename: {:?}", name)));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_under_root_layout() {
        let stores = CatalogStores::under_root(Path::new("/srv/site"));
        assert_eq!(stores.canonical, PathBuf::from("/srv/site/images/characters"));
        assert_eq!(stores.staging, PathBuf::from("/srv/site/images/temp"));
        assert_eq!(stores.metadata, PathBuf::from("/srv/site/content/characters"));
    }

    #[test]
    fn test_list_assets_sorted_and_filtered() {
        let temp_dir = TempDir::new().unwrap();
        let stores = CatalogStores::under_root(temp_dir.path());
        stores.ensure_directories().unwrap();

        fs::write(stores.canonical.join("b.jpg"), b"b").unwrap();
        fs::write(stores.canonical.join("a.png"), b"a").unwrap();
        fs::write(stores.canonical.join("c.JPEG"), b"c").unwrap();
        fs::write(stores.canonical.join("readme.txt"), b"x").unwrap();
        fs::create_dir(stores.canonical.join("nested.png")).unwrap();

        let ids: Vec<String> = stores.list_assets().unwrap().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_list_files_missing_dir_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = list_files(&temp_dir.path().join("absent"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_validate_file_name() {
        assert_eq!(validate_file_name("x.jpg").unwrap(), "x.jpg");
        assert!(validate_file_name("../x.jpg").is_err());
        assert!(validate_file_name("dir/x.jpg").is_err());
        assert!(validate_file_name("dir\\x.jpg").is_err());
        assert!(validate_file_name("   ").is_err());
        assert!(validate_file_name("").is_err());
        assert!(validate_file_name(".").is_err());
        assert!(validate_file_name("..").is_err());
        assert!(validate_file_name(" c").is_err());
        assert!(validate_file_name("c\n").is_err());
        assert_eq!(validate_file_name("x..y.png").unwrap(), "x..y.png");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_asset_is_listed() {
        let temp_dir = TempDir::new().unwrap();
        let stores = CatalogStores::under_root(temp_dir.path());
        stores.ensure_directories().unwrap();

        let target = temp_dir.path().join("outside.png");
        fs::write(&target, b"a").unwrap();
        std::os::unix::fs::symlink(&target, stores.canonical.join("a.png")).unwrap();
        std::os::unix::fs::symlink(temp_dir.path().join("gone.png"), stores.canonical.join("dangling.png"))
            .unwrap();

        let ids: Vec<String> = stores.list_assets().unwrap().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["a"]);
    }
}
