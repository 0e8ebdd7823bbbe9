//! Metadata store: one `<asset id>.json` file per record

use crate::models::MetadataRecord;
use pdex_common::store::{list_files, validate_file_name};
use pdex_common::{Error, Result};
use std::path::{Path, PathBuf};

const RECORD_EXTENSION: &str = "json";

pub struct MetadataStore {
    dir: PathBuf,
}

impl MetadataStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Record file location for an id
    pub fn record_path(&self, asset_id: &str) -> Result<PathBuf> {
        let id = validate_file_name(asset_id)?;
        Ok(self.dir.join(format!("{}.{}", id, RECORD_EXTENSION)))
    }

    pub fn exists(&self, asset_id: &str) -> bool {
        self.record_path(asset_id).map(|p| p.is_file()).unwrap_or(false)
    }

    /// Read a record; a missing record is `Ok(None)`
    pub fn read(&self, asset_id: &str) -> Result<Option<MetadataRecord>> {
        let path = self.record_path(asset_id)?;

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io_at("read", &path, e)),
        };

        let record = serde_json::from_str(&content)?;
        Ok(Some(record))
    }

    /// Overwrite the record for `asset_id`
    ///
    /// Written to a temporary file first and renamed into place, so a reader
    /// never sees a half-written record.
    pub fn write(&self, asset_id: &str, record: &MetadataRecord) -> Result<()> {
        let path = self.record_path(asset_id)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| Error::io_at("create", &self.dir, e))?;

        let json = serde_json::to_string_pretty(record)?;
        let tmp_path = self.dir.join(format!(".{}.{}.tmp", asset_id, RECORD_EXTENSION));
        std::fs::write(&tmp_path, json).map_err(|e| Error::io_at("write", &tmp_path, e))?;
        std::fs::rename(&tmp_path, &path).map_err(|e| Error::io_at("replace", &path, e))?;

        tracing::info!(asset_id, path = %path.display(), "Metadata record written");
        Ok(())
    }

    /// Delete a record; `Ok(false)` when there was none
    pub fn delete(&self, asset_id: &str) -> Result<bool> {
        let path = self.record_path(asset_id)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(asset_id, "Metadata record deleted");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::io_at("remove", &path, e)),
        }
    }

    /// Ids of every stored record, sorted
    pub fn list_ids(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        Ok(list_files(&self.dir)?
            .iter()
            .filter(|p| p.extension().is_some_and(|ext| ext == RECORD_EXTENSION))
            .filter_map(|p| p.file_stem().and_then(|s| s.to_str()).map(str::to_string))
            .filter(|id| !id.starts_with('.'))
            .collect())
    }
}
