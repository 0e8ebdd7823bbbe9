//! Staging area: candidates awaiting human approval
//!
//! The staging directory never carries state from one cycle into the next.
//! It is emptied before every fetch and after every promotion.

use crate::models::{BatchOutcome, ItemFailure};
use pdex_common::store::{list_files, validate_file_name};
use pdex_common::{Error, Result};
use std::path::{Path, PathBuf};

pub struct StagingArea {
    dir: PathBuf,
}

impl StagingArea {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of a staged file; `None` for names that are not plain filenames
    pub fn path_of(&self, filename: &str) -> Option<PathBuf> {
        validate_file_name(filename).ok().map(|name| self.dir.join(name))
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.path_of(filename).is_some_and(|p| p.is_file())
    }

    /// Write a candidate under its synthetic name
    pub fn write(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        let name = validate_file_name(filename)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| Error::io_at("create", &self.dir, e))?;

        let path = self.dir.join(name);
        std::fs::write(&path, bytes).map_err(|e| Error::io_at("write", &path, e))?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Staged candidate");
        Ok(path)
    }

    /// Filenames currently staged, sorted
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        Ok(list_files(&self.dir)?
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
            .collect())
    }

    /// Delete everything in the staging directory
    ///
    /// `count` is the number of entries removed. An entry that cannot be removed
    /// is reported and the sweep continues.
    pub fn clear(&self) -> Result<BatchOutcome> {
        let mut outcome = BatchOutcome::default();

        if !self.dir.exists() {
            std::fs::create_dir_all(&self.dir).map_err(|e| Error::io_at("create", &self.dir, e))?;
            return Ok(outcome);
        }

        let entries = std::fs::read_dir(&self.dir).map_err(|e| Error::io_at("list", &self.dir, e))?;

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    outcome.record_failure(ItemFailure::new(self.dir.display().to_string(), e));
                    continue;
                }
            };

            let path = entry.path();
            let removed = match entry.file_type() {
                Ok(ft) if ft.is_dir() => std::fs::remove_dir_all(&path),
                _ => std::fs::remove_file(&path),
            };

            match removed {
                Ok(()) => outcome.record_success(),
                Err(e) => outcome.record_failure(ItemFailure::new(
                    entry.file_name().to_string_lossy(),
                    Error::io_at("remove", &path, e),
                )),
            }
        }

        tracing::debug!(removed = outcome.count, dir = %self.dir.display(), "Cleared staging area");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_write_list_clear() {
        let temp_dir = TempDir::new().unwrap();
        let staging = StagingArea::new(temp_dir.path().join("temp"));

        staging.write("b.jpg", b"b").unwrap();
        staging.write("a.png", b"a").unwrap();
        fs::create_dir(staging.dir().join("leftover")).unwrap();
        fs::write(staging.dir().join("leftover").join("x"), b"x").unwrap();

        assert_eq!(staging.list().unwrap(), vec!["a.png", "b.jpg"]);
        assert!(staging.contains("a.png"));
        assert!(!staging.contains("leftover"));

        let outcome = staging.clear().unwrap();
        assert_eq!(outcome.count, 3);
        assert!(outcome.is_clean());
        assert_eq!(fs::read_dir(staging.dir()).unwrap().count(), 0);
    }

    #[test]
    fn test_clear_creates_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let staging = StagingArea::new(temp_dir.path().join("temp"));

        let outcome = staging.clear().unwrap();
        assert_eq!(outcome.count, 0);
        assert!(staging.dir().is_dir());
    }

    #[test]
    fn test_rejects_path_like_names() {
        let temp_dir = TempDir::new().unwrap();
        let staging = StagingArea::new(temp_dir.path());

        assert!(staging.write("../escape.jpg", b"x").is_err());
        assert!(staging.path_of("nested/x.jpg").is_none());
        assert!(!staging.contains("../escape.jpg"));
    }
}
