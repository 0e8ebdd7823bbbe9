//! Test Helper Utilities
//!
//! Shared utilities for testing pdex-curator: isolated store fixtures, image
//! byte generators and a local HTTP site standing in for remote pages.

#![allow(dead_code)]

pub mod remote_site;

pub use remote_site::{RemoteSite, Resource};

use chrono::NaiveDate;
use pdex_common::config::FetchSettings;
use pdex_common::CatalogStores;
use pdex_curator::models::{MetadataRecord, SkillTable, TypedAttribute};
use pdex_curator::CatalogService;
use std::path::Path;
use tempfile::TempDir;

/// Fresh canonical/staging/metadata directories under a temp root
///
/// Keep the `TempDir` alive for the duration of the test.
pub fn test_stores() -> (TempDir, CatalogStores) {
    let temp_dir = TempDir::new().unwrap();
    let stores = CatalogStores::under_root(temp_dir.path());
    stores.ensure_directories().unwrap();
    (temp_dir, stores)
}

/// Fetch settings with short timeouts for local tests
pub fn test_fetch_settings() -> FetchSettings {
    FetchSettings {
        page_timeout_secs: 5,
        image_timeout_secs: 1,
        ..FetchSettings::default()
    }
}

pub fn test_catalog(stores: &CatalogStores) -> CatalogService {
    CatalogService::new(stores.clone(), test_fetch_settings()).unwrap()
}

/// PNG signature followed by `len - 8` filler bytes derived from `seed`
pub fn png_bytes(seed: u8, len: usize) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend((0..len.saturating_sub(8)).map(|i| seed.wrapping_add((i % 253) as u8)));
    bytes
}

/// JPEG SOI marker followed by filler bytes derived from `seed`
pub fn jpeg_bytes(seed: u8, len: usize) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.extend((0..len.saturating_sub(4)).map(|i| seed.wrapping_mul(7).wrapping_add((i % 241) as u8)));
    bytes
}

/// HTML page with one `<img>` per source, in order
pub fn gallery_page(sources: &[&str]) -> String {
    let imgs: String = sources
        .iter()
        .map(|src| format!("<img src=\"{}\">\n", src))
        .collect();
    format!("<html><body>\n{}</body></html>", imgs)
}

/// Minimal record for an asset id
pub fn sample_record(id: &str, identity: &str, character: &str) -> MetadataRecord {
    MetadataRecord {
        id: id.to_string(),
        character_name: character.to_string(),
        identity_name: identity.to_string(),
        is_default: false,
        grade: 2,
        release_date: NaiveDate::from_ymd_opt(2024, 1, 18).unwrap(),
        image_position: "center".to_string(),
        keywords: Default::default(),
        skills: SkillTable::default(),
        defense: TypedAttribute::new("Guard", "Envy"),
        affiliation: vec!["Limbus Company".to_string()],
        image_url: format!("/images/characters/{}.png", id),
    }
}

/// Write a record file directly, bypassing the asset-exists check
pub fn put_record(stores: &CatalogStores, record: &MetadataRecord) {
    let json = serde_json::to_string_pretty(record).unwrap();
    std::fs::write(stores.metadata.join(format!("{}.json", record.id)), json).unwrap();
}

pub fn put_asset(stores: &CatalogStores, filename: &str, bytes: &[u8]) {
    std::fs::write(stores.canonical.join(filename), bytes).unwrap();
}

pub fn dir_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
