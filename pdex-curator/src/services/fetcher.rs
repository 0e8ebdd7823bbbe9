//! Remote image harvesting
//!
//! One fetch cycle:
//! 1. Validate the target URL and name prefix (no side effects on failure)
//! 2. Empty the staging area
//! 3. GET the page (page timeout); failure aborts the cycle
//! 4. Extract `<img>` references and drop noise by URL
//! 5. Download each candidate (image timeout); per-image failures are recorded
//!    and skipped, tiny or non-image bodies are discarded
//! 6. Stage survivors under synthetic names
//! 7. Classify staged candidates against a fresh canonical fingerprint index
//!
//! No retries. The download loop has no overall deadline.

use super::dedup::DedupResolver;
use super::fingerprint::{fingerprint, FingerprintIndex};
use super::page_scanner::{extract_image_urls, rejection_reason, ImageCandidate, ImageKind};
use super::run_blocking;
use super::staging::StagingArea;
use crate::models::{FetchReport, ItemFailure, StagingEntry};
use pdex_common::config::FetchSettings;
use pdex_common::{CatalogStores, Error, Result};
use reqwest::Url;
use std::time::Duration;

/// Fetches pages and stages their images
pub struct ImageFetcher {
    http_client: reqwest::Client,
    settings: FetchSettings,
    stores: CatalogStores,
}

impl ImageFetcher {
    pub fn new(settings: FetchSettings, stores: CatalogStores) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            settings,
            stores,
        })
    }

    /// Run one fetch cycle for `url`, naming staged files after `prefix`
    pub async fn fetch(&self, url: &str, prefix: Option<&str>) -> Result<FetchReport> {
        let target = parse_target_url(url)?;
        let prefix = normalize_prefix(prefix, &self.settings.default_prefix)?;

        let staging_dir = self.stores.staging.clone();
        let cleared = run_blocking(move || StagingArea::new(staging_dir).clear()).await?;
        if cleared.count > 0 {
            tracing::info!(removed = cleared.count, "Discarded stale staging content");
        }

        let html = self.fetch_page(&target).await?;
        let candidates = extract_image_urls(&html, &target);
        tracing::info!(url = %target, candidates = candidates.len(), "Page fetched");

        let stamp = chrono::Utc::now().timestamp();
        let mut report = FetchReport::default();
        let mut staged = Vec::new();

        for ImageCandidate { index, url } in candidates {
            if let Some(reason) = rejection_reason(&url) {
                tracing::debug!(%url, reason, "Candidate filtered");
                report.filtered += 1;
                continue;
            }

            let bytes = match self.download(&url).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!(%url, error = %e, "Candidate download failed");
                    report.failures.push(ItemFailure::new(url.as_str(), e));
                    continue;
                }
            };

            if bytes.len() < self.settings.min_image_bytes {
                tracing::debug!(%url, bytes = bytes.len(), "Candidate below size threshold");
                report.undersized += 1;
                continue;
            }

            let kind = ImageKind::sniff(&bytes);
            if kind.is_rejected() {
                let e = Error::ImageDownload(format!("unsupported content ({:?}) from {}", kind, url));
                tracing::warn!(%url, ?kind, "Candidate rejected by content type");
                report.failures.push(ItemFailure::new(url.as_str(), e));
                continue;
            }

            let filename = staged_file_name(&prefix, stamp, index, kind.staged_extension());
            let size_bytes = bytes.len();
            let staging_dir = self.stores.staging.clone();
            let name = filename.clone();
            let written = run_blocking(move || {
                StagingArea::new(staging_dir).write(&name, &bytes)?;
                Ok(fingerprint(&bytes))
            })
            .await;

            match written {
                Ok(fingerprint) => staged.push(StagingEntry {
                    filename,
                    fingerprint,
                    source_url: url.to_string(),
                    size_bytes,
                }),
                Err(e) => report.failures.push(ItemFailure::new(filename, e)),
            }
        }

        let canonical_dir = self.stores.canonical.clone();
        let index = run_blocking(move || FingerprintIndex::build(&canonical_dir)).await?;
        classify_staged(&mut report, index, staged);

        tracing::info!(
            url = %target,
            novel = report.novel.len(),
            duplicates = report.duplicates.len(),
            filtered = report.filtered,
            undersized = report.undersized,
            failed = report.failures.len(),
            "Fetch cycle complete"
        );

        Ok(report)
    }

    async fn fetch_page(&self, url: &Url) -> Result<String> {
        let response = self
            .http_client
            .get(url.clone())
            .timeout(Duration::from_secs(self.settings.page_timeout_secs))
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("{} returned HTTP {}", url, status.as_u16())));
        }

        response
            .text()
            .await
            .map_err(|e| Error::Fetch(format!("{}: failed to read body: {}", url, e)))
    }

    async fn download(&self, url: &Url) -> Result<Vec<u8>> {
        let response = self
            .http_client
            .get(url.clone())
            .timeout(Duration::from_secs(self.settings.image_timeout_secs))
            .send()
            .await
            .map_err(|e| Error::ImageDownload(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ImageDownload(format!(
                "{} returned HTTP {}",
                url,
                status.as_u16()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::ImageDownload(format!("{}: {}", url, e)))?;

        Ok(bytes.to_vec())
    }
}

/// Split staged candidates into novel and duplicate
///
/// Canonical files the index could not hash are reported as failures, since
/// a duplicate of one of them shows up as novel.
fn classify_staged(report: &mut FetchReport, index: FingerprintIndex, staged: Vec<StagingEntry>) {
    report.failures.extend(index.skipped().iter().cloned());

    let (novel, duplicates) = DedupResolver::new(index).partition(staged);
    report.novel = novel;
    report.duplicates = duplicates;
}

/// Absolute http(s) URL or a validation error
pub fn parse_target_url(url: &str) -> Result<Url> {
    let url = url.trim();
    if url.is_empty() {
        return Err(Error::Validation("url is required".to_string()));
    }

    let parsed = Url::parse(url).map_err(|e| Error::Validation(format!("invalid url {:?}: {}", url, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::Validation(format!(
            "unsupported url scheme {:?}",
            parsed.scheme()
        )));
    }

    Ok(parsed)
}

/// Trimmed prefix; blank falls back to `default`
pub fn normalize_prefix(prefix: Option<&str>, default: &str) -> Result<String> {
    let prefix = prefix.map(str::trim).filter(|p| !p.is_empty()).unwrap_or(default);

    if prefix.contains('/') || prefix.contains('\\') || prefix.contains("..") {
        return Err(Error::Validation(format!(
            "prefix must not contain path components: {:?}",
            prefix
        )));
    }

    Ok(prefix.to_string())
}

/// `<prefix>_<unix-seconds>_<index>.<ext>`
pub fn staged_file_name(prefix: &str, stamp: i64, index: usize, ext: &str) -> String {
    format!("{}_{}_{}.{}", prefix, stamp, index, ext)
}
