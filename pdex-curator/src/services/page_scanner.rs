//! Image reference extraction and noise filtering
//!
//! Everything here works on URLs and raw bytes only; no network access.

use reqwest::Url;
use scraper::{Html, Selector};

/// Lazy-load attribute consulted when `src` is absent or blank
const LAZY_SRC_ATTR: &str = "data-src";

/// Path substrings (lowercase) that mark decoration rather than content
const NOISE_MARKERS: &[&str] = &["icon", "logo"];

/// Path extensions (lowercase) of animated or vector formats
const REJECTED_EXTENSIONS: &[&str] = &[".gif", ".svg"];

/// An `<img>` reference found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    /// Position of the `<img>` tag in document order
    pub index: usize,
    pub url: Url,
}

/// Every http(s) `<img>` reference in `html`, resolved against `base`
pub fn extract_image_urls(html: &str, base: &Url) -> Vec<ImageCandidate> {
    let selector = match Selector::parse("img") {
        Ok(selector) => selector,
        Err(e) => {
            tracing::error!("Invalid image selector: {}", e);
            return Vec::new();
        }
    };

    let document = Html::parse_document(html);
    let mut candidates = Vec::new();

    for (index, element) in document.select(&selector).enumerate() {
        let attrs = element.value();
        let raw = attrs
            .attr("src")
            .filter(|s| !s.trim().is_empty())
            .or_else(|| attrs.attr(LAZY_SRC_ATTR).filter(|s| !s.trim().is_empty()));

        let Some(raw) = raw else {
            continue;
        };

        match base.join(raw.trim()) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                candidates.push(ImageCandidate { index, url });
            }
            Ok(url) => {
                tracing::debug!(index, scheme = url.scheme(), "Ignoring non-http image reference");
            }
            Err(e) => {
                tracing::debug!(index, reference = raw, error = %e, "Unresolvable image reference");
            }
        }
    }

    candidates
}

/// Reason a candidate URL is rejected before download, if any
pub fn rejection_reason(url: &Url) -> Option<&'static str> {
    let path = url.path().to_lowercase();

    if REJECTED_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return Some("animated or vector format");
    }

    if NOISE_MARKERS.iter().any(|marker| path.contains(marker)) {
        return Some("icon/logo path");
    }

    None
}

/// Content type guessed from leading bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Webp,
    Gif,
    /// HTML, SVG or other XML text
    Markup,
    Unknown,
}

impl ImageKind {
    /// Verify file type using magic bytes
    pub fn sniff(bytes: &[u8]) -> Self {
        match bytes {
            [0x89, b'P', b'N', b'G', ..] => ImageKind::Png,
            [0xFF, 0xD8, 0xFF, ..] => ImageKind::Jpeg,
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => ImageKind::Webp,
            [b'G', b'I', b'F', b'8', ..] => ImageKind::Gif,
            _ => {
                let first = bytes.iter().find(|b| !b.is_ascii_whitespace());
                if first == Some(&b'<') {
                    ImageKind::Markup
                } else {
                    ImageKind::Unknown
                }
            }
        }
    }

    /// Kinds never admitted to staging
    pub fn is_rejected(self) -> bool {
        matches!(self, ImageKind::Gif | ImageKind::Markup)
    }

    /// Extension for the staged file
    pub fn staged_extension(self) -> &'static str {
        match self {
            ImageKind::Png => "png",
            _ => "jpg",
        }
    }
}
