//! Metadata record stored alongside each canonical asset
//!
//! The JSON field names are consumed by the public site build, so they are
//! fixed (camelCase, except `image_url`).

use chrono::NaiveDate;
use pdex_common::Asset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Affiliation used when a record lists none ("Limbus Company")
pub const DEFAULT_AFFILIATION: &str = "림버스 컴퍼니";

/// Shown in place of a blank identity name
const UNNAMED_IDENTITY: &str = "이름없음";

/// Serving path prefix for canonical images
const IMAGE_URL_PREFIX: &str = "/images/characters/";

/// A `{type, attribute}` pair (skills and defense)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedAttribute {
    #[serde(rename = "type")]
    pub kind: String,
    pub attribute: String,
}

impl TypedAttribute {
    pub fn new(kind: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attribute: attribute.into(),
        }
    }
}

/// Per-skill type/attribute table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillTable {
    pub skill1: TypedAttribute,
    pub skill2: TypedAttribute,
    pub skill3: TypedAttribute,
    pub special1: TypedAttribute,
    pub special2: TypedAttribute,
    pub special3: TypedAttribute,
}

/// Structured data describing one asset, keyed by the asset id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    pub id: String,
    pub character_name: String,
    pub identity_name: String,
    #[serde(default)]
    pub is_default: bool,
    pub grade: u8,
    pub release_date: NaiveDate,
    #[serde(default = "default_image_position")]
    pub image_position: String,
    #[serde(default)]
    pub keywords: BTreeSet<String>,
    #[serde(default)]
    pub skills: SkillTable,
    #[serde(default)]
    pub defense: TypedAttribute,
    #[serde(default)]
    pub affiliation: Vec<String>,
    #[serde(rename = "image_url", default)]
    pub image_url: String,
}

fn default_image_position() -> String {
    "center".to_string()
}

/// Serving path of a canonical image
pub fn image_url_for(filename: &str) -> String {
    format!("{}{}", IMAGE_URL_PREFIX, filename)
}

impl MetadataRecord {
    /// Bind the record to `asset`: id, serving path and a non-empty affiliation list
    pub fn bind_to(mut self, asset: &Asset) -> Self {
        self.id = asset.id.clone();
        self.image_url = image_url_for(&asset.filename);

        self.affiliation = self
            .affiliation
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        if self.affiliation.is_empty() {
            self.affiliation.push(DEFAULT_AFFILIATION.to_string());
        }

        self
    }

    /// Label used in the review listing: `[identity] character`
    pub fn display_label(&self) -> String {
        let identity = if self.identity_name.trim().is_empty() {
            UNNAMED_IDENTITY
        } else {
            self.identity_name.as_str()
        };
        format!("[{}] {}", identity, self.character_name)
    }
}

/// Editor form submission
///
/// Affiliations arrive as comma-separated text; keywords as a list of checked
/// boxes plus comma-separated free text.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordDraft {
    pub character_name: String,
    pub identity_name: String,
    #[serde(default)]
    pub is_default: bool,
    pub grade: u8,
    pub release_date: NaiveDate,
    #[serde(default)]
    pub image_position: Option<String>,
    #[serde(default)]
    pub checked_keywords: Vec<String>,
    #[serde(default)]
    pub manual_keywords: String,
    #[serde(default)]
    pub skills: SkillTable,
    #[serde(default)]
    pub defense: TypedAttribute,
    #[serde(default)]
    pub affiliation: String,
}

impl RecordDraft {
    pub fn into_record(self, asset: &Asset) -> MetadataRecord {
        let keywords = self
            .checked_keywords
            .iter()
            .map(String::as_str)
            .chain(split_list(&self.manual_keywords))
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();

        MetadataRecord {
            id: asset.id.clone(),
            character_name: self.character_name,
            identity_name: self.identity_name,
            is_default: self.is_default,
            grade: self.grade,
            release_date: self.release_date,
            image_position: self
                .image_position
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(default_image_position),
            keywords,
            skills: self.skills,
            defense: self.defense,
            affiliation: split_list(&self.affiliation).map(str::to_string).collect(),
            image_url: String::new(),
        }
        .bind_to(asset)
    }
}

/// Comma-separated text to trimmed, non-empty items
fn split_list(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|s| !s.is_empty())
}
