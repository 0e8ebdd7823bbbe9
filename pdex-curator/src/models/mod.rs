//! Data models for the curation pipeline

pub mod batch;
pub mod metadata_record;
pub mod staging_entry;

pub use batch::{BatchOutcome, ItemFailure};
pub use metadata_record::{MetadataRecord, RecordDraft, SkillTable, TypedAttribute, DEFAULT_AFFILIATION};
pub use staging_entry::{DuplicateEntry, FetchReport, StagingEntry};
