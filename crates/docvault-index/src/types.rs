//! Data types for extracted documents.

use chrono::{DateTime, Utc};
use docvault_core::DocumentId;
use serde::{Deserialize, Serialize};

/// One extracted source document, with the metadata used for recency
/// ranking and version summaries.
///
/// Records are created during extraction and replaced wholesale on every
/// rebuild; they are never partially mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    /// Display title, derived from the file stem.
    pub title: String,
    /// Normalized extracted text. The fingerprint is a pure function of it.
    pub full_text: String,
    /// SHA-256 hex digest of `full_text`.
    pub fingerprint: String,
    pub page_count: usize,
    pub byte_size: u64,
    pub modified_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl DocumentRecord {
    /// Short human-readable descriptor used in logs and version summaries.
    pub fn describe(&self) -> String {
        format!(
            "{}, modified {}, {} page(s), {} bytes",
            self.id.name(),
            self.modified_at.format("%Y-%m-%d"),
            self.page_count,
            self.byte_size
        )
    }
}
