//! Version store — document metadata, recency, and human-readable summaries.
//!
//! Version lineage is keyed by document identity: one file name is one
//! lineage, and the newest modification time in the corpus defines "most
//! recent". The store is rebuilt wholesale with every index rebuild.

use chrono::{DateTime, Utc};
use docvault_core::DocumentId;
use serde::{Deserialize, Serialize};

use crate::types::DocumentRecord;

/// Fixed message returned when no documents are indexed.
pub const NO_DOCUMENTS_MESSAGE: &str = "No documents are currently indexed.";

/// All known document records for the current snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionStore {
    records: Vec<DocumentRecord>,
}

impl VersionStore {
    /// Build a store from extracted records, keeping them ordered by
    /// modification time descending (ties broken by name for stable output).
    pub fn from_records(mut records: Vec<DocumentRecord>) -> Self {
        records.sort_by(|a, b| {
            b.modified_at
                .cmp(&a.modified_at)
                .then_with(|| a.id.name().cmp(b.id.name()))
        });
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentRecord> {
        self.records.iter()
    }

    /// Look up a record by identity.
    pub fn get(&self, id: &DocumentId) -> Option<&DocumentRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// The single most recently modified document, if any.
    pub fn most_recent(&self) -> Option<&DocumentRecord> {
        self.records.first()
    }

    /// The corpus-wide maximum modification time.
    pub fn max_modified(&self) -> Option<DateTime<Utc>> {
        self.most_recent().map(|r| r.modified_at)
    }

    /// Multi-line description of all known documents, newest first.
    ///
    /// The first entry is labeled as the most recent version and the rest
    /// as older versions. Degrades to a fixed message for an empty corpus.
    pub fn context_summary(&self) -> String {
        if self.records.is_empty() {
            return NO_DOCUMENTS_MESSAGE.to_string();
        }

        let mut lines = vec!["Document versions in use:".to_string()];
        for (i, record) in self.records.iter().enumerate() {
            let label = if i == 0 { "most recent" } else { "older version" };
            lines.push(format!("- {} ({})", record.describe(), label));
        }
        lines.join("\n")
    }
}
