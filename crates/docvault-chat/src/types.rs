//! Typed context passed across the retrieval/generation boundary.

use chrono::{DateTime, Utc};
use docvault_core::DocumentId;
use serde::Serialize;

/// Provenance of a retrieved passage.
#[derive(Debug, Clone, Serialize)]
pub struct SourceRef {
    pub document: DocumentId,
    pub modified_at: DateTime<Utc>,
    pub is_most_recent: bool,
}

/// One retrieved passage handed to prompt assembly.
///
/// Always this shape; prompt construction never inspects the runtime type
/// of its context items.
#[derive(Debug, Clone, Serialize)]
pub struct Passage {
    pub text: String,
    pub source: SourceRef,
}

impl Passage {
    pub fn new(text: impl Into<String>, source: SourceRef) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }
}
