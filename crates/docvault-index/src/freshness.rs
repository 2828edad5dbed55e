//! Index freshness — decide whether a persisted snapshot still reflects
//! the source folder.
//!
//! The check is full-corpus and coarse-grained: any detected change
//! invalidates the whole snapshot and triggers a complete rebuild. There
//! is no incremental re-embedding path; a partial update could break the
//! chunk-to-vector alignment.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use docvault_core::DocumentId;
use tracing::debug;

use crate::snapshot::{IndexSnapshot, SnapshotPaths};

/// Modification-time jitter absorbed before a file counts as changed.
pub const MTIME_TOLERANCE_SECS: i64 = 1;

/// Outcome of a freshness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    Stale(StaleReason),
}

/// Why a persisted snapshot can no longer be trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaleReason {
    /// One or more of the four artifacts is missing.
    MissingArtifacts,
    /// The persisted version metadata could not be read.
    UnreadableMetadata,
    /// The source folder currently holds no documents.
    EmptySourceFolder,
    /// A file was added to or removed from the source folder.
    FileSetChanged,
    /// A file's modification time moved beyond the tolerance.
    FileModified(String),
}

impl fmt::Display for StaleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaleReason::MissingArtifacts => write!(f, "persisted artifacts missing"),
            StaleReason::UnreadableMetadata => write!(f, "persisted metadata unreadable"),
            StaleReason::EmptySourceFolder => write!(f, "source folder is empty"),
            StaleReason::FileSetChanged => write!(f, "source file set changed"),
            StaleReason::FileModified(name) => write!(f, "{} was modified", name),
        }
    }
}

/// Compare the persisted snapshot metadata against the current source
/// listing (file name → modification time).
pub fn check_freshness(
    paths: &SnapshotPaths,
    listing: &BTreeMap<String, DateTime<Utc>>,
) -> Freshness {
    if !paths.all_present() {
        return Freshness::Stale(StaleReason::MissingArtifacts);
    }

    if listing.is_empty() {
        return Freshness::Stale(StaleReason::EmptySourceFolder);
    }

    let persisted = match IndexSnapshot::load_versions(paths) {
        Ok(v) => v,
        Err(e) => {
            debug!("Version metadata unreadable: {}", e);
            return Freshness::Stale(StaleReason::UnreadableMetadata);
        }
    };

    // Seed records have no on-disk counterpart; a snapshot built from the
    // seed corpus is only fresh for an empty folder, which was ruled out
    // above.
    let persisted_files: BTreeMap<&str, DateTime<Utc>> = persisted
        .iter()
        .filter_map(|r| match &r.id {
            DocumentId::File(name) => Some((name.as_str(), r.modified_at)),
            DocumentId::Seed(_) => None,
        })
        .collect();

    if persisted_files.len() != persisted.len() {
        return Freshness::Stale(StaleReason::FileSetChanged);
    }

    let current_names: Vec<&str> = listing.keys().map(String::as_str).collect();
    let persisted_names: Vec<&str> = persisted_files.keys().copied().collect();
    if current_names != persisted_names {
        return Freshness::Stale(StaleReason::FileSetChanged);
    }

    for (name, modified) in listing {
        let persisted_modified = persisted_files[name.as_str()];
        let drift = (*modified - persisted_modified).num_seconds().abs();
        if drift > MTIME_TOLERANCE_SECS {
            return Freshness::Stale(StaleReason::FileModified(name.clone()));
        }
    }

    Freshness::Fresh
}
