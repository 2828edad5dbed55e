//! Typed document identity.
//!
//! Every document in the corpus is identified by a `DocumentId`. Documents
//! extracted from the source folder are keyed by file name (one file name =
//! one version lineage); the built-in fallback corpus uses `Seed` identities
//! so that seeded content can never collide with a real file.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a document within the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum DocumentId {
    /// A document extracted from a file in the source folder, keyed by
    /// file name. Unique across the live corpus at any index-build time.
    File(String),
    /// A built-in seed document, used when the source folder is empty.
    Seed(String),
}

impl DocumentId {
    /// The human-readable name of the document.
    pub fn name(&self) -> &str {
        match self {
            DocumentId::File(name) => name,
            DocumentId::Seed(name) => name,
        }
    }

    /// Whether this identity refers to a file in the source folder.
    pub fn is_file(&self) -> bool {
        match self {
            DocumentId::File(_) => true,
            DocumentId::Seed(_) => false,
        }
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentId::File(name) => write!(f, "{}", name),
            DocumentId::Seed(name) => write!(f, "{} (built-in)", name),
        }
    }
}
