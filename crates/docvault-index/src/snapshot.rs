//! Persisted index snapshot.
//!
//! A snapshot is four co-located artifacts under the store directory:
//! the vector index, the chunk texts, the per-chunk source identities, and
//! the document version metadata. All four are written together and must
//! all be present and mutually consistent for a load to succeed; any
//! missing or inconsistent artifact invalidates the whole set.

use std::path::{Path, PathBuf};

use docvault_core::{DocumentId, Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use crate::flat::{FlatIndex, IndexArtifact};
use crate::versions::VersionStore;

const INDEX_FILE: &str = "index.json";
const CHUNKS_FILE: &str = "chunks.json";
const SOURCES_FILE: &str = "sources.json";
const VERSIONS_FILE: &str = "versions.json";

/// Locations of the four snapshot artifacts.
#[derive(Debug, Clone)]
pub struct SnapshotPaths {
    pub index: PathBuf,
    pub chunks: PathBuf,
    pub sources: PathBuf,
    pub versions: PathBuf,
}

impl SnapshotPaths {
    pub fn new(store_dir: &Path) -> Self {
        Self {
            index: store_dir.join(INDEX_FILE),
            chunks: store_dir.join(CHUNKS_FILE),
            sources: store_dir.join(SOURCES_FILE),
            versions: store_dir.join(VERSIONS_FILE),
        }
    }

    /// True when every artifact file exists.
    pub fn all_present(&self) -> bool {
        self.index.is_file()
            && self.chunks.is_file()
            && self.sources.is_file()
            && self.versions.is_file()
    }
}

/// The complete retrieval state at one point in time.
///
/// Immutable once built; a rebuild constructs a fresh snapshot off to the
/// side and publishes it only after it has been persisted.
#[derive(Debug)]
pub struct IndexSnapshot {
    pub index: FlatIndex,
    pub chunk_texts: Vec<String>,
    pub chunk_sources: Vec<DocumentId>,
    pub versions: VersionStore,
}

impl IndexSnapshot {
    /// Check the alignment invariant: chunk *i* ↔ vector *i* ↔ source *i*,
    /// and every source has a document record.
    pub fn validate(&self) -> Result<()> {
        if self.index.len() != self.chunk_texts.len()
            || self.chunk_texts.len() != self.chunk_sources.len()
        {
            return Err(Error::Corrupt(format!(
                "misaligned snapshot: {} vectors, {} chunks, {} sources",
                self.index.len(),
                self.chunk_texts.len(),
                self.chunk_sources.len()
            )));
        }
        for source in &self.chunk_sources {
            if self.versions.get(source).is_none() {
                return Err(Error::Corrupt(format!(
                    "chunk source {} has no document record",
                    source
                )));
            }
        }
        Ok(())
    }

    pub fn chunk_count(&self) -> usize {
        self.chunk_texts.len()
    }

    pub fn document_count(&self) -> usize {
        self.versions.len()
    }

    /// Persist all four artifacts.
    ///
    /// Each artifact is written to a temp file and renamed into place, so a
    /// crash mid-write leaves either the previous artifact or the new one,
    /// never a truncated file. A partially renamed set fails the consistency
    /// check on the next load and triggers a rebuild.
    pub fn save(&self, paths: &SnapshotPaths) -> Result<()> {
        self.validate()?;

        write_artifact(&paths.index, &self.index.to_artifact())?;
        write_artifact(&paths.chunks, &self.chunk_texts)?;
        write_artifact(&paths.sources, &self.chunk_sources)?;
        write_artifact(&paths.versions, &self.versions)?;

        info!(
            "Persisted snapshot: {} documents, {} chunks",
            self.document_count(),
            self.chunk_count()
        );
        Ok(())
    }

    /// Load and validate a persisted snapshot.
    pub fn load(paths: &SnapshotPaths) -> Result<Self> {
        let artifact: IndexArtifact = read_artifact(&paths.index)?;
        let snapshot = Self {
            index: FlatIndex::from_artifact(artifact)?,
            chunk_texts: read_artifact(&paths.chunks)?,
            chunk_sources: read_artifact(&paths.sources)?,
            versions: read_artifact(&paths.versions)?,
        };
        snapshot.validate()?;
        debug!(
            "Loaded snapshot: {} documents, {} chunks",
            snapshot.document_count(),
            snapshot.chunk_count()
        );
        Ok(snapshot)
    }

    /// Load only the persisted version metadata, for freshness checks.
    pub fn load_versions(paths: &SnapshotPaths) -> Result<VersionStore> {
        read_artifact(&paths.versions)
    }
}

fn write_artifact<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let data = serde_json::to_vec(value)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, data)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = std::fs::read(path)
        .map_err(|e| Error::Corrupt(format!("{}: {}", path.display(), e)))?;
    serde_json::from_slice(&data)
        .map_err(|e| Error::Corrupt(format!("{}: {}", path.display(), e)))
}
