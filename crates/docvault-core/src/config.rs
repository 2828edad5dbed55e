//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Paths to all DocVault data directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Source document folder (`data/documents/`).
    pub documents: PathBuf,
    /// Persisted index artifacts (`data/store/`).
    pub store: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            documents: root.join("documents"),
            store: root.join("store"),
            root,
        };
        paths.ensure_dirs()?;
        Ok(paths)
    }

    /// Create all required directories.
    fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.documents)?;
        std::fs::create_dir_all(&self.store)?;
        Ok(())
    }

    /// Replace the source document folder with an explicit path.
    pub fn with_documents(mut self, documents: impl AsRef<Path>) -> std::io::Result<Self> {
        self.documents = documents.as_ref().to_path_buf();
        std::fs::create_dir_all(&self.documents)?;
        Ok(self)
    }
}

/// Top-level DocVault configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocVaultConfig {
    /// Data directory paths.
    pub data_paths: DataPaths,
    /// Target chunk length in characters.
    pub chunk_size: usize,
    /// Overlap between neighboring chunks in characters. Must be < chunk_size.
    pub chunk_overlap: usize,
    /// Embedding dimension (384 for all-MiniLM-L6-v2).
    pub embedding_dim: usize,
    /// Index the built-in seed corpus when the source folder is empty.
    pub seed_corpus: bool,
}

impl DocVaultConfig {
    /// Create configuration from environment and defaults.
    ///
    /// `DOCVAULT_DOCUMENTS_DIR` overrides the source folder location.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let mut data_paths = DataPaths::new(data_dir)?;
        if let Ok(dir) = std::env::var("DOCVAULT_DOCUMENTS_DIR") {
            data_paths = data_paths.with_documents(dir)?;
        }

        Ok(Self {
            data_paths,
            chunk_size: 1000,
            chunk_overlap: 200,
            embedding_dim: 384,
            seed_corpus: true,
        })
    }

    /// Configuration rooted at an explicit directory, defaults otherwise.
    pub fn with_root(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self {
            data_paths: DataPaths::new(data_dir)?,
            chunk_size: 1000,
            chunk_overlap: 200,
            embedding_dim: 384,
            seed_corpus: true,
        })
    }
}
