//! Error types for DocVault.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Extraction error: {0}")]
    Extract(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Corrupt index state: {0}")]
    Corrupt(String),

    #[error("Engine not ready")]
    NotReady,

    #[error("No usable documents: {0}")]
    EmptyCorpus(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
