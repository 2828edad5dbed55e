//! DocVault Ingest — source document extraction, fingerprinting, chunking.

pub mod chunker;
pub mod extract;
pub mod fingerprint;

pub use chunker::{Chunker, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
pub use extract::{extract_corpus, extract_document, list_source_files, source_listing};
pub use fingerprint::fingerprint;
