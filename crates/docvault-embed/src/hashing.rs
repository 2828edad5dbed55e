//! Deterministic feature-hashing embedder.
//!
//! Maps a text to a fixed-dimension bag-of-words vector by hashing each
//! token into a bucket with a hash-derived sign, then L2-normalizing.
//! No model download, fully deterministic, and near-duplicate texts land
//! close together, which is what the retrieval tests and the offline
//! default need from this boundary.

use ndarray::Array1;
use sha2::{Digest, Sha256};

use crate::backend::EmbedderBackend;

/// Feature-hashing embedding backend.
pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }
}

impl EmbedderBackend for HashingEmbedder {
    fn embed(&self, text: &str) -> Option<Array1<f32>> {
        let mut vector = Array1::<f32>::zeros(self.dim);

        for token in tokenize(text) {
            let digest = Sha256::digest(token.as_bytes());
            let bucket = u64::from_le_bytes(digest[0..8].try_into().unwrap()) as usize % self.dim;
            let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm = vector.dot(&vector).sqrt();
        if norm > 1e-9 {
            vector /= norm;
        }
        Some(vector)
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Lowercased alphanumeric tokens.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}
