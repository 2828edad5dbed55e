//! Embedding backend trait.

use ndarray::Array1;

/// Trait for embedding backends.
///
/// Backends must be deterministic: identical input text yields an identical
/// vector, which the freshness machinery relies on when a persisted index
/// is reused across process restarts.
pub trait EmbedderBackend: Send + Sync {
    /// Generate an embedding for a text string.
    /// Returns None if the backend is not available.
    fn embed(&self, text: &str) -> Option<Array1<f32>>;

    /// Generate embeddings for a batch of texts.
    fn embed_batch(&self, texts: &[&str]) -> Vec<Option<Array1<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Get the embedding dimension.
    fn dimension(&self) -> usize;

    /// Check if the backend is available (model loaded).
    fn is_available(&self) -> bool;
}
