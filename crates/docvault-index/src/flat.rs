//! Exact nearest-neighbor index over a dense float32 matrix.
//!
//! Vectors are stored row-major in an `(N, dim)` matrix. Search is a full
//! scan computing squared Euclidean distance to every row, which is exact
//! and cheap at the corpus sizes this engine targets. Row *i* always
//! corresponds to chunk *i* of the snapshot that owns the index.

use docvault_core::{Error, Result};
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

/// Flat (exact) vector index.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    dim: usize,
    vectors: Array2<f32>,
}

/// Serialized form of a [`FlatIndex`]: row-major data plus the dimension.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexArtifact {
    pub dim: usize,
    pub data: Vec<f32>,
}

impl FlatIndex {
    /// Create an empty index for vectors of the given dimension.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            vectors: Array2::zeros((0, dim)),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.vectors.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.nrows() == 0
    }

    /// Append a batch of vectors. Every vector must match the index dimension.
    pub fn add(&mut self, vectors: &[Array1<f32>]) -> Result<()> {
        for v in vectors {
            if v.len() != self.dim {
                return Err(Error::Embedding(format!(
                    "vector dimension {} does not match index dimension {}",
                    v.len(),
                    self.dim
                )));
            }
            self.vectors
                .push(Axis(0), v.view())
                .map_err(|e| Error::Embedding(e.to_string()))?;
        }
        Ok(())
    }

    /// Find the `k` nearest rows to `query`.
    ///
    /// Returns `(squared_distance, row_index)` pairs ordered ascending by
    /// distance, ties broken by row index so results are reproducible.
    pub fn search(&self, query: &Array1<f32>, k: usize) -> Vec<(f32, usize)> {
        if self.vectors.nrows() == 0 || k == 0 || query.len() != self.dim {
            return Vec::new();
        }

        let mut scored: Vec<(f32, usize)> = self
            .vectors
            .rows()
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                let diff = &row - query;
                (diff.dot(&diff), i)
            })
            .collect();

        scored.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.1.cmp(&b.1))
        });
        scored.truncate(k);
        scored
    }

    /// Convert to the serializable artifact form.
    pub fn to_artifact(&self) -> IndexArtifact {
        IndexArtifact {
            dim: self.dim,
            data: self.vectors.iter().copied().collect(),
        }
    }

    /// Rebuild an index from its artifact form.
    pub fn from_artifact(artifact: IndexArtifact) -> Result<Self> {
        if artifact.dim == 0 {
            return Err(Error::Corrupt("index artifact has zero dimension".into()));
        }
        if artifact.data.len() % artifact.dim != 0 {
            return Err(Error::Corrupt(format!(
                "index artifact length {} is not a multiple of dimension {}",
                artifact.data.len(),
                artifact.dim
            )));
        }
        let rows = artifact.data.len() / artifact.dim;
        let vectors = Array2::from_shape_vec((rows, artifact.dim), artifact.data)
            .map_err(|e| Error::Corrupt(e.to_string()))?;
        Ok(Self {
            dim: artifact.dim,
            vectors,
        })
    }
}
