//! Semantic similarity search
//!
//! Finds, for every concept, its top-k nearest neighbors by cosine
//! similarity. Two interchangeable backends implement the same contract: a
//! dense exact pass and an HNSW approximation for large corpora.

pub mod exact;
pub mod hnsw;
pub mod reduce;

use crate::graph::{GraphError, NeighborMap, VectorStore};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use exact::ExactIndex;
pub use hnsw::HnswIndex;
pub use reduce::{category_edges, reduce};

/// Similarity search errors
#[derive(Error, Debug)]
pub enum SimilarityError {
    #[error("k must be at least 1, got {0}")]
    InvalidK(usize),

    #[error("similarity threshold must be in [-1, 1], got {0}")]
    InvalidThreshold(f32),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type SimilarityResult<T> = Result<T, SimilarityError>;

/// Backend selection for the neighbor search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    /// Dense O(n^2 * d) pass, exact
    Exact,
    /// hnsw_rs approximate index
    Hnsw,
    /// Exact below the configured cutoff, HNSW above it
    Auto,
}

/// Per-node top-k neighbor search over a store
///
/// Implementations are pure: no side effects beyond log output, output
/// deterministic for the exact backend (candidates sorted by descending
/// similarity, ties broken by ascending id).
pub trait NeighborIndex {
    /// Find up to `k` neighbors per concept with similarity >= `threshold`.
    ///
    /// Every concept gets an entry, possibly empty. Zero-norm embeddings
    /// have similarity 0 with everything (never NaN).
    fn find_neighbors(
        &self,
        store: &VectorStore,
        k: usize,
        threshold: f32,
    ) -> SimilarityResult<NeighborMap>;
}

pub(crate) fn validate_params(k: usize, threshold: f32) -> SimilarityResult<()> {
    if k == 0 {
        return Err(SimilarityError::InvalidK(k));
    }
    if !(-1.0..=1.0).contains(&threshold) || threshold.is_nan() {
        return Err(SimilarityError::InvalidThreshold(threshold));
    }
    Ok(())
}
