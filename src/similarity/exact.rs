//! Dense exact cosine kNN
//!
//! Computes the full pairwise similarity matrix row by row. O(n^2 * d) and
//! O(n * d) memory for the embedding matrix; this is the scalability
//! ceiling of the exact backend, acceptable for corpora in the low tens of
//! thousands. Per-row scans are independent and run on the rayon pool.

use super::{validate_params, NeighborIndex, SimilarityResult};
use crate::graph::{Neighbor, NeighborMap, VectorStore};
use rayon::prelude::*;
use tracing::{debug, warn};

/// Exact dense backend
#[derive(Debug, Clone, Default)]
pub struct ExactIndex {
    /// Candidate pairs with similarity above this cap are treated as
    /// near-duplicates and excluded before top-k selection
    pub max_similarity: Option<f32>,
}

impl ExactIndex {
    pub fn new(max_similarity: Option<f32>) -> Self {
        Self { max_similarity }
    }
}

impl NeighborIndex for ExactIndex {
    fn find_neighbors(
        &self,
        store: &VectorStore,
        k: usize,
        threshold: f32,
    ) -> SimilarityResult<NeighborMap> {
        validate_params(k, threshold)?;

        let n = store.len();
        let mut map = NeighborMap::with_capacity(n);
        if n == 0 {
            return Ok(map);
        }

        let matrix = store.embedding_matrix();
        let norms: Vec<f32> = (0..n)
            .map(|i| matrix.row(i).dot(&matrix.row(i)).sqrt())
            .collect();

        for (i, &norm) in norms.iter().enumerate() {
            if norm == 0.0 {
                warn!(
                    concept = %store.by_index(i).id,
                    "zero-norm embedding; similarity defined as 0 against all concepts"
                );
            }
        }

        let cap = self.max_similarity;
        let rows: Vec<Vec<Neighbor>> = (0..n)
            .into_par_iter()
            .map(|i| {
                let row = matrix.row(i);
                let mut candidates: Vec<Neighbor> = Vec::new();

                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    let denom = norms[i] * norms[j];
                    let similarity = if denom == 0.0 {
                        0.0
                    } else {
                        row.dot(&matrix.row(j)) / denom
                    };

                    if similarity < threshold {
                        continue;
                    }
                    if let Some(cap) = cap {
                        if similarity > cap {
                            continue;
                        }
                    }
                    candidates.push(Neighbor {
                        id: store.by_index(j).id,
                        similarity,
                    });
                }

                candidates.sort_by(|x, y| {
                    y.similarity
                        .partial_cmp(&x.similarity)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then_with(|| x.id.cmp(&y.id))
                });
                candidates.truncate(k);
                candidates
            })
            .collect();

        for (i, neighbors) in rows.into_iter().enumerate() {
            map.insert(store.by_index(i).id, neighbors);
        }

        debug!(
            concepts = n,
            candidates = map.values().map(Vec::len).sum::<usize>(),
            "exact neighbor search complete"
        );
        Ok(map)
    }
}
