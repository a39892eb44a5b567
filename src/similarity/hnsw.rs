//! Approximate cosine kNN via HNSW
//!
//! Drop-in substitute for the exact backend once the corpus outgrows the
//! dense O(n^2) pass. Same `NeighborIndex` contract; recall is approximate,
//! so results are not guaranteed identical to the exact backend.

use super::{validate_params, NeighborIndex, SimilarityResult};
use crate::graph::{Neighbor, NeighborMap, VectorStore};
use hnsw_rs::prelude::*;
use tracing::{debug, warn};

/// Cosine distance for hnsw_rs; zero-norm vectors get distance 1.0
/// (similarity 0), matching the exact backend's degenerate-vector rule.
#[derive(Clone, Copy, Debug, Default)]
pub struct CosineDistance;

impl Distance<f32> for CosineDistance {
    fn eval(&self, va: &[f32], vb: &[f32]) -> f32 {
        let mut dot = 0.0;
        let mut norm_a = 0.0;
        let mut norm_b = 0.0;

        for (a, b) in va.iter().zip(vb.iter()) {
            dot += a * b;
            norm_a += a * a;
            norm_b += b * b;
        }

        if norm_a <= 0.0 || norm_b <= 0.0 {
            return 1.0;
        }

        // Cosine distance = 1.0 - cosine similarity
        let sim = dot / (norm_a.sqrt() * norm_b.sqrt());
        1.0 - sim
    }
}

/// HNSW backend
#[derive(Debug, Clone)]
pub struct HnswIndex {
    /// Candidate pairs with similarity above this cap are excluded
    pub max_similarity: Option<f32>,
    /// Max connections per layer
    pub m: usize,
    /// Construction-time beam width
    pub ef_construction: usize,
}

impl Default for HnswIndex {
    fn default() -> Self {
        Self {
            max_similarity: None,
            m: 16,
            ef_construction: 200,
        }
    }
}

impl HnswIndex {
    pub fn new(max_similarity: Option<f32>) -> Self {
        Self {
            max_similarity,
            ..Self::default()
        }
    }
}

impl NeighborIndex for HnswIndex {
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

        for concept in store.concepts() {
            if concept.norm() == 0.0 {
                warn!(
                    concept = %concept.id,
                    "zero-norm embedding; similarity defined as 0 against all concepts"
                );
            }
        }

        let hnsw: Hnsw<'_, f32, CosineDistance> =
            Hnsw::new(self.m, n, 16, self.ef_construction, CosineDistance);
        for (i, concept) in store.concepts().iter().enumerate() {
            hnsw.insert((&concept.embedding, i));
        }

        // Oversample by one to absorb the self hit
        let knbn = (k + 1).min(n);
        let ef_search = 2 * knbn;

        for (i, concept) in store.concepts().iter().enumerate() {
            let results = hnsw.search(&concept.embedding, knbn, ef_search);

            let mut candidates: Vec<Neighbor> = Vec::with_capacity(results.len());
            for res in results {
                if res.d_id == i {
                    continue;
                }
                let similarity = 1.0 - res.distance;
                if similarity < threshold {
                    continue;
                }
                if let Some(cap) = self.max_similarity {
                    if similarity > cap {
                        continue;
                    }
                }
                candidates.push(Neighbor {
                    id: store.by_index(res.d_id).id,
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
            map.insert(concept.id, candidates);
        }

        debug!(
            concepts = n,
            candidates = map.values().map(Vec::len).sum::<usize>(),
            "hnsw neighbor search complete"
        );
        Ok(map)
    }
}
