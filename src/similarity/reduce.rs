//! Graph reduction: candidate lists -> canonical undirected edge set
//!
//! A kNN pass is directed and asymmetric: `a` nominating `b` does not imply
//! `b` nominates `a`, even though similarity is symmetric. Reduction walks
//! candidate lists in ascending id order and emits one edge per unordered
//! pair, taking the similarity observed from the smaller id's list. A pair
//! nominated only by the larger id is dropped; nodes therefore end up with
//! at most k nominations of their own, possibly fewer surviving edges.

use crate::graph::{Edge, EdgeKind, GraphError, GraphResult, NeighborMap, VectorStore};
use rand::Rng;
use rustc_hash::FxHashSet;
use tracing::{debug, info};

/// Reduce per-node candidate lists into the canonical semantic edge set.
///
/// Candidates referencing ids absent from the store are a contract
/// violation (`GraphError::UnknownConcept`), not a recoverable condition.
pub fn reduce(store: &VectorStore, candidates: &NeighborMap) -> GraphResult<Vec<Edge>> {
    let mut seen: FxHashSet<(crate::graph::ConceptId, crate::graph::ConceptId)> =
        FxHashSet::default();
    let mut edges = Vec::new();

    for (&from, neighbors) in candidates {
        if !store.contains(from) {
            return Err(GraphError::UnknownConcept(from));
        }
        for neighbor in neighbors {
            if !store.contains(neighbor.id) {
                return Err(GraphError::UnknownConcept(neighbor.id));
            }
            // Only the smaller endpoint's nomination counts
            if from >= neighbor.id {
                continue;
            }
            let edge = Edge::between(from, neighbor.id, neighbor.similarity, EdgeKind::Semantic)?;
            if seen.insert(edge.pair()) {
                edges.push(edge);
            }
        }
    }

    debug!(edges = edges.len(), "reduced candidate lists to semantic edges");
    Ok(edges)
}

/// Sample same-category pairs into low-weight connectivity edges.
///
/// Categories and members are visited in sorted order, so a seeded RNG makes
/// the sampling reproducible. The constant weight sits below the semantic
/// similarity threshold so category edges never outweigh semantic signal.
pub fn category_edges<R: Rng + ?Sized>(
    store: &VectorStore,
    probability: f64,
    weight: f32,
    rng: &mut R,
) -> GraphResult<Vec<Edge>> {
    let mut edges = Vec::new();

    for (category, members) in store.by_category() {
        if members.len() < 2 {
            continue;
        }
        info!(
            category = %category,
            concepts = members.len(),
            "sampling category edges"
        );

        for i in 0..members.len() {
            for j in (i + 1)..members.len() {
                if rng.gen::<f64>() < probability {
                    edges.push(Edge::between(
                        members[i],
                        members[j],
                        weight,
                        EdgeKind::Category,
                    )?);
                }
            }
        }
    }

    debug!(edges = edges.len(), "category edge sampling complete");
    Ok(edges)
}
