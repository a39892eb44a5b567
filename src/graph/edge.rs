//! Undirected weighted edges and directed neighbor candidates

use super::store::{GraphError, GraphResult};
use super::types::{ConceptId, EdgeKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A directed nearest-neighbor candidate, produced transiently by the
/// similarity index and consumed by the reducer. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub id: ConceptId,
    pub similarity: f32,
}

/// Per-concept ordered candidate lists, keyed in ascending id order.
///
/// An `IndexMap` keeps the insertion (= id) order, which the reducer's
/// canonicalization pass relies on.
pub type NeighborMap = IndexMap<ConceptId, Vec<Neighbor>>;

/// A canonical undirected weighted edge
///
/// Invariant: `a < b` under the fixed id order. At most one edge exists per
/// unordered pair per kind; the reducer enforces that globally, the
/// constructor enforces the pair ordering locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub a: ConceptId,
    pub b: ConceptId,
    pub weight: f32,
    pub kind: EdgeKind,
}

impl Edge {
    /// Create an edge over the unordered pair `{x, y}`, swapping endpoints
    /// into canonical order. Self-loops are rejected.
    pub fn between(x: ConceptId, y: ConceptId, weight: f32, kind: EdgeKind) -> GraphResult<Self> {
        if x == y {
            return Err(GraphError::SelfLoop(x));
        }
        let (a, b) = if x < y { (x, y) } else { (y, x) };
        Ok(Edge { a, b, weight, kind })
    }

    /// The canonical pair key, unique per kind
    pub fn pair(&self) -> (ConceptId, ConceptId) {
        (self.a, self.b)
    }

    /// Whether the edge touches the given concept
    pub fn touches(&self, id: ConceptId) -> bool {
        self.a == id || self.b == id
    }
}
