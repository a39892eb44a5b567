//! Shared utilities for layout algorithms
//!
//! Provides a read-only, dense view of the graph topology for layout execution.

use std::collections::HashMap;

/// Node Identifier type (u64)
pub type NodeId = u64;

/// A dense, integer-indexed, undirected view of the graph used by the
/// force relaxation.
///
/// Layout algorithms iterate over nodes and their weighted neighbors many
/// times per run; id-keyed hash maps are too slow for that. The view maps
/// NodeIds to dense indices (0..N) and stores the adjacency in Compressed
/// Sparse Row form, with each undirected edge appearing in both endpoints'
/// neighbor slices.
pub struct LayoutGraph {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,
    /// Offsets into `neighbors`. Size = node_count + 1
    pub offsets: Vec<usize>,
    /// Contiguous array of neighbor indices
    pub neighbors: Vec<usize>,
    /// Edge weights, aligned with `neighbors`
    pub weights: Vec<f64>,
}

impl LayoutGraph {
    /// Build a view from a node list and undirected weighted edges.
    ///
    /// Edges referencing ids outside `nodes` are skipped; the caller is
    /// expected to have validated membership already.
    pub fn from_edges(nodes: &[NodeId], edges: &[(NodeId, NodeId, f64)]) -> Self {
        let mut index_to_node = Vec::with_capacity(nodes.len());
        let mut node_to_index = HashMap::with_capacity(nodes.len());

        for (idx, &node_id) in nodes.iter().enumerate() {
            index_to_node.push(node_id);
            node_to_index.insert(node_id, idx);
        }

        let node_count = index_to_node.len();
        let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); node_count];

        for &(a, b, w) in edges {
            let (Some(&ai), Some(&bi)) = (node_to_index.get(&a), node_to_index.get(&b)) else {
                continue;
            };
            adjacency[ai].push((bi, w));
            adjacency[bi].push((ai, w));
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut neighbors = Vec::new();
        let mut weights = Vec::new();

        offsets.push(0);
        for row in adjacency {
            for (target, w) in row {
                neighbors.push(target);
                weights.push(w);
            }
            offsets.push(neighbors.len());
        }

        Self {
            node_count,
            index_to_node,
            node_to_index,
            offsets,
            neighbors,
            weights,
        }
    }

    /// Degree of a node (by dense index)
    pub fn degree(&self, idx: usize) -> usize {
        self.offsets[idx + 1] - self.offsets[idx]
    }

    /// Weighted neighbor slice of a node (by dense index)
    pub fn neighbors_of(&self, idx: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let start = self.offsets[idx];
        let end = self.offsets[idx + 1];
        self.neighbors[start..end]
            .iter()
            .copied()
            .zip(self.weights[start..end].iter().copied())
    }
}
