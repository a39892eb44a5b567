//! Galaxis
//!
//! Builds a semantic-similarity graph over concept embeddings and lays the
//! result out as a 3D "galaxy" for visualization.
//!
//! The pipeline is a batch recomputation: on every rebuild the full edge
//! set and all positions are derived from scratch out of the corpus of
//! `(id, category, embedding)` tuples. The stages:
//!
//! 1. [`graph::VectorStore`]: validated in-memory corpus
//! 2. [`similarity`]: per-concept top-k cosine neighbors (exact or HNSW)
//! 3. [`similarity::reduce`]: canonical undirected weighted edges
//! 4. [`layout`]: procedural galaxy placement or force relaxation
//! 5. [`pipeline`]: orchestration, configuration, and the async runner
//!    that talks to the [`persistence`] collaborator
//!
//! # Example
//!
//! ```rust
//! use galaxis::graph::{Concept, ConceptId};
//! use galaxis::pipeline::{Pipeline, PipelineConfig};
//!
//! let concepts = vec![
//!     Concept::new(ConceptId::new(1), "Entropy", None, vec![1.0, 0.0]).unwrap(),
//!     Concept::new(ConceptId::new(2), "Enthalpy", None, vec![0.9, 0.2]).unwrap(),
//! ];
//!
//! let config = PipelineConfig {
//!     seed: Some(42),
//!     ..PipelineConfig::default()
//! };
//! let output = Pipeline::new(config).unwrap().rebuild(concepts).unwrap();
//!
//! assert_eq!(output.positions.len(), 2);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod graph;
pub mod layout;
pub mod persistence;
pub mod pipeline;
pub mod similarity;

// Re-export main types for convenience
pub use graph::{
    Category, Concept, ConceptId, Edge, EdgeKind, GraphError, GraphResult, Neighbor,
    NeighborMap, Position, VectorStore,
};

pub use similarity::{
    ExactIndex, HnswIndex, IndexKind, NeighborIndex, SimilarityError, SimilarityResult,
};

pub use layout::{LayoutOptions, LayoutStrategy};

pub use pipeline::{
    Pipeline, PipelineConfig, PipelineError, PipelineResult, PipelineRunner, RebuildOutput,
    RebuildStats,
};

pub use persistence::{
    GalaxyStore, JsonStore, MemoryStore, RebuildPhase, RebuildStatus, StoreError, StoreResult,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
