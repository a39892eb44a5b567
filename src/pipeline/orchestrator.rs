//! Synchronous rebuild orchestrator
//!
//! Pure composition of the core stages; owns no I/O. One rebuild holds one
//! writer per intermediate structure, parallelism happens only inside
//! stages over read-only inputs, so results are deterministic under a fixed
//! seed.

use super::{PipelineConfig, PipelineError, PipelineResult};
use crate::graph::{Concept, Edge, Position, VectorStore};
use crate::layout::compute_positions;
use crate::similarity::{
    category_edges, reduce, ExactIndex, HnswIndex, IndexKind, NeighborIndex,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Counters describing one rebuild
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebuildStats {
    pub concepts: usize,
    pub semantic_edges: usize,
    pub category_edges: usize,
    pub positions: usize,
    pub elapsed: Duration,
}

/// The durable outputs of one rebuild plus its stats
#[derive(Debug, Clone)]
pub struct RebuildOutput {
    pub edges: Vec<Edge>,
    pub positions: Vec<Position>,
    pub stats: RebuildStats,
}

/// Batch rebuild pipeline
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline, validating the configuration up front.
    pub fn new(config: PipelineConfig) -> PipelineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Rebuild the full edge set and layout from scratch.
    ///
    /// Fails fast on malformed input or component errors; an empty corpus
    /// and an edgeless graph are both valid terminal states, not errors.
    /// When a time budget is configured, it is checked at stage boundaries.
    pub fn rebuild(&self, concepts: Vec<Concept>) -> PipelineResult<RebuildOutput> {
        let start = Instant::now();
        let config = &self.config;

        let store = VectorStore::from_concepts(concepts)?;
        info!(
            concepts = store.len(),
            dimensions = store.dimensions(),
            "rebuild started"
        );

        if store.is_empty() {
            return Ok(RebuildOutput {
                edges: Vec::new(),
                positions: Vec::new(),
                stats: RebuildStats {
                    concepts: 0,
                    semantic_edges: 0,
                    category_edges: 0,
                    positions: 0,
                    elapsed: start.elapsed(),
                },
            });
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let candidates = self.index_for(store.len()).find_neighbors(
            &store,
            config.k,
            config.similarity_threshold,
        )?;
        self.check_budget(start)?;

        let mut edges = reduce(&store, &candidates)?;
        let semantic_count = edges.len();
        if semantic_count == 0 {
            warn!(
                threshold = config.similarity_threshold,
                "no semantic edges survived thresholding; continuing with an edgeless graph"
            );
        }

        let category_count = if config.category_edges {
            let sampled = category_edges(
                &store,
                config.category_edge_probability,
                config.category_edge_weight,
                &mut rng,
            )?;
            let count = sampled.len();
            edges.extend(sampled);
            count
        } else {
            0
        };
        self.check_budget(start)?;

        let positions = compute_positions(&store, &edges, &config.layout, &mut rng);
        debug_assert_eq!(positions.len(), store.len());

        let stats = RebuildStats {
            concepts: store.len(),
            semantic_edges: semantic_count,
            category_edges: category_count,
            positions: positions.len(),
            elapsed: start.elapsed(),
        };
        info!(
            semantic_edges = stats.semantic_edges,
            category_edges = stats.category_edges,
            positions = stats.positions,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "rebuild complete"
        );

        Ok(RebuildOutput {
            edges,
            positions,
            stats,
        })
    }

    fn index_for(&self, corpus_size: usize) -> Box<dyn NeighborIndex> {
        let use_hnsw = match self.config.index {
            IndexKind::Exact => false,
            IndexKind::Hnsw => true,
            IndexKind::Auto => corpus_size > self.config.hnsw_cutoff,
        };
        if use_hnsw {
            Box::new(HnswIndex::new(self.config.max_similarity))
        } else {
            Box::new(ExactIndex::new(self.config.max_similarity))
        }
    }

    fn check_budget(&self, start: Instant) -> PipelineResult<()> {
        if let Some(budget) = self.config.time_budget {
            if start.elapsed() > budget {
                return Err(PipelineError::Timeout { budget });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Category, ConceptId, EdgeKind};

    fn concept(id: u64, category: &str, embedding: Vec<f32>) -> Concept {
        Concept::new(
            ConceptId::new(id),
            format!("c{id}"),
            Some(Category::new(category)),
            embedding,
        )
        .unwrap()
    }

    fn pipeline(config: PipelineConfig) -> Pipeline {
        Pipeline::new(config).unwrap()
    }

    #[test]
    fn test_empty_corpus_returns_empty_output() {
        let output = pipeline(PipelineConfig::default()).rebuild(vec![]).unwrap();
        assert!(output.edges.is_empty());
        assert!(output.positions.is_empty());
        assert_eq!(output.stats.concepts, 0);
    }

    #[test]
    fn test_single_concept_gets_position_no_edges() {
        let config = PipelineConfig {
            seed: Some(1),
            ..PipelineConfig::default()
        };
        let output = pipeline(config.clone())
            .rebuild(vec![concept(1, "General", vec![1.0, 0.0])])
            .unwrap();

        assert!(output.edges.is_empty());
        assert_eq!(output.positions.len(), 1);
        assert!(output.positions[0].radius() <= config.layout.galaxy.halo_radius);
    }

    #[test]
    fn test_dimension_mismatch_aborts_rebuild() {
        let err = pipeline(PipelineConfig::default())
            .rebuild(vec![
                concept(1, "General", vec![1.0, 0.0]),
                concept(2, "General", vec![1.0, 0.0, 0.5]),
            ])
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Graph(crate::graph::GraphError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_duplicate_ids_abort_rebuild() {
        let err = pipeline(PipelineConfig::default())
            .rebuild(vec![
                concept(1, "General", vec![1.0, 0.0]),
                concept(1, "General", vec![0.0, 1.0]),
            ])
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Graph(crate::graph::GraphError::DuplicateConcept(_))
        ));
    }

    #[test]
    fn test_semantic_edges_respect_threshold_and_weight_bounds() {
        let config = PipelineConfig {
            seed: Some(7),
            category_edges: false,
            ..PipelineConfig::default()
        };
        let output = pipeline(config.clone())
            .rebuild(vec![
                concept(1, "General", vec![1.0, 0.0]),
                concept(2, "General", vec![0.95, 0.31224989]),
                concept(3, "General", vec![0.0, 1.0]),
            ])
            .unwrap();

        assert!(!output.edges.is_empty());
        for edge in &output.edges {
            assert_eq!(edge.kind, EdgeKind::Semantic);
            assert!(edge.weight >= config.similarity_threshold);
            assert!(edge.weight <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn test_fixed_seed_rebuilds_are_identical() {
        let config = PipelineConfig {
            seed: Some(99),
            ..PipelineConfig::default()
        };
        let corpus: Vec<Concept> = (0..20)
            .map(|i| {
                let angle = i as f32 * 0.1;
                concept(
                    i,
                    if i % 2 == 0 { "History" } else { "Geography" },
                    vec![angle.cos(), angle.sin()],
                )
            })
            .collect();

        let a = pipeline(config.clone()).rebuild(corpus.clone()).unwrap();
        let b = pipeline(config).rebuild(corpus).unwrap();

        assert_eq!(a.edges, b.edges);
        assert_eq!(a.positions, b.positions);
    }

    #[test]
    fn test_degree_cap_on_clustered_corpus() {
        // Two well-separated clusters, each smaller than k+1, so every
        // node's incident semantic edges stay within k
        let config = PipelineConfig {
            k: 4,
            seed: Some(3),
            category_edges: false,
            ..PipelineConfig::default()
        };
        let mut corpus = Vec::new();
        for i in 0..5u64 {
            let t = i as f32 * 0.01;
            corpus.push(concept(i, "A", vec![1.0, t, 0.0]));
            corpus.push(concept(100 + i, "B", vec![0.0, t, 1.0]));
        }

        let output = pipeline(config.clone()).rebuild(corpus).unwrap();
        for id in (0..5).chain(100..105) {
            let id = ConceptId::new(id);
            let degree = output.edges.iter().filter(|e| e.touches(id)).count();
            assert!(degree <= config.k, "degree {} exceeds k for {}", degree, id);
        }
    }

    #[test]
    fn test_timeout_budget_zero_aborts() {
        let config = PipelineConfig {
            time_budget: Some(Duration::ZERO),
            ..PipelineConfig::default()
        };
        let err = pipeline(config)
            .rebuild(vec![
                concept(1, "General", vec![1.0, 0.0]),
                concept(2, "General", vec![0.9, 0.1]),
            ])
            .unwrap_err();
        assert!(matches!(err, PipelineError::Timeout { .. }));
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let config = PipelineConfig {
            k: 0,
            ..PipelineConfig::default()
        };
        assert!(Pipeline::new(config).is_err());
    }
}
