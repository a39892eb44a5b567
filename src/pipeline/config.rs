//! Pipeline configuration
//!
//! One explicit struct passed into the orchestrator; there are no
//! process-wide defaults. Everything is serde-friendly so configs can ride
//! along in files next to the corpus.

use super::{PipelineError, PipelineResult};
use crate::layout::LayoutOptions;
use crate::similarity::IndexKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Max neighbors per concept
    pub k: usize,
    /// Minimum cosine similarity for a semantic candidate
    pub similarity_threshold: f32,
    /// Neighbor search backend
    pub index: IndexKind,
    /// Corpus size at which `IndexKind::Auto` switches to HNSW
    pub hnsw_cutoff: usize,
    /// Near-duplicate cap: candidate pairs above this similarity are
    /// excluded. `None` lets identical embeddings form cliques.
    pub max_similarity: Option<f32>,
    /// Whether to sample shared-category connectivity edges
    pub category_edges: bool,
    /// Per-pair sampling probability for category edges
    pub category_edge_probability: f64,
    /// Constant weight of category edges; keep below the similarity
    /// threshold so they never outweigh semantic edges
    pub category_edge_weight: f32,
    /// RNG seed; unset means non-reproducible runs
    pub seed: Option<u64>,
    /// Layout strategy and its parameters
    pub layout: LayoutOptions,
    /// Optional wall-clock budget for a whole rebuild
    pub time_budget: Option<Duration>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            k: 12,
            similarity_threshold: 0.6,
            index: IndexKind::Auto,
            hnsw_cutoff: 10_000,
            max_similarity: None,
            category_edges: true,
            category_edge_probability: 0.1,
            category_edge_weight: 0.3,
            seed: None,
            layout: LayoutOptions::default(),
            time_budget: None,
        }
    }
}

impl PipelineConfig {
    /// Reject configurations the pipeline cannot honor.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.k == 0 {
            return Err(PipelineError::Config("k must be at least 1".into()));
        }
        if !(-1.0..=1.0).contains(&self.similarity_threshold)
            || self.similarity_threshold.is_nan()
        {
            return Err(PipelineError::Config(format!(
                "similarity_threshold must be in [-1, 1], got {}",
                self.similarity_threshold
            )));
        }
        if let Some(cap) = self.max_similarity {
            if cap < self.similarity_threshold || cap.is_nan() {
                return Err(PipelineError::Config(format!(
                    "max_similarity {} must be >= similarity_threshold {}",
                    cap, self.similarity_threshold
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.category_edge_probability) {
            return Err(PipelineError::Config(format!(
                "category_edge_probability must be in [0, 1], got {}",
                self.category_edge_probability
            )));
        }
        if !(0.0..=1.0).contains(&self.category_edge_weight) {
            return Err(PipelineError::Config(format!(
                "category_edge_weight must be in [0, 1], got {}",
                self.category_edge_weight
            )));
        }
        if !self.layout.galaxy.is_valid() {
            return Err(PipelineError::Config(
                "galaxy bands must be ordered (min < core < galaxy < halo) with \
                 band fractions in [0, 1] summing to at most 1"
                    .into(),
            ));
        }
        if self.layout.force.iterations == 0 {
            return Err(PipelineError::Config(
                "force layout needs at least 1 iteration".into(),
            ));
        }
        Ok(())
    }
}
