//! Pipeline orchestration
//!
//! Wires the store, similarity index, reducer, and layout engine into a
//! single `rebuild` batch operation. The core is synchronous and touches no
//! I/O; the async [`runner`] is the only place that talks to the
//! persistence collaborator.

pub mod config;
pub mod orchestrator;
pub mod runner;

use crate::graph::GraphError;
use crate::persistence::StoreError;
use crate::similarity::SimilarityError;
use std::time::Duration;
use thiserror::Error;

pub use config::PipelineConfig;
pub use orchestrator::{Pipeline, RebuildOutput, RebuildStats};
pub use runner::PipelineRunner;

/// Pipeline errors: every component failure aborts the whole rebuild and
/// surfaces here unchanged; nothing is retried and nothing partial is
/// persisted.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Similarity(#[from] SimilarityError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("rebuild exceeded time budget of {budget:?}")]
    Timeout { budget: Duration },

    #[error("rebuild task failed: {0}")]
    Cancelled(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
