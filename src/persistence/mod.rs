//! Persistence collaborator interface
//!
//! The core never touches storage; everything durable flows through the
//! [`GalaxyStore`] trait at the runner boundary. Upserts are idempotent:
//! edges are keyed by `(a, b, kind)`, positions by concept id, so replaying
//! a rebuild converges to the same stored state.

pub mod json;
pub mod memory;

use crate::graph::{Concept, Edge, Position};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use json::JsonStore;
pub use memory::MemoryStore;

/// Persistence errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store error: {0}")]
    Other(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Rebuild phases reported to the status channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RebuildPhase {
    Loading,
    Rebuilding,
    Persisting,
    Complete,
    Error,
}

/// Progress/status record published by the runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebuildStatus {
    pub run_id: Uuid,
    pub phase: RebuildPhase,
    pub processed: usize,
    pub total: usize,
    pub started_at: DateTime<Utc>,
    pub error: Option<String>,
}

impl RebuildStatus {
    pub fn new(run_id: Uuid, started_at: DateTime<Utc>, phase: RebuildPhase) -> Self {
        Self {
            run_id,
            phase,
            processed: 0,
            total: 0,
            started_at,
            error: None,
        }
    }

    pub fn with_progress(mut self, processed: usize, total: usize) -> Self {
        self.processed = processed;
        self.total = total;
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.phase = RebuildPhase::Error;
        self.error = Some(error.into());
        self
    }
}

/// External store the pipeline runner reads concepts from and writes
/// edges/positions back to.
///
/// Implementations own their connection lifecycle; methods are expected to
/// acquire and release any underlying resource per call (or hold it for the
/// value's lifetime), so the runner never leaks a connection on early
/// returns.
#[async_trait]
pub trait GalaxyStore: Send + Sync {
    /// Load the corpus to rebuild from.
    async fn load_concepts(&self) -> StoreResult<Vec<Concept>>;

    /// Idempotently replace the stored edge set, keyed by `(a, b, kind)`.
    async fn replace_edges(&self, edges: &[Edge]) -> StoreResult<()>;

    /// Idempotently replace the stored positions, keyed by concept id.
    async fn replace_positions(&self, positions: &[Position]) -> StoreResult<()>;

    /// Publish a status record for observers.
    async fn update_status(&self, status: &RebuildStatus) -> StoreResult<()>;
}
