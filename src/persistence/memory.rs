//! In-memory store, used by tests and demos

use super::{GalaxyStore, RebuildStatus, StoreResult};
use crate::graph::{Concept, Edge, Position};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// A `GalaxyStore` holding everything in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    concepts: RwLock<Vec<Concept>>,
    edges: RwLock<Vec<Edge>>,
    positions: RwLock<Vec<Position>>,
    statuses: RwLock<Vec<RebuildStatus>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_concepts(concepts: Vec<Concept>) -> Self {
        Self {
            concepts: RwLock::new(concepts),
            ..Self::default()
        }
    }

    pub async fn edges(&self) -> Vec<Edge> {
        self.edges.read().await.clone()
    }

    pub async fn positions(&self) -> Vec<Position> {
        self.positions.read().await.clone()
    }

    /// Full status history in publication order
    pub async fn statuses(&self) -> Vec<RebuildStatus> {
        self.statuses.read().await.clone()
    }

    pub async fn last_status(&self) -> Option<RebuildStatus> {
        self.statuses.read().await.last().cloned()
    }
}

#[async_trait]
impl GalaxyStore for MemoryStore {
    async fn load_concepts(&self) -> StoreResult<Vec<Concept>> {
        Ok(self.concepts.read().await.clone())
    }

    async fn replace_edges(&self, edges: &[Edge]) -> StoreResult<()> {
        *self.edges.write().await = edges.to_vec();
        Ok(())
    }

    async fn replace_positions(&self, positions: &[Position]) -> StoreResult<()> {
        *self.positions.write().await = positions.to_vec();
        Ok(())
    }

    async fn update_status(&self, status: &RebuildStatus) -> StoreResult<()> {
        self.statuses.write().await.push(status.clone());
        Ok(())
    }
}
