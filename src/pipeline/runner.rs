//! Async pipeline runner
//!
//! The only component that talks to the persistence collaborator. Loads the
//! corpus, runs the synchronous core on the blocking pool (under the
//! configured wall-clock budget), then persists edges and positions;
//! nothing is written unless the whole rebuild succeeded. A status record
//! is published on every exit path, including failures.

use super::orchestrator::{Pipeline, RebuildStats};
use super::{PipelineConfig, PipelineError, PipelineResult};
use crate::persistence::{GalaxyStore, RebuildPhase, RebuildStatus};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

pub struct PipelineRunner<S: GalaxyStore> {
    store: Arc<S>,
    pipeline: Pipeline,
}

impl<S: GalaxyStore + 'static> PipelineRunner<S> {
    pub fn new(store: Arc<S>, config: PipelineConfig) -> PipelineResult<Self> {
        Ok(Self {
            store,
            pipeline: Pipeline::new(config)?,
        })
    }

    /// Run one full rebuild against the store.
    pub async fn run(&self) -> PipelineResult<RebuildStats> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(%run_id, "pipeline run started");

        match self.run_inner(run_id, started_at).await {
            Ok(stats) => Ok(stats),
            Err(err) => {
                error!(%run_id, error = %err, "pipeline run failed");
                let status = RebuildStatus::new(run_id, started_at, RebuildPhase::Error)
                    .with_error(err.to_string());
                if let Err(status_err) = self.store.update_status(&status).await {
                    warn!(%run_id, error = %status_err, "failed to publish error status");
                }
                Err(err)
            }
        }
    }

    async fn run_inner(
        &self,
        run_id: Uuid,
        started_at: DateTime<Utc>,
    ) -> PipelineResult<RebuildStats> {
        let status = |phase| RebuildStatus::new(run_id, started_at, phase);

        self.store.update_status(&status(RebuildPhase::Loading)).await?;
        let concepts = self.store.load_concepts().await?;
        let total = concepts.len();

        self.store
            .update_status(&status(RebuildPhase::Rebuilding).with_progress(0, total))
            .await?;

        let pipeline = self.pipeline.clone();
        let task = tokio::task::spawn_blocking(move || pipeline.rebuild(concepts));
        let output = match self.pipeline.config().time_budget {
            Some(budget) => tokio::time::timeout(budget, task)
                .await
                .map_err(|_| PipelineError::Timeout { budget })?,
            None => task.await,
        }
        .map_err(|join_err| PipelineError::Cancelled(join_err.to_string()))??;

        self.store
            .update_status(&status(RebuildPhase::Persisting).with_progress(total, total))
            .await?;
        self.store.replace_edges(&output.edges).await?;
        self.store.replace_positions(&output.positions).await?;

        self.store
            .update_status(&status(RebuildPhase::Complete).with_progress(total, total))
            .await?;
        info!(
            %run_id,
            edges = output.edges.len(),
            positions = output.positions.len(),
            "pipeline run complete"
        );
        Ok(output.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Category, Concept, ConceptId};
    use crate::persistence::MemoryStore;

    fn corpus() -> Vec<Concept> {
        (0..6u64)
            .map(|i| {
                let angle = i as f32 * 0.05;
                Concept::new(
                    ConceptId::new(i),
                    format!("c{i}"),
                    Some(Category::new(if i < 3 { "History" } else { "Geography" })),
                    vec![angle.cos(), angle.sin()],
                )
                .unwrap()
            })
            .collect()
    }

    #[tokio::test]
    async fn test_run_persists_edges_and_positions() {
        let store = Arc::new(MemoryStore::with_concepts(corpus()));
        let config = PipelineConfig {
            seed: Some(5),
            ..PipelineConfig::default()
        };
        let runner = PipelineRunner::new(store.clone(), config).unwrap();

        let stats = runner.run().await.unwrap();
        assert_eq!(stats.concepts, 6);
        assert_eq!(store.positions().await.len(), 6);
        assert_eq!(
            store.last_status().await.unwrap().phase,
            RebuildPhase::Complete
        );
    }

    #[tokio::test]
    async fn test_failed_run_publishes_error_status_and_persists_nothing() {
        // Duplicate ids make the core abort
        let mut concepts = corpus();
        concepts.push(concepts[0].clone());

        let store = Arc::new(MemoryStore::with_concepts(concepts));
        let runner = PipelineRunner::new(store.clone(), PipelineConfig::default()).unwrap();

        let err = runner.run().await.unwrap_err();
        assert!(matches!(err, PipelineError::Graph(_)));

        assert!(store.edges().await.is_empty());
        assert!(store.positions().await.is_empty());
        let last = store.last_status().await.unwrap();
        assert_eq!(last.phase, RebuildPhase::Error);
        assert!(last.error.is_some());
    }

    #[tokio::test]
    async fn test_empty_corpus_completes_cleanly() {
        let store = Arc::new(MemoryStore::new());
        let runner = PipelineRunner::new(store.clone(), PipelineConfig::default()).unwrap();

        let stats = runner.run().await.unwrap();
        assert_eq!(stats.concepts, 0);
        assert_eq!(
            store.last_status().await.unwrap().phase,
            RebuildPhase::Complete
        );
    }
}
