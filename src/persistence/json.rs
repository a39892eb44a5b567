//! JSON-file store backend
//!
//! Reads `concepts.json` from a data directory and writes `edges.json`,
//! `positions.json`, and `status.json` next to it. Whole-file replacement
//! makes the upserts trivially idempotent.

use super::{GalaxyStore, RebuildStatus, StoreResult};
use crate::graph::{Concept, Edge, Position};
use async_trait::async_trait;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::info;

const CONCEPTS_FILE: &str = "concepts.json";
const EDGES_FILE: &str = "edges.json";
const POSITIONS_FILE: &str = "positions.json";
const STATUS_FILE: &str = "status.json";

/// File-backed `GalaxyStore` rooted at a data directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write_json<T: serde::Serialize>(&self, filename: &str, value: &T) -> StoreResult<()> {
        if !self.dir.exists() {
            std::fs::create_dir_all(&self.dir)?;
        }
        let path = self.dir.join(filename);
        let file = File::create(&path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), value)?;
        Ok(())
    }
}

#[async_trait]
impl GalaxyStore for JsonStore {
    async fn load_concepts(&self) -> StoreResult<Vec<Concept>> {
        let path = self.dir.join(CONCEPTS_FILE);
        let file = File::open(&path)?;
        let concepts: Vec<Concept> = serde_json::from_reader(BufReader::new(file))?;
        info!(path = %path.display(), concepts = concepts.len(), "loaded corpus");
        Ok(concepts)
    }

    async fn replace_edges(&self, edges: &[Edge]) -> StoreResult<()> {
        self.write_json(EDGES_FILE, &edges)?;
        info!(edges = edges.len(), "wrote edge set");
        Ok(())
    }

    async fn replace_positions(&self, positions: &[Position]) -> StoreResult<()> {
        self.write_json(POSITIONS_FILE, &positions)?;
        info!(positions = positions.len(), "wrote positions");
        Ok(())
    }

    async fn update_status(&self, status: &RebuildStatus) -> StoreResult<()> {
        self.write_json(STATUS_FILE, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Category, ConceptId, EdgeKind};
    use crate::persistence::RebuildPhase;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_concepts() -> Vec<Concept> {
        vec![
            Concept::new(
                ConceptId::new(1),
                "Alpha",
                Some(Category::new("History")),
                vec![1.0, 0.0],
            )
            .unwrap(),
            Concept::new(ConceptId::new(2), "Beta", None, vec![0.0, 1.0]).unwrap(),
        ]
    }

    #[tokio::test]
    async fn test_concepts_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        let concepts = sample_concepts();
        store.write_json(CONCEPTS_FILE, &concepts).unwrap();

        let loaded = store.load_concepts().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, ConceptId::new(1));
        assert_eq!(loaded[0].category, Category::new("History"));
    }

    #[tokio::test]
    async fn test_corpus_without_categories_falls_back_to_general() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONCEPTS_FILE),
            r#"[{"id": 7, "title": "Orphan", "embedding": [0.5, 0.5]}]"#,
        )
        .unwrap();

        let store = JsonStore::new(dir.path());
        let loaded = store.load_concepts().await.unwrap();
        assert_eq!(loaded[0].category, Category::general());
    }

    #[tokio::test]
    async fn test_edges_and_positions_written() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("data"));

        let edge =
            Edge::between(ConceptId::new(1), ConceptId::new(2), 0.8, EdgeKind::Semantic).unwrap();
        let position = Position::new(ConceptId::new(1), 1.0, 2.0, 3.0, "history");

        store.replace_edges(&[edge]).await.unwrap();
        store.replace_positions(&[position]).await.unwrap();
        store
            .update_status(&RebuildStatus::new(
                Uuid::new_v4(),
                Utc::now(),
                RebuildPhase::Complete,
            ))
            .await
            .unwrap();

        assert!(store.dir().join(EDGES_FILE).exists());
        assert!(store.dir().join(POSITIONS_FILE).exists());
        assert!(store.dir().join(STATUS_FILE).exists());

        let edges: Vec<Edge> = serde_json::from_reader(
            File::open(store.dir().join(EDGES_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].weight, 0.8);
    }

    #[tokio::test]
    async fn test_missing_corpus_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let err = store.load_concepts().await.unwrap_err();
        assert!(matches!(err, crate::persistence::StoreError::Io(_)));
    }
}
