//! In-memory vector store: concept id -> embedding + metadata
//!
//! Pure data container consumed by the similarity index, the reducer, and
//! the layout adapter. Input invariants (unique ids, uniform embedding
//! dimensions) are enforced at the door so downstream stages never revalidate.

use super::concept::Concept;
use super::types::{Category, ConceptId};
use ndarray::Array2;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Input and contract errors on concept data
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Concept {0} already exists")]
    DuplicateConcept(ConceptId),

    #[error("Dimension mismatch for concept {id}: expected {expected}, got {got}")]
    DimensionMismatch {
        id: ConceptId,
        expected: usize,
        got: usize,
    },

    #[error("Concept {0} has an empty embedding")]
    EmptyEmbedding(ConceptId),

    #[error("Concept {0} has a non-finite embedding component")]
    NonFiniteEmbedding(ConceptId),

    #[error("Self-loop on concept {0}")]
    SelfLoop(ConceptId),

    #[error("Candidate references unknown concept {0}")]
    UnknownConcept(ConceptId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Dense, read-only store over a corpus of concepts
///
/// Concepts are held sorted by id; the sorted order is the iteration order
/// everywhere downstream, which is what makes reduction and layout
/// deterministic.
#[derive(Debug, Default)]
pub struct VectorStore {
    concepts: Vec<Concept>,
    id_to_index: FxHashMap<ConceptId, usize>,
}

impl VectorStore {
    /// Build a store from a batch of concepts, validating uniqueness and
    /// dimension uniformity.
    pub fn from_concepts(mut concepts: Vec<Concept>) -> GraphResult<Self> {
        concepts.sort_by_key(|c| c.id);

        let mut id_to_index = FxHashMap::default();
        id_to_index.reserve(concepts.len());

        let expected = concepts.first().map(|c| c.dimensions());
        for (idx, concept) in concepts.iter().enumerate() {
            if id_to_index.insert(concept.id, idx).is_some() {
                return Err(GraphError::DuplicateConcept(concept.id));
            }
            let expected = expected.unwrap_or(concept.dimensions());
            if concept.dimensions() != expected {
                return Err(GraphError::DimensionMismatch {
                    id: concept.id,
                    expected,
                    got: concept.dimensions(),
                });
            }
        }

        Ok(Self {
            concepts,
            id_to_index,
        })
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Embedding dimensionality; 0 for an empty store
    pub fn dimensions(&self) -> usize {
        self.concepts.first().map_or(0, |c| c.dimensions())
    }

    /// Concepts in ascending id order
    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    /// Ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = ConceptId> + '_ {
        self.concepts.iter().map(|c| c.id)
    }

    pub fn get(&self, id: ConceptId) -> Option<&Concept> {
        self.id_to_index.get(&id).map(|&idx| &self.concepts[idx])
    }

    pub fn contains(&self, id: ConceptId) -> bool {
        self.id_to_index.contains_key(&id)
    }

    /// Dense index of a concept in the sorted order
    pub fn index_of(&self, id: ConceptId) -> Option<usize> {
        self.id_to_index.get(&id).copied()
    }

    /// Concept at a dense index
    pub fn by_index(&self, idx: usize) -> &Concept {
        &self.concepts[idx]
    }

    /// The n x d embedding matrix in sorted-id row order
    pub fn embedding_matrix(&self) -> Array2<f32> {
        let n = self.len();
        let d = self.dimensions();
        let mut matrix = Array2::zeros((n, d));
        for (i, concept) in self.concepts.iter().enumerate() {
            for (j, &v) in concept.embedding.iter().enumerate() {
                matrix[[i, j]] = v;
            }
        }
        matrix
    }

    /// Concepts grouped by category, categories in sorted order, members in
    /// ascending id order
    pub fn by_category(&self) -> Vec<(Category, Vec<ConceptId>)> {
        let mut groups: std::collections::BTreeMap<Category, Vec<ConceptId>> =
            std::collections::BTreeMap::new();
        for concept in &self.concepts {
            groups
                .entry(concept.category.clone())
                .or_default()
                .push(concept.id);
        }
        groups.into_iter().collect()
    }
}
