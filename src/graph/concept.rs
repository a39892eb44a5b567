//! Concept node: identity, metadata, and embedding vector

use super::store::{GraphError, GraphResult};
use super::types::{Category, ConceptId};
use serde::{Deserialize, Serialize};

/// A concept in the corpus
///
/// The embedding is immutable once the concept is constructed; dimension
/// consistency across a corpus is enforced by [`VectorStore`](super::VectorStore),
/// finiteness is enforced here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Concept {
    /// Unique identifier
    pub id: ConceptId,

    /// Human-readable title
    pub title: String,

    /// Category; `None` in the input defaults to the General bucket
    #[serde(default = "Category::general")]
    pub category: Category,

    /// Fixed-length embedding vector
    pub embedding: Vec<f32>,
}

impl Concept {
    /// Create a concept, rejecting empty or non-finite embeddings.
    pub fn new(
        id: ConceptId,
        title: impl Into<String>,
        category: Option<Category>,
        embedding: Vec<f32>,
    ) -> GraphResult<Self> {
        if embedding.is_empty() {
            return Err(GraphError::EmptyEmbedding(id));
        }
        if embedding.iter().any(|v| !v.is_finite()) {
            return Err(GraphError::NonFiniteEmbedding(id));
        }

        Ok(Concept {
            id,
            title: title.into(),
            category: category.unwrap_or_else(Category::general),
            embedding,
        })
    }

    /// Embedding dimensionality
    pub fn dimensions(&self) -> usize {
        self.embedding.len()
    }

    /// L2 norm of the embedding; 0.0 marks a degenerate vector
    pub fn norm(&self) -> f32 {
        self.embedding.iter().map(|v| v * v).sum::<f32>().sqrt()
    }
}
