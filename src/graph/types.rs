//! Core type definitions for the concept graph

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a concept
///
/// The `Ord` impl doubles as the fixed total order used to canonicalize
/// undirected pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ConceptId(pub u64);

impl ConceptId {
    pub fn new(id: u64) -> Self {
        ConceptId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConceptId({})", self.0)
    }
}

impl From<u64> for ConceptId {
    fn from(id: u64) -> Self {
        ConceptId(id)
    }
}

/// Concept category (e.g., "Science & Technology", "History")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Category(String);

impl Category {
    pub fn new(category: impl Into<String>) -> Self {
        Category(category.into())
    }

    /// The bucket concepts without a category fall into
    pub fn general() -> Self {
        Category("General".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Cluster identifier derived from the category: lower-cased, spaces
    /// replaced with underscores
    pub fn cluster_id(&self) -> String {
        self.0.to_lowercase().replace(' ', "_")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category(s)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Category(s.to_string())
    }
}

/// Edge provenance: embedding similarity or shared-category sampling
///
/// The one-edge-per-unordered-pair invariant holds within each kind, not
/// across kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Semantic,
    Category,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Semantic => write!(f, "semantic"),
            EdgeKind::Category => write!(f, "category"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concept_id() {
        let id = ConceptId::new(42);
        assert_eq!(id.as_u64(), 42);
        assert_eq!(format!("{}", id), "ConceptId(42)");

        let id2: ConceptId = 100.into();
        assert_eq!(id2.as_u64(), 100);
    }

    #[test]
    fn test_id_ordering() {
        let id1 = ConceptId::new(1);
        let id2 = ConceptId::new(2);
        assert!(id1 < id2);
    }

    #[test]
    fn test_category() {
        let cat = Category::new("Science & Technology");
        assert_eq!(cat.as_str(), "Science & Technology");
        assert_eq!(cat.cluster_id(), "science_&_technology");

        assert_eq!(Category::general().as_str(), "General");
    }

    #[test]
    fn test_edge_kind_serde() {
        let json = serde_json::to_string(&EdgeKind::Semantic).unwrap();
        assert_eq!(json, "\"semantic\"");
        assert_eq!(format!("{}", EdgeKind::Category), "category");
    }
}
