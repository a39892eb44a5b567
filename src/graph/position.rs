//! 3D position assigned to a concept by the layout engine

use super::types::ConceptId;
use serde::{Deserialize, Serialize};

/// One position per concept per layout run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: ConceptId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Deterministically derived from the concept's category
    pub cluster_id: String,
}

impl Position {
    pub fn new(id: ConceptId, x: f64, y: f64, z: f64, cluster_id: impl Into<String>) -> Self {
        Position {
            id,
            x,
            y,
            z,
            cluster_id: cluster_id.into(),
        }
    }

    /// Distance from the origin
    pub fn radius(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// All coordinates finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius() {
        let p = Position::new(ConceptId::new(1), 2.0, 3.0, 6.0, "general");
        assert!((p.radius() - 7.0).abs() < 1e-9);
        assert!(p.is_finite());
    }
}
