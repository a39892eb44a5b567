//! Layout adapter
//!
//! Bridges the concept store and edge set to the pure algorithms in
//! `galaxis-layout`: projects the graph into the dense layout view, runs the
//! selected strategy, then lifts the result back into per-concept
//! [`Position`]s with category z-banding and cluster ids.

use crate::graph::{Category, Edge, Position, VectorStore};
use galaxis_layout::{force_layout, galaxy_point, LayoutGraph};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

pub use galaxis_layout::procedural::galaxy_positions;
pub use galaxis_layout::{ForceParams, GalaxyParams};

/// Layout strategy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutStrategy {
    /// Density-banded galaxy placement; ignores edges
    Procedural,
    /// 2D force relaxation from a random start, z by category band
    Force,
    /// Force relaxation seeded from the procedural layout
    Hybrid,
}

/// Everything the layout pass needs besides the store and the edges
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutOptions {
    pub strategy: LayoutStrategy,
    pub galaxy: GalaxyParams,
    /// Fixed spatial offset per category name, applied with bounded jitter
    pub category_centers: HashMap<String, [f64; 3]>,
    /// Half-extent of the uniform jitter around a category center
    pub center_jitter: f64,
    pub force: ForceParams,
    /// Multiplier on relaxed x/y coordinates
    pub force_scale: f64,
    /// Half-extent of the uniform jitter on the category z band
    pub z_jitter: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            strategy: LayoutStrategy::Procedural,
            galaxy: GalaxyParams::default(),
            category_centers: HashMap::new(),
            center_jitter: 40.0,
            force: ForceParams::default(),
            force_scale: 1.0,
            z_jitter: 5.0,
        }
    }
}

/// Fixed z band per category, used to layer the 2D force layout into 3D.
/// Unknown categories sit on the mid-plane.
fn z_band(category: &Category) -> f64 {
    match category.as_str() {
        "Science & Technology" => 20.0,
        "History" => 0.0,
        "Arts & Culture" => -20.0,
        "Philosophy & Religion" => 10.0,
        "Geography" => -10.0,
        "General" => 5.0,
        _ => 0.0,
    }
}

fn jitter<R: Rng + ?Sized>(half_extent: f64, rng: &mut R) -> f64 {
    if half_extent > 0.0 {
        rng.gen_range(-half_extent..half_extent)
    } else {
        0.0
    }
}

/// Compute one position per concept.
///
/// Iteration follows the store's sorted-id order and all randomness flows
/// from the supplied RNG, so a seeded run is fully reproducible for the
/// procedural strategy and reproducible for the force strategies as long as
/// the same RNG seed and iteration order are used (they are; see the force
/// module notes).
pub fn compute_positions<R: Rng + ?Sized>(
    store: &VectorStore,
    edges: &[Edge],
    options: &LayoutOptions,
    rng: &mut R,
) -> Vec<Position> {
    if store.is_empty() {
        return Vec::new();
    }

    info!(
        strategy = ?options.strategy,
        concepts = store.len(),
        edges = edges.len(),
        "computing layout"
    );

    match options.strategy {
        LayoutStrategy::Procedural => procedural_positions(store, options, rng),
        LayoutStrategy::Force => relaxed_positions(store, edges, options, None, rng),
        LayoutStrategy::Hybrid => {
            let seed_layout = procedural_positions(store, options, rng);
            let init = seed_layout.iter().map(|p| [p.x, p.y]).collect();
            relaxed_positions(store, edges, options, Some(init), rng)
        }
    }
}

fn procedural_positions<R: Rng + ?Sized>(
    store: &VectorStore,
    options: &LayoutOptions,
    rng: &mut R,
) -> Vec<Position> {
    store
        .concepts()
        .iter()
        .map(|concept| {
            let mut point = galaxy_point(&options.galaxy, rng);
            if let Some(center) = options.category_centers.get(concept.category.as_str()) {
                for axis in 0..3 {
                    point[axis] += center[axis] + jitter(options.center_jitter, rng);
                }
            }
            Position::new(
                concept.id,
                point[0],
                point[1],
                point[2],
                concept.category.cluster_id(),
            )
        })
        .collect()
}

fn relaxed_positions<R: Rng + ?Sized>(
    store: &VectorStore,
    edges: &[Edge],
    options: &LayoutOptions,
    initial: Option<Vec<[f64; 2]>>,
    rng: &mut R,
) -> Vec<Position> {
    let nodes: Vec<u64> = store.ids().map(|id| id.as_u64()).collect();
    let weighted: Vec<(u64, u64, f64)> = edges
        .iter()
        .map(|e| (e.a.as_u64(), e.b.as_u64(), e.weight as f64))
        .collect();
    let graph = LayoutGraph::from_edges(&nodes, &weighted);

    let relaxed = force_layout(&graph, &options.force, initial, rng);

    store
        .concepts()
        .iter()
        .enumerate()
        .map(|(idx, concept)| {
            let [x, y] = relaxed[idx];
            let z = z_band(&concept.category) + jitter(options.z_jitter, rng);
            Position::new(
                concept.id,
                x * options.force_scale,
                y * options.force_scale,
                z,
                concept.category.cluster_id(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Concept, ConceptId, EdgeKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn store_with_categories(entries: &[(u64, &str)]) -> VectorStore {
        let concepts = entries
            .iter()
            .map(|&(id, cat)| {
                Concept::new(
                    ConceptId::new(id),
                    format!("c{id}"),
                    Some(Category::new(cat)),
                    vec![id as f32, 1.0],
                )
                .unwrap()
            })
            .collect();
        VectorStore::from_concepts(concepts).unwrap()
    }

    #[test]
    fn test_procedural_one_position_per_concept() {
        let store = store_with_categories(&[(1, "History"), (2, "Geography"), (3, "General")]);
        let options = LayoutOptions::default();
        let mut rng = StdRng::seed_from_u64(1);

        let positions = compute_positions(&store, &[], &options, &mut rng);
        assert_eq!(positions.len(), 3);
        assert!(positions.iter().all(Position::is_finite));
        assert_eq!(positions[0].cluster_id, "history");
    }

    #[test]
    fn test_procedural_positions_bounded_by_halo() {
        let store = store_with_categories(&[(1, "General")]);
        let options = LayoutOptions::default();
        let mut rng = StdRng::seed_from_u64(2);

        let positions = compute_positions(&store, &[], &options, &mut rng);
        assert!(positions[0].radius() <= options.galaxy.halo_radius + 1e-9);
    }

    #[test]
    fn test_category_center_biases_placement() {
        let entries: Vec<(u64, &str)> = (0..40).map(|i| (i, "History")).collect();
        let store = store_with_categories(&entries);

        let mut options = LayoutOptions::default();
        options
            .category_centers
            .insert("History".to_string(), [500.0, 0.0, 0.0]);
        options.center_jitter = 10.0;

        let mut rng = StdRng::seed_from_u64(3);
        let positions = compute_positions(&store, &[], &options, &mut rng);

        let mean_x: f64 = positions.iter().map(|p| p.x).sum::<f64>() / positions.len() as f64;
        assert!(mean_x > 300.0, "mean x {} not biased toward center", mean_x);
    }

    #[test]
    fn test_force_strategy_layers_z_by_category() {
        let store = store_with_categories(&[
            (1, "Science & Technology"),
            (2, "Arts & Culture"),
            (3, "History"),
        ]);
        let edge = Edge::between(ConceptId::new(1), ConceptId::new(2), 0.9, EdgeKind::Semantic)
            .unwrap();

        let options = LayoutOptions {
            strategy: LayoutStrategy::Force,
            force: ForceParams {
                iterations: 50,
                ..ForceParams::default()
            },
            ..LayoutOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(4);

        let positions = compute_positions(&store, &[edge], &options, &mut rng);
        assert_eq!(positions.len(), 3);

        // z stays within band +/- jitter
        assert!((positions[0].z - 20.0).abs() <= options.z_jitter);
        assert!((positions[1].z + 20.0).abs() <= options.z_jitter);
        assert!((positions[2].z - 0.0).abs() <= options.z_jitter);
    }

    #[test]
    fn test_hybrid_strategy_is_reproducible_under_fixed_seed() {
        let store = store_with_categories(&[(1, "History"), (2, "History"), (3, "Geography")]);
        let edge = Edge::between(ConceptId::new(1), ConceptId::new(2), 0.8, EdgeKind::Semantic)
            .unwrap();
        let options = LayoutOptions {
            strategy: LayoutStrategy::Hybrid,
            force: ForceParams {
                iterations: 30,
                ..ForceParams::default()
            },
            ..LayoutOptions::default()
        };

        let a = compute_positions(&store, std::slice::from_ref(&edge), &options, &mut StdRng::seed_from_u64(9));
        let b = compute_positions(&store, std::slice::from_ref(&edge), &options, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_store_yields_no_positions() {
        let store = VectorStore::from_concepts(vec![]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let positions =
            compute_positions(&store, &[], &LayoutOptions::default(), &mut rng);
        assert!(positions.is_empty());
    }
}
