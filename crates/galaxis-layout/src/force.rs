//! Force-directed 2D relaxation
//!
//! ForceAtlas2-style iteration: degree-weighted repulsion between all node
//! pairs, linear attraction along edges scaled by edge weight, and a global
//! gravity term pulling toward the origin. Above `barnes_hut_cutoff` nodes
//! the repulsion pass goes through the quadtree instead of all pairs.
//!
//! The simulation is strictly 2D; z-banding happens downstream. Given a
//! seeded RNG and the fixed dense-index iteration order the run is
//! reproducible.

use crate::common::LayoutGraph;
use crate::quadtree::QuadTree;
use rand::Rng;
use rayon::prelude::*;

/// Tuning knobs for the relaxation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForceParams {
    /// Fixed iteration budget
    pub iterations: usize,
    /// Repulsion constant (scaling ratio)
    pub repulsion: f64,
    /// Gravity constant
    pub gravity: f64,
    /// Exponent applied to edge weights in the attraction term
    pub edge_weight_influence: f64,
    /// Higher tolerance lets nodes swing more per step
    pub jitter_tolerance: f64,
    /// Barnes-Hut accuracy parameter
    pub theta: f64,
    /// Node count above which repulsion uses the quadtree
    pub barnes_hut_cutoff: usize,
    /// Half-extent of the random initial placement square
    pub init_extent: f64,
}

impl Default for ForceParams {
    fn default() -> Self {
        Self {
            iterations: 600,
            repulsion: 2.0,
            gravity: 1.0,
            edge_weight_influence: 1.0,
            jitter_tolerance: 1.0,
            theta: 1.2,
            barnes_hut_cutoff: 2000,
            init_extent: 100.0,
        }
    }
}

const MIN_DIST_SQ: f64 = 1e-9;

/// Relax the graph into 2D.
///
/// `initial` overrides the random starting placement (used by the hybrid
/// strategy, which starts from the procedural layout); its length must match
/// the graph's node count. Positions are returned in dense-index order.
pub fn force_layout<R: Rng + ?Sized>(
    graph: &LayoutGraph,
    params: &ForceParams,
    initial: Option<Vec<[f64; 2]>>,
    rng: &mut R,
) -> Vec<[f64; 2]> {
    let n = graph.node_count;
    if n == 0 {
        return Vec::new();
    }

    let mut positions: Vec<[f64; 2]> = match initial {
        Some(init) => {
            assert_eq!(init.len(), n, "initial placement length mismatch");
            init
        }
        None => (0..n)
            .map(|_| {
                [
                    rng.gen_range(-params.init_extent..params.init_extent),
                    rng.gen_range(-params.init_extent..params.init_extent),
                ]
            })
            .collect(),
    };

    let masses: Vec<f64> = (0..n).map(|i| graph.degree(i) as f64 + 1.0).collect();
    let mut prev_forces = vec![[0.0f64; 2]; n];
    let mut speed = 1.0f64;

    for _ in 0..params.iterations {
        let tree = if n > params.barnes_hut_cutoff {
            Some(QuadTree::build(&positions, &masses))
        } else {
            None
        };

        let forces: Vec<[f64; 2]> = (0..n)
            .into_par_iter()
            .map(|i| {
                let [x, y] = positions[i];
                let mut fx = 0.0;
                let mut fy = 0.0;

                // Repulsion
                match &tree {
                    Some(tree) => {
                        let f = tree.repulsion(x, y, params.theta);
                        fx += params.repulsion * masses[i] * f[0];
                        fy += params.repulsion * masses[i] * f[1];
                    }
                    None => {
                        for j in 0..n {
                            if i == j {
                                continue;
                            }
                            let dx = x - positions[j][0];
                            let dy = y - positions[j][1];
                            let d_sq = (dx * dx + dy * dy).max(MIN_DIST_SQ);
                            let f = params.repulsion * masses[i] * masses[j] / d_sq;
                            fx += f * dx;
                            fy += f * dy;
                        }
                    }
                }

                // Attraction along edges (each undirected edge appears in
                // both endpoints' rows, so the pull is symmetric)
                for (j, weight) in graph.neighbors_of(i) {
                    let dx = positions[j][0] - x;
                    let dy = positions[j][1] - y;
                    let w = if params.edge_weight_influence == 1.0 {
                        weight
                    } else {
                        weight.powf(params.edge_weight_influence)
                    };
                    fx += w * dx;
                    fy += w * dy;
                }

                // Gravity toward origin
                let d = (x * x + y * y).sqrt();
                if d > 1e-9 {
                    let f = params.gravity * masses[i] / d;
                    fx -= f * x;
                    fy -= f * y;
                }

                [fx, fy]
            })
            .collect();

        // Adaptive global speed: nodes that keep reversing direction
        // (swinging) slow the whole system down
        let mut total_swinging = 0.0;
        let mut total_traction = 0.0;
        for i in 0..n {
            let sdx = forces[i][0] - prev_forces[i][0];
            let sdy = forces[i][1] - prev_forces[i][1];
            let tdx = forces[i][0] + prev_forces[i][0];
            let tdy = forces[i][1] + prev_forces[i][1];
            total_swinging += masses[i] * (sdx * sdx + sdy * sdy).sqrt();
            total_traction += masses[i] * 0.5 * (tdx * tdx + tdy * tdy).sqrt();
        }

        if total_swinging > 1e-12 {
            let target =
                params.jitter_tolerance * params.jitter_tolerance * total_traction / total_swinging;
            speed += (target - speed).min(0.5 * speed);
        }

        for i in 0..n {
            let sdx = forces[i][0] - prev_forces[i][0];
            let sdy = forces[i][1] - prev_forces[i][1];
            let swinging = masses[i] * (sdx * sdx + sdy * sdy).sqrt();
            let factor = speed / (1.0 + (speed * swinging).sqrt());

            positions[i][0] += forces[i][0] * factor;
            positions[i][1] += forces[i][1] * factor;

            debug_assert!(positions[i][0].is_finite() && positions[i][1].is_finite());
        }

        prev_forces = forces;
    }

    positions
}
