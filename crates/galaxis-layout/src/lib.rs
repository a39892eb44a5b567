pub mod common;
pub mod force;
pub mod procedural;
pub mod quadtree;

pub use common::{LayoutGraph, NodeId};
pub use force::{force_layout, ForceParams};
pub use procedural::{galaxy_point, galaxy_positions, GalaxyParams};
pub use quadtree::QuadTree;
