//! Spatial partitioning tools.

pub use self::bvh::{Bvh, BvhNode, BvhNodeIndex, BvhNodeWide, LeafPairs};
pub use self::mesh_index::{build_index, SpatialIndex};

mod bvh;
mod mesh_index;
