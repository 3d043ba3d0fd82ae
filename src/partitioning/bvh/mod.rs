pub use bvh_traverse_bvtt::LeafPairs;
pub use bvh_tree::{Bvh, BvhNode, BvhNodeIndex, BvhNodeWide};

mod bvh_binned_build;
mod bvh_traverse_bvtt;
mod bvh_tree;
mod bvh_validation;
