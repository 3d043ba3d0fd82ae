use super::bvh_tree::{BvhNodeIndex, BvhNodeWide};
use super::{Bvh, BvhNode};
use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::Real;

const NUM_BINS: usize = 8;
const BIN_EPSILON: Real = 1.0e-5;

impl Bvh {
    /// Fills the wide node `wide_id` with a subtree over `leaves`, which must hold at
    /// least two leaves.
    ///
    /// Leaves are split recursively along the plane with the lowest surface-area-heuristic
    /// cost, following "On fast Construction of SAH-based Bounding Volume Hierarchies", Ingo Wald.
    pub(super) fn build_binned(&mut self, wide_id: u32, leaves: &mut [BvhNode]) {
        debug_assert!(leaves.len() > 1);

        let split = sah_partition(leaves);
        let (left, right) = leaves.split_at_mut(split);
        let left = self.build_child(BvhNodeIndex::left(wide_id), left);
        let right = self.build_child(BvhNodeIndex::right(wide_id), right);
        self.nodes[wide_id as usize] = BvhNodeWide { left, right };
    }

    /// Builds the node stored at `slot`, recording where leaves end up.
    fn build_child(&mut self, slot: BvhNodeIndex, leaves: &mut [BvhNode]) -> BvhNode {
        if let [leaf] = &*leaves {
            self.leaf_node_indices[leaf.children as usize] = slot;
            return *leaf;
        }

        let wide_id = self.nodes.len() as u32;
        self.nodes.push(BvhNodeWide::placeholder());
        self.build_binned(wide_id, leaves);
        self.nodes[wide_id as usize].merged(wide_id)
    }
}

/// Moves the leaves on the cheap side of the best binned split to the front of `leaves`
/// and returns how many there are. Neither side is ever empty.
fn sah_partition(leaves: &mut [BvhNode]) -> usize {
    let centroids = Aabb::from_points(leaves.iter().map(BvhNode::center));
    let axis = centroids.extents().imax();
    let origin = centroids.mins[axis];
    let scale = NUM_BINS as Real * (1.0 - BIN_EPSILON) / centroids.extents()[axis];

    // Coinciding centroids give NaN bin coordinates, which saturate to bin 0.
    let bin_of = |node: &BvhNode| {
        let coord = scale * (node.center()[axis] - origin);
        (coord as usize).min(NUM_BINS - 1)
    };

    let mut bins = [Bin::default(); NUM_BINS];
    for leaf in leaves.iter() {
        bins[bin_of(leaf)].add_leaf(leaf);
    }

    // above[i] gathers the bins i, i + 1, ..
    let mut above = bins;
    for i in (1..NUM_BINS - 1).rev() {
        let next = above[i + 1];
        above[i].absorb(&next);
    }

    let mut below = Bin::default();
    let mut best_cost = Real::MAX;
    let mut best_plane = 0;
    for plane in 0..NUM_BINS - 1 {
        below.absorb(&bins[plane]);
        let cost = below.cost() + above[plane + 1].cost();
        if cost < best_cost {
            best_cost = cost;
            best_plane = plane;
        }
    }

    let mut split = 0;
    for i in 0..leaves.len() {
        if bin_of(&leaves[i]) <= best_plane {
            leaves.swap(i, split);
            split += 1;
        }
    }

    if split == 0 || split == leaves.len() {
        // Every centroid fell into the same bin.
        leaves.len() / 2
    } else {
        split
    }
}

#[derive(Copy, Clone, Debug)]
struct Bin {
    aabb: Aabb,
    leaf_count: u32,
}

impl Default for Bin {
    fn default() -> Self {
        Self {
            aabb: Aabb::new_invalid(),
            leaf_count: 0,
        }
    }
}

impl Bin {
    fn add_leaf(&mut self, leaf: &BvhNode) {
        self.aabb.merge(&leaf.aabb());
        self.leaf_count += 1;
    }

    fn absorb(&mut self, other: &Bin) {
        self.aabb.merge(&other.aabb);
        self.leaf_count += other.leaf_count;
    }

    fn cost(&self) -> Real {
        if self.leaf_count == 0 {
            0.0
        } else {
            self.aabb.volume() * self.leaf_count as Real
        }
    }
}
