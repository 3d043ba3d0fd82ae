use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Point, Real};
use core::ops::Index;

/// Two sibling nodes of the tree, stored side by side.
///
/// Every wide node holds two valid children, except the root of a tree with a single leaf:
/// there only `left` is set and `right` has a leaf count of zero.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct BvhNodeWide {
    pub(super) left: BvhNode,
    pub(super) right: BvhNode,
}

impl BvhNodeWide {
    #[inline(always)]
    pub(super) fn placeholder() -> Self {
        Self {
            left: BvhNode::placeholder(),
            right: BvhNode::placeholder(),
        }
    }

    /// The left and right children, in that order.
    #[inline(always)]
    pub fn children(&self) -> [&BvhNode; 2] {
        [&self.left, &self.right]
    }

    /// The node bounding both children, pointing back at this wide node through `my_id`.
    pub fn merged(&self, my_id: u32) -> BvhNode {
        BvhNode {
            mins: self.left.mins.inf(&self.right.mins),
            children: my_id,
            maxs: self.left.maxs.sup(&self.right.maxs),
            leaf_count: self.leaf_count(),
        }
    }

    /// The number of leaves below both children.
    pub fn leaf_count(&self) -> u32 {
        self.left.leaf_count + self.right.leaf_count
    }
}

/// A leaf or internal node of a [`Bvh`].
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct BvhNode {
    pub(super) mins: Point<Real>,
    /// The face index for a leaf, the index of the [`BvhNodeWide`] holding the two
    /// children otherwise.
    pub(super) children: u32,
    pub(super) maxs: Point<Real>,
    pub(super) leaf_count: u32,
}

impl BvhNode {
    #[inline(always)]
    fn placeholder() -> Self {
        Self {
            mins: Point::origin(),
            children: 0,
            maxs: Point::origin(),
            leaf_count: 0,
        }
    }

    /// A leaf bounded by `aabb` and carrying `leaf_data`.
    #[inline(always)]
    pub fn leaf(aabb: Aabb, leaf_data: u32) -> BvhNode {
        Self {
            mins: aabb.mins,
            children: leaf_data,
            maxs: aabb.maxs,
            leaf_count: 1,
        }
    }

    /// The index this leaf was built with, or `None` for internal nodes.
    #[inline(always)]
    pub fn leaf_data(&self) -> Option<u32> {
        self.is_leaf().then_some(self.children)
    }

    /// Is this node a leaf?
    #[inline(always)]
    pub fn is_leaf(&self) -> bool {
        self.leaf_count == 1
    }

    /// The number of leaves below this node, one for a leaf.
    #[inline(always)]
    pub fn leaf_count(&self) -> u32 {
        self.leaf_count
    }

    /// The box bounding this node.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.mins, self.maxs)
    }

    /// The center of [`Self::aabb`].
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// Inclusive overlap test: boxes sharing only a face, edge or corner intersect.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.aabb().intersects(&other.aabb())
    }

    /// Does the box of `self` enclose the box of `other`?
    #[inline]
    pub fn contains(&self, other: &Self) -> bool {
        self.aabb().contains(&other.aabb())
    }
}

/// Location of a node: the index of its [`BvhNodeWide`] and the side it sits on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BvhNodeIndex(pub usize);

impl BvhNodeIndex {
    /// The left child of the `id`-th wide node.
    #[inline]
    pub fn left(id: u32) -> Self {
        Self::new(id, false)
    }

    /// The right child of the `id`-th wide node.
    #[inline]
    pub fn right(id: u32) -> Self {
        Self::new(id, true)
    }

    /// The left (`is_right = false`) or right child of the `id`-th wide node.
    #[inline]
    pub fn new(id: u32, is_right: bool) -> Self {
        Self(((id as usize) << 1) | is_right as usize)
    }

    #[inline]
    fn wide_id(self) -> usize {
        self.0 >> 1
    }

    #[inline]
    fn is_right(self) -> bool {
        self.0 & 1 == 1
    }
}

/// A Bounding Volume Hierarchy over indexed AABBs, built once with a binned
/// surface-area heuristic and never modified afterwards.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Bvh {
    pub(super) nodes: Vec<BvhNodeWide>,
    // Where each leaf ended up, indexed by its leaf data.
    pub(super) leaf_node_indices: Vec<BvhNodeIndex>,
}

impl Index<BvhNodeIndex> for Bvh {
    type Output = BvhNode;

    #[inline(always)]
    fn index(&self, index: BvhNodeIndex) -> &BvhNode {
        let wide = &self.nodes[index.wide_id()];
        if index.is_right() {
            &wide.right
        } else {
            &wide.left
        }
    }
}

impl Bvh {
    /// A tree without leaves.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree where leaf `i` is bounded by `leaves[i]`.
    pub fn from_leaves(leaves: &[Aabb]) -> Self {
        Self::from_iter(leaves.iter().copied().enumerate())
    }

    /// Builds a tree out of `(leaf data, aabb)` pairs.
    ///
    /// The leaf data should be unique and dense: leaf locations are kept in a vector
    /// indexed by it.
    pub fn from_iter<It>(leaves: It) -> Self
    where
        It: IntoIterator<Item = (usize, Aabb)>,
    {
        let mut result = Self::new();
        let mut leaf_nodes: Vec<_> = leaves
            .into_iter()
            .map(|(id, aabb)| BvhNode::leaf(aabb, id as u32))
            .collect();

        let max_id = leaf_nodes.iter().map(|leaf| leaf.children as usize + 1).max();
        result.leaf_node_indices.resize(max_id.unwrap_or(0), BvhNodeIndex::default());

        match leaf_nodes.as_slice() {
            [] => {}
            [single] => {
                result.nodes.push(BvhNodeWide {
                    left: *single,
                    right: BvhNode::placeholder(),
                });
                result.leaf_node_indices[single.children as usize] = BvhNodeIndex::left(0);
            }
            _ => {
                result.nodes.reserve(leaf_nodes.len() - 1);
                result.nodes.push(BvhNodeWide::placeholder());
                result.build_binned(0, &mut leaf_nodes);
            }
        }

        result
    }

    /// The AABB enclosing every leaf. Invalid for an empty tree.
    pub fn root_aabb(&self) -> Aabb {
        match self.nodes.first() {
            None => Aabb::new_invalid(),
            Some(root) if root.right.leaf_count == 0 => root.left.aabb(),
            Some(root) => root.merged(0).aabb(),
        }
    }

    /// Does this tree have no leaf?
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The leaf built with `leaf_data`, if any.
    pub fn leaf_node(&self, leaf_data: u32) -> Option<&BvhNode> {
        if self.is_empty() {
            return None;
        }

        let node = &self[*self.leaf_node_indices.get(leaf_data as usize)?];
        (node.leaf_data() == Some(leaf_data)).then_some(node)
    }

    /// Number of levels below the wide node `node_id`, counting leaves as one level.
    ///
    /// `subtree_depth(0)` is the depth of the whole tree.
    pub fn subtree_depth(&self, node_id: u32) -> u32 {
        let Some(wide) = self.nodes.get(node_id as usize) else {
            return 0;
        };

        let child_depth = |child: &BvhNode| match child.leaf_count {
            0 => 0,
            1 => 1,
            _ => self.subtree_depth(child.children),
        };

        1 + child_depth(&wide.left).max(child_depth(&wide.right))
    }

    /// The number of leaves of this tree.
    pub fn leaf_count(&self) -> u32 {
        self.nodes.first().map_or(0, BvhNodeWide::leaf_count)
    }
}
