use crate::partitioning::bvh::bvh_tree::BvhNodeIndex;
use crate::partitioning::Bvh;
use hashbrown::HashSet;

impl Bvh {
    /// Counts the leaves reachable by walking down from the wide node `id`.
    ///
    /// This is mostly a utility for debugging.
    pub fn reachable_leaf_count(&self, id: u32) -> u32 {
        let Some(wide) = self.nodes.get(id as usize) else {
            return 0;
        };

        wide.children()
            .into_iter()
            .map(|child| match child.leaf_count() {
                0 | 1 => child.leaf_count(),
                _ => self.reachable_leaf_count(child.children),
            })
            .sum()
    }

    /// Panics if the tree isn’t well-formed.
    ///
    /// The tree is well-formed when every wide node is reached exactly once, every leaf is
    /// recorded at the place it sits, parents bound their children and leaf counts add up.
    pub fn assert_well_formed(&self) {
        let Some(root) = self.nodes.first() else {
            return;
        };

        if root.right.leaf_count() == 0 {
            assert!(root.left.is_leaf());
            assert_eq!(self.nodes.len(), 1);
            assert_eq!(
                self.leaf_node_indices[root.left.children as usize],
                BvhNodeIndex::left(0)
            );
            return;
        }

        let mut visited = HashSet::new();
        let leaf_count = self.assert_well_formed_recurse(0, &mut visited);
        assert_eq!(leaf_count, self.leaf_count());
        assert_eq!(visited.len(), self.nodes.len());
    }

    fn assert_well_formed_recurse(&self, wide_id: u32, visited: &mut HashSet<u32>) -> u32 {
        assert!(visited.insert(wide_id), "Detected loop. Node {wide_id} visited twice.");

        let children = self.nodes[wide_id as usize].children();
        let mut total = 0;

        for (child, is_right) in children.into_iter().zip([false, true]) {
            let slot = BvhNodeIndex::new(wide_id, is_right);
            total += if child.is_leaf() {
                assert_eq!(self.leaf_node_indices[child.children as usize], slot);
                1
            } else {
                let grandchildren = &self.nodes[child.children as usize];
                assert!(child.contains(&grandchildren.left));
                assert!(child.contains(&grandchildren.right));
                assert_eq!(child.leaf_count(), grandchildren.leaf_count());

                let reached = self.assert_well_formed_recurse(child.children, visited);
                assert_eq!(child.leaf_count(), reached);
                reached
            };
        }

        total
    }
}
