use crate::bounding_volume::Aabb;
use crate::partitioning::{Bvh, BvhNode, LeafPairs};
use crate::shape::PolygonMesh;

/// A bounding-volume hierarchy over the faces of a [`PolygonMesh`].
///
/// Leaf `i` of the tree bounds the face `i` of the mesh it was built from. The index doesn’t
/// keep a reference to that mesh: callers pair them up again when resolving contacts.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SpatialIndex {
    bvh: Bvh,
}

impl SpatialIndex {
    /// Builds the index of `mesh`.
    ///
    /// A mesh without faces yields an empty index.
    pub fn new(mesh: &PolygonMesh) -> Self {
        let leaves = (0..mesh.faces().len()).map(|fid| (fid, mesh.face_aabb(fid as u32)));
        Self {
            bvh: Bvh::from_iter(leaves),
        }
    }

    /// The underlying tree.
    #[inline]
    pub fn bvh(&self) -> &Bvh {
        &self.bvh
    }

    /// Does this index contain no face?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bvh.is_empty()
    }

    /// The number of indexed faces.
    #[inline]
    pub fn face_count(&self) -> u32 {
        self.bvh.leaf_count()
    }

    /// The AABB of all the indexed faces.
    pub fn root_aabb(&self) -> Aabb {
        self.bvh.root_aabb()
    }

    /// Iterates through the pairs `(face of self, face of other)` whose AABBs intersect.
    pub fn intersecting_faces<'a>(
        &'a self,
        other: &'a SpatialIndex,
    ) -> LeafPairs<'a, impl Fn(&BvhNode, &BvhNode) -> bool> {
        self.bvh.leaf_pairs(&other.bvh, |a, b| a.intersects(b))
    }
}

/// Builds the spatial index of `mesh`.
pub fn build_index(mesh: &PolygonMesh) -> SpatialIndex {
    SpatialIndex::new(mesh)
}
