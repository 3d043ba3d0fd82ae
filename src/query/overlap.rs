use crate::partitioning::SpatialIndex;

/// Lists the pairs `(face of index1, face of index2)` whose bounding boxes intersect.
///
/// Boxes touching along a face, an edge, or a corner are considered intersecting. No true
/// overlap is missed, but some reported pairs may not actually touch since boxes over-approximate
/// their faces. The order follows a depth-first traversal of both trees: it is stable for a given
/// pair of indices, but callers shouldn’t rely on it otherwise.
///
/// Returns an empty list if either index is empty.
pub fn overlap(index1: &SpatialIndex, index2: &SpatialIndex) -> Vec<(u32, u32)> {
    index1.intersecting_faces(index2).collect()
}

#[cfg(test)]
mod test {
    use super::overlap;
    use crate::bounding_volume::BoundingVolume;
    use crate::math::{HomogeneousMatrix, Vector};
    use crate::partitioning::SpatialIndex;
    use crate::shape::PolygonMesh;

    fn unit_cube(x: crate::math::Real) -> PolygonMesh {
        PolygonMesh::cuboid(Vector::repeat(0.5))
            .transformed(&HomogeneousMatrix::new_translation(&Vector::new(x + 0.5, 0.5, 0.5)))
    }

    #[test]
    fn overlap_matches_face_boxes() {
        let (mesh1, mesh2) = (unit_cube(0.0), unit_cube(0.5));
        let pairs = overlap(&SpatialIndex::new(&mesh1), &SpatialIndex::new(&mesh2));

        let mut expected = vec![];
        for f1 in 0..6 {
            for f2 in 0..6 {
                if mesh1.face_aabb(f1).intersects(&mesh2.face_aabb(f2)) {
                    expected.push((f1, f2));
                }
            }
        }

        let mut sorted = pairs.clone();
        sorted.sort();
        assert_eq!(sorted, expected);
        assert!(!pairs.is_empty());
    }

    #[test]
    fn touching_cubes_overlap() {
        let pairs = overlap(
            &SpatialIndex::new(&unit_cube(0.0)),
            &SpatialIndex::new(&unit_cube(1.0)),
        );
        // The +X side of the first cube lies on the -X side of the second one.
        assert!(pairs.contains(&(1, 0)));
    }

    #[test]
    fn disjoint_or_empty_indices_do_not_overlap() {
        let index = SpatialIndex::new(&unit_cube(0.0));
        let far = SpatialIndex::new(&unit_cube(2.0));
        let empty = SpatialIndex::new(&PolygonMesh::default());

        assert!(overlap(&index, &far).is_empty());
        assert!(overlap(&index, &empty).is_empty());
        assert!(overlap(&empty, &index).is_empty());
        assert!(overlap(&empty, &empty).is_empty());
    }
}
