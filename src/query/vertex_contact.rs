use crate::math::{Point, Real};
use crate::shape::PolygonMesh;
use crate::utils::midpoint;

/// The closest pair of vertices found among a set of candidate faces.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct VertexPairContact {
    /// Midpoint of the two vertices: the contact location.
    pub point: Point<Real>,
    /// Distance between the two vertices.
    pub dist: Real,
    /// Index of the vertex from the first mesh.
    pub vertex1: u32,
    /// Index of the vertex from the second mesh.
    pub vertex2: u32,
}

impl VertexPairContact {
    fn new(mesh1: &PolygonMesh, mesh2: &PolygonMesh, vertex1: u32, vertex2: u32) -> Self {
        let pt1 = &mesh1.vertices()[vertex1 as usize];
        let pt2 = &mesh2.vertices()[vertex2 as usize];
        Self {
            point: midpoint(pt1, pt2),
            dist: na::distance(pt1, pt2),
            vertex1,
            vertex2,
        }
    }
}

/// Finds the closest pair of vertices, one from each mesh, among the vertices of the
/// candidate faces.
///
/// Each candidate `(f1, f2)` pairs the face `f1` of `mesh1` with the face `f2` of `mesh2`.
/// Every vertex of `f1` is tested against every vertex of `f2`. Only mesh vertices are
/// considered: this doesn’t compute the closest points on the face surfaces.
///
/// The search starts from the first vertices of the first candidate faces and only replaces
/// the current best pair by a strictly closer one, so ties are won by the pair found first in
/// candidate order, then in face-vertex order.
///
/// Returns `None` if `candidates` is empty. Panics if a candidate face index is out of bounds.
pub fn closest_vertex_pair(
    candidates: &[(u32, u32)],
    mesh1: &PolygonMesh,
    mesh2: &PolygonMesh,
) -> Option<VertexPairContact> {
    let (seed1, seed2) = candidates.first()?;
    let mut best = VertexPairContact::new(
        mesh1,
        mesh2,
        mesh1.faces()[*seed1 as usize][0],
        mesh2.faces()[*seed2 as usize][0],
    );

    for (f1, f2) in candidates {
        let face2 = &mesh2.faces()[*f2 as usize];

        for &vid1 in mesh1.faces()[*f1 as usize].iter() {
            let pt1 = &mesh1.vertices()[vid1 as usize];

            for &vid2 in face2.iter() {
                let dist = na::distance(pt1, &mesh2.vertices()[vid2 as usize]);
                if dist < best.dist {
                    best = VertexPairContact::new(mesh1, mesh2, vid1, vid2);
                }
            }
        }
    }

    Some(best)
}

/// The contact location of two meshes: the midpoint of [`closest_vertex_pair`].
///
/// Returns `None` if `candidates` is empty.
pub fn resolve_contact(
    candidates: &[(u32, u32)],
    mesh1: &PolygonMesh,
    mesh2: &PolygonMesh,
) -> Option<Point<Real>> {
    closest_vertex_pair(candidates, mesh1, mesh2).map(|contact| contact.point)
}
