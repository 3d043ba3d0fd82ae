use crate::bounding_volume::Aabb;
use crate::math::{HomogeneousMatrix, Point, Real, UnitVector, Vector, DEFAULT_EPSILON};
use smallvec::SmallVec;

/// The vertex indices of a single polygon, in winding order.
///
/// Triangles and quads are stored inline.
pub type Face = SmallVec<[u32; 4]>;

/// Indicated an inconsistency while building a polygon mesh.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum PolygonMeshError {
    /// A face must reference at least three vertices.
    #[error("the face {face} has only {len} vertices, at least 3 are needed.")]
    FaceTooSmall {
        /// The offending face.
        face: u32,
        /// Its number of vertices.
        len: usize,
    },
    /// A face references a vertex that doesn’t exist.
    #[error("the face {face} references the vertex {index} but the mesh only has {num_vertices} vertices.")]
    IndexOutOfBounds {
        /// The offending face.
        face: u32,
        /// The out-of-bounds vertex index.
        index: u32,
        /// The number of vertices of the mesh.
        num_vertices: usize,
    },
    /// A face references the same vertex twice.
    #[error("the face {face} references the vertex {index} more than once.")]
    DuplicateIndex {
        /// The offending face.
        face: u32,
        /// The repeated vertex index.
        index: u32,
    },
}

/// A polygon mesh: a vertex buffer and a list of faces with three or more vertices each.
///
/// Every face index is guaranteed to be in range of the vertex buffer and no face references
/// the same vertex twice. A mesh without faces is valid and is simply ignored by the overlap
/// queries.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PolygonMesh {
    vertices: Vec<Point<Real>>,
    faces: Vec<Face>,
}

impl PolygonMesh {
    /// Creates a new polygon mesh from a vertex buffer and its faces.
    pub fn new(vertices: Vec<Point<Real>>, faces: Vec<Face>) -> Result<Self, PolygonMeshError> {
        for (fid, face) in faces.iter().enumerate() {
            let fid = fid as u32;

            if face.len() < 3 {
                return Err(PolygonMeshError::FaceTooSmall {
                    face: fid,
                    len: face.len(),
                });
            }

            for (k, &index) in face.iter().enumerate() {
                if index as usize >= vertices.len() {
                    return Err(PolygonMeshError::IndexOutOfBounds {
                        face: fid,
                        index,
                        num_vertices: vertices.len(),
                    });
                }

                if face[..k].contains(&index) {
                    return Err(PolygonMeshError::DuplicateIndex { face: fid, index });
                }
            }
        }

        Ok(Self::new_unchecked(vertices, faces))
    }

    /// Creates a new polygon mesh made of triangles only.
    pub fn from_triangles(
        vertices: Vec<Point<Real>>,
        triangles: &[[u32; 3]],
    ) -> Result<Self, PolygonMeshError> {
        let faces = triangles.iter().map(|tri| Face::from_slice(tri)).collect();
        Self::new(vertices, faces)
    }

    /// Builds a mesh whose invariants are already known to hold.
    pub(crate) fn new_unchecked(vertices: Vec<Point<Real>>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// An axis-aligned box centered at the origin, made of 8 vertices and 6 quads with
    /// outward-facing counter-clockwise winding.
    pub fn cuboid(half_extents: Vector<Real>) -> Self {
        let aabb = Aabb::from_half_extents(Point::origin(), half_extents);
        // Corner `i` takes its x, y, z from `maxs` when bit 0, 1, 2 is set.
        let faces = [
            [0u32, 4, 6, 2], // -X
            [1, 3, 7, 5],    // +X
            [0, 1, 5, 4],    // -Y
            [2, 6, 7, 3],    // +Y
            [0, 2, 3, 1],    // -Z
            [4, 5, 7, 6],    // +Z
        ];

        Self::new_unchecked(
            aabb.vertices().to_vec(),
            faces.iter().map(|f| Face::from_slice(f)).collect(),
        )
    }

    /// The vertex buffer of this mesh.
    #[inline]
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices[..]
    }

    /// The faces of this mesh.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces[..]
    }

    /// Does this mesh have no face?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Consumes `self` and returns its vertex and face buffers.
    pub fn into_parts(self) -> (Vec<Point<Real>>, Vec<Face>) {
        (self.vertices, self.faces)
    }

    /// The vertices of the face `fid`, in winding order.
    ///
    /// Panics if `fid` is out of bounds.
    #[inline]
    pub fn face_vertices(&self, fid: u32) -> impl ExactSizeIterator<Item = &Point<Real>> + '_ {
        self.faces[fid as usize]
            .iter()
            .map(move |&vid| &self.vertices[vid as usize])
    }

    /// The AABB of the face `fid`.
    pub fn face_aabb(&self, fid: u32) -> Aabb {
        Aabb::from_points_ref(self.face_vertices(fid))
    }

    /// The AABB of all the vertices of this mesh.
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_points_ref(&self.vertices)
    }

    /// The unit normal of the face `fid`, computed with Newell’s method so it is also
    /// meaningful for non-planar polygons.
    ///
    /// Returns `None` if the face is degenerate (zero area).
    pub fn face_normal(&self, fid: u32) -> Option<UnitVector<Real>> {
        UnitVector::try_new(self.face_area_vector(fid), DEFAULT_EPSILON)
    }

    /// The area-weighted normal of the face `fid`: its norm is twice the face area.
    pub(crate) fn face_area_vector(&self, fid: u32) -> Vector<Real> {
        let face = &self.faces[fid as usize];
        let mut normal = Vector::zeros();

        for (k, &vid) in face.iter().enumerate() {
            let curr = &self.vertices[vid as usize];
            let next = &self.vertices[face[(k + 1) % face.len()] as usize];
            normal += curr.coords.cross(&next.coords);
        }

        normal
    }

    /// Applies the homogeneous transform `m` to every vertex of this mesh.
    pub fn transform_vertices(&mut self, m: &HomogeneousMatrix<Real>) {
        self.vertices
            .iter_mut()
            .for_each(|pt| *pt = m.transform_point(pt));
    }

    /// Returns this mesh with `m` applied to every vertex.
    #[must_use]
    pub fn transformed(mut self, m: &HomogeneousMatrix<Real>) -> Self {
        self.transform_vertices(m);
        self
    }
}
