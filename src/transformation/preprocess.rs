use crate::math::{Point, Real};
use crate::shape::{MeshSource, PolygonMesh, PolygonMeshError};
use crate::transformation::{solidify, subdivide};

/// Error raised while preparing a raw mesh for indexing.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum PreprocessError {
    /// The faces of the raw mesh are invalid.
    #[error("invalid source mesh: {0}")]
    InvalidMesh(#[from] PolygonMeshError),
    /// The world transform contains NaN or infinite entries.
    #[error("the world transform contains non-finite values.")]
    NonFiniteTransform,
    /// A vertex has a NaN or infinite coordinate once brought into world space.
    #[error("the vertex {index} has non-finite coordinates.")]
    NonFiniteVertex {
        /// Index of the first offending vertex.
        index: usize,
    },
}

/// Brings the mesh of `source` into world space and applies the optional modifiers.
///
/// The world transform is applied first so that the shell thickness and the subdivided edge
/// lengths are expressed in world units. Then, in this order:
/// - if `shell_offset` is `Some(t)` with `t != 0`, the mesh is thickened with [`solidify`];
/// - if `subdivision_level > 0`, every edge is cut `subdivision_level` times with [`subdivide`].
///
/// The source is never modified. A source without any face yields an empty mesh. Vertices
/// with NaN or infinite coordinates are rejected.
pub fn preprocess<S: MeshSource + ?Sized>(
    source: &S,
    shell_offset: Option<Real>,
    subdivision_level: u32,
) -> Result<PolygonMesh, PreprocessError> {
    let transform = source.world_transform();
    if transform.iter().any(|e| !e.is_finite()) {
        return Err(PreprocessError::NonFiniteTransform);
    }

    let mut mesh = PolygonMesh::new(source.vertices().to_vec(), source.faces().to_vec())?;
    mesh.transform_vertices(&transform);

    let is_finite = |pt: &Point<Real>| pt.iter().all(|e| e.is_finite());
    if let Some(index) = mesh.vertices().iter().position(|pt| !is_finite(pt)) {
        return Err(PreprocessError::NonFiniteVertex { index });
    }

    if let Some(thickness) = shell_offset.filter(|t| *t != 0.0) {
        mesh = solidify(&mesh, thickness);
    }

    if subdivision_level > 0 {
        mesh = subdivide(&mesh, subdivision_level);
    }

    Ok(mesh)
}
