//! Mesh representations consumed by the overlap pipeline.

pub use self::mesh_source::{MeshObject, MeshSource};
pub use self::polygon_mesh::{Face, PolygonMesh, PolygonMeshError};

mod mesh_source;
mod polygon_mesh;
