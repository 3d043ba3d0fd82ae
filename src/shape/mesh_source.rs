use crate::math::{HomogeneousMatrix, Point, Real, Vector};
use crate::shape::{Face, PolygonMesh};

/// A mesh object provided by the host scene.
///
/// The geometry is given in object space, as stored by the host, together with the
/// object-to-world transform. It is validated when preprocessed, so implementors can
/// expose their raw buffers directly.
pub trait MeshSource {
    /// A stable name identifying this object in the host scene.
    fn name(&self) -> &str;

    /// The object-space vertex buffer.
    fn vertices(&self) -> &[Point<Real>];

    /// The faces, each indexing into [`Self::vertices`].
    fn faces(&self) -> &[Face];

    /// The object-to-world transform.
    fn world_transform(&self) -> HomogeneousMatrix<Real>;
}

/// A named mesh with its world transform, owned by the caller.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MeshObject {
    name: String,
    mesh: PolygonMesh,
    world_transform: HomogeneousMatrix<Real>,
}

impl MeshObject {
    /// A mesh object placed at the world origin.
    pub fn new(name: impl Into<String>, mesh: PolygonMesh) -> Self {
        Self {
            name: name.into(),
            mesh,
            world_transform: HomogeneousMatrix::identity(),
        }
    }

    /// Sets the object-to-world transform of this object.
    #[must_use]
    pub fn with_transform(mut self, world_transform: HomogeneousMatrix<Real>) -> Self {
        self.world_transform = world_transform;
        self
    }

    /// Sets the object-to-world transform of this object to a pure translation.
    #[must_use]
    pub fn with_translation(self, translation: Vector<Real>) -> Self {
        self.with_transform(HomogeneousMatrix::new_translation(&translation))
    }

    /// The object-space mesh.
    pub fn mesh(&self) -> &PolygonMesh {
        &self.mesh
    }
}

impl MeshSource for MeshObject {
    fn name(&self) -> &str {
        &self.name
    }

    fn vertices(&self) -> &[Point<Real>] {
        self.mesh.vertices()
    }

    fn faces(&self) -> &[Face] {
        self.mesh.faces()
    }

    fn world_transform(&self) -> HomogeneousMatrix<Real> {
        self.world_transform
    }
}

impl<T: MeshSource + ?Sized> MeshSource for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn vertices(&self) -> &[Point<Real>] {
        (**self).vertices()
    }

    fn faces(&self) -> &[Face] {
        (**self).faces()
    }

    fn world_transform(&self) -> HomogeneousMatrix<Real> {
        (**self).world_transform()
    }
}
