use crate::math::{Point, Real, Vector};
use crate::shape::{Face, PolygonMesh};
use crate::utils::SortedPair;
use hashbrown::HashMap;

/// Thickens `mesh` into a shell of the given `thickness`.
///
/// Every vertex is duplicated and the copy is moved by `thickness` along the vertex normal,
/// i.e., the normalized sum of the unit normals of the faces sharing it. The displaced layer
/// keeps the original winding while the original faces are flipped, so both layers face away
/// from the shell. Each boundary edge (used by a single face) is closed by a quad joining
/// both layers.
///
/// Vertex `i` of the result is the vertex `i` of `mesh`, and vertex `i + n` is its displaced
/// copy, where `n` is the vertex count of `mesh`. A zero thickness returns a copy of `mesh`.
pub fn solidify(mesh: &PolygonMesh, thickness: Real) -> PolygonMesh {
    if thickness == 0.0 || mesh.is_empty() {
        return mesh.clone();
    }

    let vertices = mesh.vertices();
    let faces = mesh.faces();
    let num_vertices = vertices.len() as u32;

    let mut normals = vec![Vector::zeros(); vertices.len()];
    for (fid, face) in faces.iter().enumerate() {
        if let Some(normal) = mesh.face_normal(fid as u32) {
            for &vid in face.iter() {
                normals[vid as usize] += *normal;
            }
        }
    }

    let mut new_vertices: Vec<Point<Real>> = Vec::with_capacity(vertices.len() * 2);
    new_vertices.extend_from_slice(vertices);
    new_vertices.extend(
        vertices
            .iter()
            .zip(normals.iter())
            .map(|(pt, n)| pt + n.try_normalize(0.0).unwrap_or_else(Vector::zeros) * thickness),
    );

    // Number of faces sharing each undirected edge.
    let mut edge_use: HashMap<SortedPair<u32>, u32> = HashMap::new();
    for face in faces {
        for (a, b) in face_edges(face) {
            *edge_use.entry(SortedPair::new(a, b)).or_insert(0) += 1;
        }
    }

    let mut new_faces: Vec<Face> = Vec::with_capacity(faces.len() * 2);
    new_faces.extend(faces.iter().map(|face| face.iter().rev().copied().collect()));
    new_faces.extend(
        faces
            .iter()
            .map(|face| face.iter().map(|vid| vid + num_vertices).collect()),
    );

    // Rims are emitted in face order so the output doesn’t depend on the map’s iteration order.
    for face in faces {
        for (a, b) in face_edges(face) {
            if edge_use.get(&SortedPair::new(a, b)) == Some(&1) {
                new_faces.push(Face::from_slice(&[
                    a,
                    b,
                    b + num_vertices,
                    a + num_vertices,
                ]));
            }
        }
    }

    PolygonMesh::new_unchecked(new_vertices, new_faces)
}

/// The directed edges of `face`, in winding order.
fn face_edges(face: &Face) -> impl Iterator<Item = (u32, u32)> + '_ {
    face.iter()
        .zip(face.iter().cycle().skip(1))
        .map(|(a, b)| (*a, *b))
}
