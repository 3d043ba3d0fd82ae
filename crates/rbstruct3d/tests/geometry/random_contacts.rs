use na::{Point3, Vector3};
use oorandom::Rand32;
use rbstruct3d::bounding_volume::BoundingVolume;
use rbstruct3d::partitioning::SpatialIndex;
use rbstruct3d::query::{closest_vertex_pair, overlap, resolve_contact};
use rbstruct3d::shape::PolygonMesh;

/// A soup of small random triangles scattered in `[center - 1, center + 1]³`.
fn triangle_soup(rng: &mut Rand32, center: Point3<f32>, num_triangles: usize) -> PolygonMesh {
    let mut vertices = vec![];
    let mut triangles = vec![];

    for k in 0..num_triangles {
        let base = center + Vector3::new(rng.rand_float(), rng.rand_float(), rng.rand_float()) * 2.0
            - Vector3::repeat(1.0);
        for _ in 0..3 {
            let jitter = Vector3::new(rng.rand_float(), rng.rand_float(), rng.rand_float());
            vertices.push(base + (jitter - Vector3::repeat(0.5)) * 0.4);
        }
        let first = 3 * k as u32;
        triangles.push([first, first + 1, first + 2]);
    }

    PolygonMesh::from_triangles(vertices, &triangles).unwrap()
}

#[test]
fn overlap_finds_every_intersecting_face_pair() {
    let mut rng = Rand32::new(7);

    for _ in 0..20 {
        let mesh1 = triangle_soup(&mut rng, Point3::origin(), 60);
        let mesh2 = triangle_soup(&mut rng, Point3::new(0.8, 0.3, 0.0), 45);

        let mut pairs = overlap(&SpatialIndex::new(&mesh1), &SpatialIndex::new(&mesh2));
        pairs.sort();

        let mut expected = vec![];
        for f1 in 0..mesh1.faces().len() as u32 {
            for f2 in 0..mesh2.faces().len() as u32 {
                if mesh1.face_aabb(f1).intersects(&mesh2.face_aabb(f2)) {
                    expected.push((f1, f2));
                }
            }
        }

        assert_eq!(pairs, expected);
    }
}

#[test]
fn contact_is_the_closest_candidate_vertex_pair() {
    let mut rng = Rand32::new(42);

    for _ in 0..20 {
        let mesh1 = triangle_soup(&mut rng, Point3::origin(), 50);
        let mesh2 = triangle_soup(&mut rng, Point3::new(0.5, 0.5, 0.5), 50);
        let candidates = overlap(&SpatialIndex::new(&mesh1), &SpatialIndex::new(&mesh2));

        if candidates.is_empty() {
            assert_eq!(resolve_contact(&candidates, &mesh1, &mesh2), None);
            continue;
        }

        let contact = closest_vertex_pair(&candidates, &mesh1, &mesh2).unwrap();
        let pt1 = mesh1.vertices()[contact.vertex1 as usize];
        let pt2 = mesh2.vertices()[contact.vertex2 as usize];
        assert_eq!(contact.point, na::center(&pt1, &pt2));
        assert_eq!(
            resolve_contact(&candidates, &mesh1, &mesh2),
            Some(contact.point)
        );

        let mut found = false;
        for (f1, f2) in &candidates {
            for &vid1 in mesh1.faces()[*f1 as usize].iter() {
                for &vid2 in mesh2.faces()[*f2 as usize].iter() {
                    let pt1 = &mesh1.vertices()[vid1 as usize];
                    let pt2 = &mesh2.vertices()[vid2 as usize];
                    assert!(na::distance(pt1, pt2) >= contact.dist);
                    found |= (vid1, vid2) == (contact.vertex1, contact.vertex2);
                }
            }
        }
        assert!(found);
    }
}
