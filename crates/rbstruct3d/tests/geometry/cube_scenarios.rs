use approx::assert_relative_eq;
use na::{Point3, Vector3};
use rbstruct3d::assembly::generate;
use rbstruct3d::bounding_volume::{Aabb, BoundingVolume};
use rbstruct3d::partitioning::SpatialIndex;
use rbstruct3d::query::overlap;
use rbstruct3d::shape::{MeshObject, PolygonMesh};
use rbstruct3d::transformation::preprocess;

/// A unit cube spanning `[0, 1]³` once translated by `offset`.
fn unit_cube(name: &str, offset: Vector3<f32>) -> MeshObject {
    MeshObject::new(name, PolygonMesh::cuboid(Vector3::repeat(0.5)))
        .with_translation(offset + Vector3::repeat(0.5))
}

fn shared_region() -> Aabb {
    Aabb::new(Point3::new(0.5, 0.5, 0.5), Point3::new(1.0, 1.0, 1.0))
}

#[test]
fn overlapping_cubes_connect_inside_shared_region() {
    let objects = [
        unit_cube("A", Vector3::zeros()),
        unit_cube("B", Vector3::repeat(0.5)),
    ];
    let records = generate(&objects, None, 1).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].object1, "A");
    assert_eq!(records[0].object2, "B");
    assert!(shared_region()
        .loosened(1.0e-5)
        .contains_local_point(&records[0].location));
}

#[test]
fn distant_cubes_do_not_connect() {
    let objects = [
        unit_cube("A", Vector3::zeros()),
        unit_cube("B", Vector3::new(2.0, 0.0, 0.0)),
    ];

    for level in [0, 1, 4] {
        assert!(generate(&objects, None, level).unwrap().is_empty());
    }

    let mesh1 = preprocess(&objects[0], None, 0).unwrap();
    let mesh2 = preprocess(&objects[1], None, 0).unwrap();
    assert!(overlap(&SpatialIndex::new(&mesh1), &SpatialIndex::new(&mesh2)).is_empty());
}

#[test]
fn contact_tracks_the_vertex_grid() {
    let cube1 = unit_cube("A", Vector3::zeros());
    let cube2 = unit_cube("B", Vector3::repeat(0.5));
    let region = shared_region();
    let contact = |level| generate(&[&cube1, &cube2], None, level).unwrap()[0].location;

    // Without cuts, the closest corners are sqrt(3) / 2 apart and the first such pair wins.
    assert_eq!(contact(0), Point3::new(0.25, 0.25, 0.75));
    assert_relative_eq!(contact(4), Point3::new(0.45, 0.75, 0.95), epsilon = 1.0e-6);

    let coarse = region.distance_to_local_point(&contact(0));
    for level in 1..=5 {
        let dist = region.distance_to_local_point(&contact(level));
        assert!(dist <= coarse, "level {level}: {dist} > {coarse}");
        // Within one grid cell of the shared region.
        assert!(dist <= 1.0 / (level + 1) as f32, "level {level}: {dist}");

        if level % 2 == 1 {
            // An odd number of cuts puts grid vertices of both cubes on the region corner.
            assert_eq!(dist, 0.0);
        }
    }
}

#[test]
fn shell_offset_connects_nearby_cubes() {
    // 0.1 apart along X.
    let objects = [
        unit_cube("A", Vector3::zeros()),
        unit_cube("B", Vector3::new(1.1, 0.0, 0.0)),
    ];

    assert!(generate(&objects, None, 1).unwrap().is_empty());
    assert_eq!(generate(&objects, Some(0.2), 1).unwrap().len(), 1);
}

#[test]
fn three_mutually_overlapping_cubes() {
    let objects = [
        unit_cube("A", Vector3::zeros()),
        unit_cube("B", Vector3::repeat(0.5)),
        unit_cube("C", Vector3::repeat(0.25)),
    ];
    let records = generate(&objects, None, 2).unwrap();
    let pairs: Vec<_> = records
        .iter()
        .map(|r| (r.object1.as_str(), r.object2.as_str()))
        .collect();

    assert_eq!(pairs, [("A", "B"), ("A", "C"), ("B", "C")]);
}
