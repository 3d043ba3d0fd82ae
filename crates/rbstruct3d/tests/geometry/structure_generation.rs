use na::{Matrix4, Point3, Rotation3, Translation3, Vector3};
use rbstruct3d::assembly::{
    check_selection, overlap_collection_name, ConnectorSet, GenerateError, NoProgress,
    OverlapParams, StructureGenerator,
};
use rbstruct3d::shape::{MeshObject, PolygonMesh};
use rbstruct3d::transformation::PreprocessError;

/// A row of boxes, each one overlapping the next one.
fn wall(num_bricks: usize) -> Vec<MeshObject> {
    (0..num_bricks)
        .map(|k| {
            let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), 0.02 * k as f32);
            let translation = Translation3::new(k as f32 * 0.9, 0.0, 0.0);
            let transform: Matrix4<f32> = translation.to_homogeneous() * rotation.to_homogeneous();
            MeshObject::new(
                format!("Brick.{k:03}"),
                PolygonMesh::cuboid(Vector3::new(0.5, 0.25, 0.25)),
            )
            .with_transform(transform)
        })
        .collect()
}

fn generator(subdivision_level: u32) -> StructureGenerator {
    StructureGenerator::new(OverlapParams {
        subdivision_level,
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn generation_is_deterministic() {
    let bricks = wall(8);

    let generator = generator(2);
    let first = generator.generate(&bricks, &mut NoProgress).unwrap();
    let second = generator.generate(&bricks, &mut NoProgress).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 7);

    for (k, record) in first.iter().enumerate() {
        assert_eq!(record.name(), format!("Brick.{:03}_Brick.{:03}", k, k + 1));
    }
}

#[test]
fn each_unordered_pair_yields_one_record() {
    let bricks = wall(2);
    let reversed = [bricks[1].clone(), bricks[0].clone()];
    let generator = generator(2);

    let forward = generator.generate(&bricks, &mut NoProgress).unwrap();
    let backward = generator.generate(&reversed, &mut NoProgress).unwrap();

    assert_eq!(forward.len(), 1);
    assert_eq!(backward.len(), 1);
    assert_eq!(forward[0].name(), "Brick.000_Brick.001");
    assert_eq!(backward[0].name(), "Brick.001_Brick.000");
}

#[test]
fn regeneration_replaces_previous_connectors() {
    let collection = "Wall";
    check_selection(collection).unwrap();
    assert!(check_selection(&overlap_collection_name(collection)).is_err());

    let generator = generator(2);
    let mut connectors = ConnectorSet::new();
    generator
        .generate_into(&wall(5), &mut connectors, &mut NoProgress)
        .unwrap();
    assert_eq!(connectors.len(), 4);

    generator
        .generate_into(&wall(3), &mut connectors, &mut NoProgress)
        .unwrap();
    assert_eq!(connectors.len(), 2);
}

#[test]
fn non_finite_vertices_abort_generation() {
    // A strip of 11 triangles with one vertex set to NaN.
    let mut vertices: Vec<_> = (0..13)
        .map(|k| Point3::new((k / 2) as f32, (k % 2) as f32, 0.0))
        .collect();
    vertices[4].x = f32::NAN;
    let triangles: Vec<_> = (0..11).map(|k| [k, k + 1, k + 2]).collect();
    let mesh = PolygonMesh::from_triangles(vertices, &triangles).unwrap();
    let strip = MeshObject::new("Strip", mesh);
    let cube = MeshObject::new("Cube", PolygonMesh::cuboid(Vector3::repeat(2.0)));

    let mut connectors = ConnectorSet::new();
    let result = generator(0).generate_into(&[cube, strip], &mut connectors, &mut NoProgress);

    assert_eq!(
        result,
        Err(GenerateError::Preprocess {
            object: "Strip".to_string(),
            source: PreprocessError::NonFiniteVertex { index: 4 },
        })
    );
    assert!(connectors.is_empty());
}
