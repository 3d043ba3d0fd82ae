extern crate nalgebra as na;

use na::{Rotation3, Translation3, Vector3};
use rbstruct3d::assembly::{
    check_selection, materialize_connectors, overlap_collection_name, set_rigid_bodies,
    ConnectorRecord, ConnectorSet, ConstraintMaterializer, ConstraintParams, OverlapParams,
    RigidBodyHost, RigidBodyParams, StructureGenerator,
};
use rbstruct3d::shape::{MeshObject, PolygonMesh};

/// A host scene printing what it is asked to create.
struct PrintingScene;

impl ConstraintMaterializer for PrintingScene {
    fn create_connector(&mut self, record: &ConnectorRecord, params: &ConstraintParams) {
        println!(
            "  connector {} at [{:.3}, {:.3}, {:.3}]: {:?} joint, breaks above {}",
            record.name(),
            record.location.x,
            record.location.y,
            record.location.z,
            params.kind,
            params.breaking_threshold
        );
    }

    fn update_constraint(&mut self, _: &str, _: &ConstraintParams) -> bool {
        false
    }
}

impl RigidBodyHost for PrintingScene {
    fn add_or_update_rigid_body(&mut self, name: &str, params: &RigidBodyParams) {
        println!(
            "  rigid body {name}: mass {}, {:?} shape",
            params.mass, params.collision_shape
        );
    }

    fn remove_rigid_body(&mut self, _: &str) -> bool {
        false
    }
}

fn main() {
    /*
     * A small arch of slightly overlapping stones.
     */
    let num_stones = 9;
    let stones: Vec<_> = (0..num_stones)
        .map(|k| {
            let angle = std::f32::consts::PI * k as f32 / (num_stones - 1) as f32;
            let rotation = Rotation3::from_axis_angle(&Vector3::y_axis(), -angle);
            let position = Translation3::new(-2.0 * angle.cos(), 0.0, 2.0 * angle.sin());
            MeshObject::new(
                format!("Stone.{k:03}"),
                PolygonMesh::cuboid(Vector3::new(0.3, 0.4, 0.45)),
            )
            .with_transform(position.to_homogeneous() * rotation.to_homogeneous())
        })
        .collect();

    let collection = "Arch";
    if let Err(err) = check_selection(collection) {
        eprintln!("{err}");
        return;
    }

    /*
     * Find the connectors.
     */
    let generator = match StructureGenerator::new(OverlapParams {
        shell_offset: Some(0.02),
        subdivision_level: 2,
        ..Default::default()
    }) {
        Ok(generator) => generator,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };

    let mut connectors = ConnectorSet::new();
    let mut progress = |fraction: f32| println!("Progress: {:.2}%", fraction * 100.0);
    if let Err(err) = generator.generate_into(&stones, &mut connectors, &mut progress) {
        eprintln!("{err}");
        return;
    }

    /*
     * Hand them to the host.
     */
    let mut scene = PrintingScene;
    println!("{}:", overlap_collection_name(collection));
    if let Err(err) = materialize_connectors(&mut scene, &connectors, &ConstraintParams::default())
    {
        eprintln!("{err}");
        return;
    }

    println!("{collection}:");
    if let Err(err) = set_rigid_bodies(&mut scene, &stones, &RigidBodyParams::default()) {
        eprintln!("{err}");
        return;
    }

    println!("{} generated constraints.", connectors.len());
}
