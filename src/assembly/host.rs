//! Seams to the host application materializing the generated structure.

use crate::assembly::{
    ConnectorRecord, ConnectorSet, ConstraintParams, ParamsError, RigidBodyParams,
};
use crate::shape::MeshSource;

/// Creates the scene objects of a connector in the host application.
pub trait ConstraintMaterializer {
    /// Creates a marker named [`ConnectorRecord::name`] at the record location, and a constraint
    /// between its two objects configured with `params`.
    fn create_connector(&mut self, record: &ConnectorRecord, params: &ConstraintParams);

    /// Applies `params` to the constraint of the existing connector named `name`.
    ///
    /// Returns `false` if the host doesn’t know any such connector.
    fn update_constraint(&mut self, name: &str, params: &ConstraintParams) -> bool;
}

/// Sets up rigid bodies in the host application.
pub trait RigidBodyHost {
    /// Turns the object named `name` into a rigid body configured with `params`, or updates
    /// its configuration if it already is one.
    fn add_or_update_rigid_body(&mut self, name: &str, params: &RigidBodyParams);

    /// Removes the rigid body of the object named `name`.
    ///
    /// Returns `false` if that object had no rigid body.
    fn remove_rigid_body(&mut self, name: &str) -> bool;
}

/// Creates one connector per record of `connectors`, in order.
pub fn materialize_connectors(
    host: &mut impl ConstraintMaterializer,
    connectors: &ConnectorSet,
    params: &ConstraintParams,
) -> Result<(), ParamsError> {
    params.validate()?;

    for record in connectors {
        host.create_connector(record, params);
    }

    Ok(())
}

/// Applies `params` to the constraints of already materialized connectors.
///
/// Returns the number of constraints the host actually updated.
pub fn update_constraints(
    host: &mut impl ConstraintMaterializer,
    connectors: &ConnectorSet,
    params: &ConstraintParams,
) -> Result<usize, ParamsError> {
    params.validate()?;

    let updated = connectors
        .iter()
        .filter(|record| host.update_constraint(&record.name(), params))
        .count();
    Ok(updated)
}

/// Adds or updates the rigid body of every object.
pub fn set_rigid_bodies<S: MeshSource>(
    host: &mut impl RigidBodyHost,
    objects: &[S],
    params: &RigidBodyParams,
) -> Result<(), ParamsError> {
    params.validate()?;

    for object in objects {
        host.add_or_update_rigid_body(object.name(), params);
    }

    Ok(())
}

/// Removes the rigid body of every object.
///
/// Returns the number of rigid bodies actually removed.
pub fn remove_rigid_bodies<S: MeshSource>(host: &mut impl RigidBodyHost, objects: &[S]) -> usize {
    objects
        .iter()
        .filter(|object| host.remove_rigid_body(object.name()))
        .count()
}
