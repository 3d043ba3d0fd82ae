//! Assembly of a rigid-body structure from a set of overlapping mesh objects.
//!
//! The [`StructureGenerator`] runs the overlap queries over every pair of objects and emits
//! one [`ConnectorRecord`] per overlapping pair. Materializing those records (markers,
//! constraints, rigid bodies) is left to the host application through the
//! [`ConstraintMaterializer`] and [`RigidBodyHost`] traits.

pub use self::connector::{ConnectorRecord, ConnectorSet};
pub use self::generator::{
    check_selection, generate, overlap_collection_name, GenerateError, StructureGenerator,
};
pub use self::host::{
    materialize_connectors, remove_rigid_bodies, set_rigid_bodies, update_constraints,
    ConstraintMaterializer, RigidBodyHost,
};
pub use self::params::{
    CollisionShape, ConstraintKind, ConstraintParams, OverlapParams, ParamsError,
    RigidBodyParams, MAX_BREAKING_THRESHOLD, MAX_SUBDIVISION_LEVEL,
};
pub use self::progress::{NoProgress, ProgressSink};

mod connector;
mod generator;
mod host;
mod params;
mod progress;
