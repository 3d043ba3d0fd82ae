/*!
rbstruct
========

**rbstruct** turns a set of overlapping mesh pieces into a rigid-body structure: it finds
every pair of pieces whose surfaces overlap, picks one contact location per pair, and hands
the result to a host application that materializes a breakable joint there.

The pipeline flows strictly forward:

1. [`transformation::preprocess`] brings a mesh into world space and optionally thickens
   and subdivides it.
2. [`partitioning::SpatialIndex`] builds a bounding-volume hierarchy over its faces.
3. [`query::overlap`] lists the face pairs of two indices whose bounding boxes intersect.
4. [`query::resolve_contact`] reduces those candidates to a single contact point.
5. [`assembly::StructureGenerator`] runs all of the above over every pair of objects.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.

#[cfg(all(feature = "f32", feature = "f64"))]
std::compile_error!("The `f32` and `f64` features are mutually exclusive.");

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[cfg(test)]
#[macro_use]
extern crate approx;

pub extern crate nalgebra as na;

pub mod assembly;
pub mod bounding_volume;
pub mod partitioning;
pub mod query;
pub mod shape;
pub mod transformation;
pub mod utils;

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f32")]
    pub use f32 as Real;
}

/// Compilation flags dependent aliases for mathematical types.
pub mod math {
    pub use super::real::*;
    pub use na::{Matrix4, Point3, Translation3, UnitVector3, Vector3};

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The unit vector type.
    pub use UnitVector3 as UnitVector;

    /// The translation type.
    pub use Translation3 as Translation;

    /// The homogeneous 4x4 matrix type used for object-to-world transforms.
    ///
    /// It may contain rotation, translation, and (non-uniform) scale.
    pub use Matrix4 as HomogeneousMatrix;
}
