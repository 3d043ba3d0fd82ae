use crate::math::Real;

/// The largest accepted [`OverlapParams::subdivision_level`].
pub const MAX_SUBDIVISION_LEVEL: u32 = 100;
/// The largest accepted [`ConstraintParams::breaking_threshold`].
pub const MAX_BREAKING_THRESHOLD: Real = 1000.0;

/// Error raised by out-of-range configuration values.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum ParamsError {
    /// The subdivision level exceeds [`MAX_SUBDIVISION_LEVEL`].
    #[error("the subdivision level {0} is out of range [0, 100].")]
    SubdivisionOutOfRange(u32),
    /// The shell offset is NaN or infinite.
    #[error("the shell offset must be finite.")]
    NonFiniteOffset,
    /// The breaking threshold is negative, not finite, or exceeds [`MAX_BREAKING_THRESHOLD`].
    #[error("the breaking threshold {0} is out of range [0, 1000].")]
    BreakingThresholdOutOfRange(Real),
    /// The display size of the connector markers is negative or not finite.
    #[error("the display size {0} must be finite and non-negative.")]
    InvalidDisplaySize(Real),
    /// The rigid-body mass is not strictly positive or not finite.
    #[error("the mass {0} must be finite and strictly positive.")]
    InvalidMass(Real),
}

/// Parameters of the overlap detection.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct OverlapParams {
    /// Thickness of the shell extruded around each mesh before testing overlaps.
    ///
    /// Compensates for thin meshes whose physical contact volume is larger than their surface.
    /// `None` or `Some(0.0)` disables it.
    pub shell_offset: Option<Real>,
    /// Number of cuts applied to every edge, refining the vertices the contact is picked from.
    pub subdivision_level: u32,
}

impl Default for OverlapParams {
    fn default() -> Self {
        Self {
            shell_offset: None,
            subdivision_level: 4,
        }
    }
}

impl OverlapParams {
    /// Checks that every parameter is within its valid range.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.subdivision_level > MAX_SUBDIVISION_LEVEL {
            return Err(ParamsError::SubdivisionOutOfRange(self.subdivision_level));
        }
        if self.shell_offset.is_some_and(|t| !t.is_finite()) {
            return Err(ParamsError::NonFiniteOffset);
        }
        Ok(())
    }
}

/// The joint types a host physics engine may create between two bodies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum ConstraintKind {
    /// Both bodies are glued together.
    #[default]
    Fixed,
    /// Ball-and-socket joint.
    Point,
    /// Rotation around a single axis.
    Hinge,
    /// Translation along a single axis.
    Slider,
    /// Translation along and rotation around a single axis.
    Piston,
    /// Per-axis locked or limited degrees of freedom.
    Generic,
    /// Per-axis springs.
    GenericSpring,
    /// Driven rotation or translation.
    Motor,
}

/// Configuration of the constraints created at each connector.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ConstraintParams {
    /// The joint type.
    pub kind: ConstraintKind,
    /// Whether the two connected bodies still collide with each other.
    pub enable_collisions: bool,
    /// Impulse above which the constraint breaks, in `[0, MAX_BREAKING_THRESHOLD]`.
    pub breaking_threshold: Real,
    /// Whether the connector markers are drawn in front of other objects.
    pub show_in_front: bool,
    /// Display size of the connector markers.
    pub display_size: Real,
}

impl Default for ConstraintParams {
    fn default() -> Self {
        Self {
            kind: ConstraintKind::Fixed,
            enable_collisions: false,
            breaking_threshold: 40.0,
            show_in_front: true,
            display_size: 0.2,
        }
    }
}

impl ConstraintParams {
    /// Checks that every parameter is within its valid range.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(0.0..=MAX_BREAKING_THRESHOLD).contains(&self.breaking_threshold) {
            return Err(ParamsError::BreakingThresholdOutOfRange(
                self.breaking_threshold,
            ));
        }
        if !self.display_size.is_finite() || self.display_size < 0.0 {
            return Err(ParamsError::InvalidDisplaySize(self.display_size));
        }
        Ok(())
    }
}

/// The collision shapes a host physics engine may approximate a body with.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum CollisionShape {
    /// The convex hull of the mesh.
    #[default]
    ConvexHull,
    /// The bounding box of the mesh.
    Box,
    /// The bounding sphere of the mesh.
    Sphere,
    /// A capsule fitted to the mesh bounds.
    Capsule,
    /// A cylinder fitted to the mesh bounds.
    Cylinder,
    /// A cone fitted to the mesh bounds.
    Cone,
    /// The mesh itself.
    Mesh,
    /// The union of the shapes of child objects.
    Compound,
}

/// Configuration of the rigid bodies of the structure pieces.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RigidBodyParams {
    /// Mass of each piece.
    pub mass: Real,
    /// Collision shape of each piece.
    pub collision_shape: CollisionShape,
}

impl Default for RigidBodyParams {
    fn default() -> Self {
        Self {
            mass: 10.0,
            collision_shape: CollisionShape::ConvexHull,
        }
    }
}

impl RigidBodyParams {
    /// Checks that every parameter is within its valid range.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(ParamsError::InvalidMass(self.mass));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(OverlapParams::default().validate(), Ok(()));
        assert_eq!(ConstraintParams::default().validate(), Ok(()));
        assert_eq!(RigidBodyParams::default().validate(), Ok(()));
        assert_eq!(OverlapParams::default().subdivision_level, 4);
        assert_eq!(ConstraintParams::default().kind, ConstraintKind::Fixed);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let overlap = OverlapParams {
            subdivision_level: 101,
            ..Default::default()
        };
        assert_eq!(
            overlap.validate(),
            Err(ParamsError::SubdivisionOutOfRange(101))
        );

        let overlap = OverlapParams {
            shell_offset: Some(Real::INFINITY),
            ..Default::default()
        };
        assert_eq!(overlap.validate(), Err(ParamsError::NonFiniteOffset));

        for threshold in [-1.0, 1000.5, Real::NAN] {
            let constraint = ConstraintParams {
                breaking_threshold: threshold,
                ..Default::default()
            };
            assert!(matches!(
                constraint.validate(),
                Err(ParamsError::BreakingThresholdOutOfRange(_))
            ));
        }

        let body = RigidBodyParams {
            mass: 0.0,
            ..Default::default()
        };
        assert_eq!(body.validate(), Err(ParamsError::InvalidMass(0.0)));
    }

    #[test]
    fn bounds_are_inclusive() {
        let overlap = OverlapParams {
            shell_offset: Some(-0.1),
            subdivision_level: MAX_SUBDIVISION_LEVEL,
            ..Default::default()
        };
        assert_eq!(overlap.validate(), Ok(()));

        for threshold in [0.0, MAX_BREAKING_THRESHOLD] {
            let constraint = ConstraintParams {
                breaking_threshold: threshold,
                ..Default::default()
            };
            assert_eq!(constraint.validate(), Ok(()));
        }
    }
}
