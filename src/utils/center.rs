use crate::math::{Point, Real};

/// The midpoint of the segment `[a, b]`.
#[inline]
pub fn midpoint(a: &Point<Real>, b: &Point<Real>) -> Point<Real> {
    na::center(a, b)
}
