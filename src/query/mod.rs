//! Non-persistent geometric queries between two indexed meshes.
//!
//! [`overlap()`] lists the candidate face pairs of two spatial indices, and
//! [`resolve_contact()`] reduces such a list to a single contact location.

pub use self::overlap::overlap;
pub use self::vertex_contact::{closest_vertex_pair, resolve_contact, VertexPairContact};

mod overlap;
mod vertex_contact;
