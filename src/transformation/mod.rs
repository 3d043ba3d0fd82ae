//! Transformations applied to a raw mesh before it gets indexed.

pub use self::preprocess::{preprocess, PreprocessError};
pub use self::solidify::solidify;
pub use self::subdivide::subdivide;

mod preprocess;
mod solidify;
mod subdivide;
