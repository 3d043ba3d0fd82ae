//! Various unsorted geometrical and logical operators.

pub use self::center::midpoint;
pub use self::sorted_pair::SortedPair;

mod center;
mod sorted_pair;
