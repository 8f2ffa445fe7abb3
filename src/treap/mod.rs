//! Randomized binary search tree where each node also maintains the min-heap invariant on a
//! randomly drawn priority.

mod entry;
mod map;
mod set;
mod tree;

pub use self::map::{TreapMap, TreapMapIntoIter, TreapMapIter};
pub use self::set::{TreapSet, TreapSetIntoIter, TreapSetIter};
