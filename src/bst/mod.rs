//! Binary search tree that keeps its entries ordered by key without any rebalancing.

mod map;
mod set;
pub(crate) mod tree;

pub use self::map::{BstMap, BstMapIntoIter, BstMapIter};
pub use self::set::{BstSet, BstSetIntoIter, BstSetIter};
