//! Ordered key-value tables built on a parent-linked binary tree.
//!
//! Two tables share one set of binary search tree algorithms:
//!
//! - [`BstMap`](bst/struct.BstMap.html) keeps keys ordered without rebalancing.
//! - [`TreapMap`](treap/struct.TreapMap.html) additionally assigns every entry a random priority
//!   and rotates entries so that priorities are heap ordered, giving an expected logarithmic
//!   height for any insertion order.
//!
//! Both implement [`Table`](table/trait.Table.html). Tables are not synchronized; mutating a
//! table requires exclusive access and iterators borrow the table for their whole lifetime.

mod arena;
mod entry;
mod tree;
pub mod bst;
pub mod table;
pub mod treap;

pub use crate::bst::{BstMap, BstSet};
pub use crate::table::{Error, Result, Table};
pub use crate::treap::{TreapMap, TreapSet};
