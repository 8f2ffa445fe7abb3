//! The operations shared by every ordered table and the errors they report.

use std::borrow::Borrow;
use std::error;
use std::fmt;
use std::result;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// An insertion used a key that is already present.
    DuplicateKey,
    /// A removal or an indexed lookup used a key that is not present.
    MissingKey,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::DuplicateKey => write!(f, "key already exists in the table"),
            Error::MissingKey => write!(f, "key does not exist in the table"),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

/// A collection of key-value pairs with unique, totally ordered keys.
///
/// A failed `insert` or `remove` leaves the table exactly as it was. `try_find` and
/// `contains_key` never fail.
///
/// # Examples
///
/// ```
/// use ordered_tables::{BstMap, Table, TreapMap};
///
/// fn fill<T: Table<u32, &'static str>>(table: &mut T) {
///     table.insert(2, "b").unwrap();
///     table.insert(1, "a").unwrap();
/// }
///
/// let mut bst = BstMap::new();
/// let mut treap = TreapMap::new();
/// fill(&mut bst);
/// fill(&mut treap);
/// assert_eq!(bst.get(&1), treap.get(&1));
/// ```
pub trait Table<K, V>
where
    K: Ord,
{
    /// Returns the number of entries in the table.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts a new entry. Fails with `Error::DuplicateKey` if the key is already present.
    fn insert(&mut self, key: K, value: V) -> Result<()>;

    /// Removes an entry and returns its value. Fails with `Error::MissingKey` if the key is absent.
    fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized;

    fn try_find<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized;

    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.try_find(key).is_some()
    }

    /// Returns the value of an entry. Fails with `Error::MissingKey` if the key is absent.
    fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.try_find(key).ok_or(Error::MissingKey)
    }

    /// Returns the value of an entry mutably. Fails with `Error::MissingKey` if the key is absent.
    fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized;

    /// Removes every entry.
    fn clear(&mut self);
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Error::DuplicateKey), "key already exists in the table");
        assert_eq!(format!("{}", Error::MissingKey), "key does not exist in the table");
    }
}
