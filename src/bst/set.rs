use crate::bst::map::{BstMap, BstMapIntoIter, BstMapIter};
use crate::table::Result;
use std::borrow::Borrow;

/// An ordered set implemented using an unbalanced binary search tree.
///
/// # Examples
///
/// ```
/// use ordered_tables::{BstSet, Error};
///
/// let mut set = BstSet::new();
/// set.insert(0).unwrap();
/// set.insert(3).unwrap();
///
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(set.min(), Some(&0));
/// assert_eq!(set.ceil(&2), Some(&3));
///
/// assert_eq!(set.remove(&0), Ok(()));
/// assert_eq!(set.remove(&1), Err(Error::MissingKey));
/// ```
#[derive(Clone)]
pub struct BstSet<T> {
    map: BstMap<T, ()>,
}

impl<T> BstSet<T>
where
    T: Ord,
{
    /// Constructs a new, empty `BstSet<T>`.
    pub fn new() -> Self {
        BstSet { map: BstMap::new() }
    }

    /// Inserts a key into the set. Returns `Err(Error::DuplicateKey)` if the key already exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::{BstSet, Error};
    ///
    /// let mut set = BstSet::new();
    /// assert_eq!(set.insert(1), Ok(()));
    /// assert!(set.contains(&1));
    /// assert_eq!(set.insert(1), Err(Error::DuplicateKey));
    /// ```
    pub fn insert(&mut self, key: T) -> Result<()> {
        self.map.insert(key, ())
    }

    /// Removes a key from the set. Returns `Err(Error::MissingKey)` if the key does not exist.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<()>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.remove(key)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns a key in the set that is less than or equal to a particular key. Returns `None` if
    /// such a key does not exist.
    pub fn floor<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.floor(key)
    }

    /// Returns a key in the set that is greater than or equal to a particular key. Returns `None`
    /// if such a key does not exist.
    pub fn ceil<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.ceil(key)
    }

    pub fn min(&self) -> Option<&T> {
        self.map.min()
    }

    pub fn max(&self) -> Option<&T> {
        self.map.max()
    }

    /// Returns an iterator over the set. The iterator will yield keys using in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::BstSet;
    ///
    /// let mut set = BstSet::new();
    /// set.insert(3).unwrap();
    /// set.insert(1).unwrap();
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> BstSetIter<T> {
        BstSetIter {
            map_iter: self.map.iter(),
        }
    }
}

impl<T> IntoIterator for BstSet<T>
where
    T: Ord,
{
    type Item = T;
    type IntoIter = BstSetIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            map_iter: self.map.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a BstSet<T>
where
    T: 'a + Ord,
{
    type Item = &'a T;
    type IntoIter = BstSetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `BstSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields owned keys.
pub struct BstSetIntoIter<T> {
    map_iter: BstMapIntoIter<T, ()>,
}

impl<T> Iterator for BstSetIntoIter<T>
where
    T: Ord,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.map_iter.next().map(|pair| pair.0)
    }
}

/// An iterator for `BstSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct BstSetIter<'a, T>
where
    T: 'a,
{
    map_iter: BstMapIter<'a, T, ()>,
}

impl<'a, T> Iterator for BstSetIter<'a, T>
where
    T: 'a + Ord,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.map_iter.next().map(|pair| pair.0)
    }
}

impl<T> Default for BstSet<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}
