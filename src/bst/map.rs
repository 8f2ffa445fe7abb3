use crate::bst::tree::{self, Search};
use crate::entry::{Entry, TableEntry};
use crate::table::{Error, Result, Table};
use crate::tree::{BinaryTree, IntoIter, Iter};
use log::debug;
use std::borrow::Borrow;
use std::ops::{Index, IndexMut};

/// An ordered map implemented using an unbalanced binary search tree.
///
/// The key of any node is greater than all keys in its left subtree and less than all keys in its
/// right subtree. No rebalancing is performed, so the shape of the tree depends on the order in
/// which keys are inserted: ascending insertions produce a tree of height `n`.
///
/// # Examples
///
/// ```
/// use ordered_tables::{BstMap, Error};
///
/// let mut map = BstMap::new();
/// map.insert(0, 1).unwrap();
/// map.insert(3, 4).unwrap();
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.try_find(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Some(&0));
/// assert_eq!(map.ceil(&2), Some(&3));
///
/// map[&0] = 2;
/// assert_eq!(map.remove(&0), Ok(2));
/// assert_eq!(map.remove(&1), Err(Error::MissingKey));
/// ```
#[derive(Clone)]
pub struct BstMap<K, V> {
    tree: BinaryTree<TableEntry<K, V>>,
}

impl<K, V> BstMap<K, V>
where
    K: Ord,
{
    /// Constructs a new, empty `BstMap<K, V>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::BstMap;
    ///
    /// let map: BstMap<u32, u32> = BstMap::new();
    /// ```
    pub fn new() -> Self {
        BstMap {
            tree: BinaryTree::new(),
        }
    }

    /// Inserts a key-value pair into the map. Returns `Err(Error::DuplicateKey)` and leaves the
    /// map unchanged if the key already exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::{BstMap, Error};
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.insert(1, 1), Ok(()));
    /// assert_eq!(map.insert(1, 2), Err(Error::DuplicateKey));
    /// assert_eq!(map.get(&1), Ok(&1));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        tree::attach(&mut self.tree, TableEntry::new(key, value))
            .map(|_| ())
            .map_err(|_| Error::DuplicateKey)
    }

    /// Removes a key-value pair from the map and returns the value. Returns
    /// `Err(Error::MissingKey)` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::{BstMap, Error};
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.remove(&1), Ok(1));
    /// assert_eq!(map.remove(&1), Err(Error::MissingKey));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match tree::find(&self.tree, key) {
            Search::Found(node) => {
                tree::extract(&mut self.tree, node);
                Ok(self.tree.free(node).value)
            },
            Search::Vacant(_) => Err(Error::MissingKey),
        }
    }

    /// Returns an immutable reference to the value associated with a particular key, or `None`
    /// if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.try_find(&0), None);
    /// assert_eq!(map.try_find(&1), Some(&1));
    /// ```
    pub fn try_find<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        tree::get(&self.tree, key).map(|entry| &entry.value)
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.try_find(key).is_some()
    }

    /// Returns an immutable reference to the value associated with a particular key. Returns
    /// `Err(Error::MissingKey)` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::{BstMap, Error};
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.get(&0), Err(Error::MissingKey));
    /// assert_eq!(map.get(&1), Ok(&1));
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.try_find(key).ok_or(Error::MissingKey)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns
    /// `Err(Error::MissingKey)` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1).unwrap();
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Ok(&2));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        tree::get_mut(&mut self.tree, key)
            .map(|entry| &mut entry.value)
            .ok_or(Error::MissingKey)
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::BstMap;
    ///
    /// let map: BstMap<u32, u32> = BstMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the map, removing all values. Clearing an empty map does nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(2, 2).unwrap();
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        if !self.tree.is_empty() {
            debug!("clearing {} entries", self.tree.len());
        }
        self.tree.clear();
    }

    /// Returns the number of levels in the underlying tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// for key in 0..10 {
    ///     map.insert(key, key).unwrap();
    /// }
    /// assert_eq!(map.height(), 10);
    /// ```
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Returns a key in the map that is greater than or equal to a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.ceil(&0), Some(&1));
    /// assert_eq!(map.ceil(&2), None);
    /// ```
    pub fn ceil<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        tree::ceil(&self.tree, key).map(|entry| &entry.key)
    }

    /// Returns a key in the map that is less than or equal to a particular key. Returns `None` if
    /// such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.floor(&0), None);
    /// assert_eq!(map.floor(&2), Some(&1));
    /// ```
    pub fn floor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        tree::floor(&self.tree, key).map(|entry| &entry.key)
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(3, 3).unwrap();
    /// assert_eq!(map.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&K> {
        tree::min(&self.tree).map(|entry| &entry.key)
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(3, 3).unwrap();
    /// assert_eq!(map.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&K> {
        tree::max(&self.tree).map(|entry| &entry.key)
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal. A new iterator can be obtained at any time; the borrow checker prevents the map
    /// from being modified while one is alive.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(3, 3).unwrap();
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&3, &3)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> BstMapIter<K, V> {
        BstMapIter {
            tree_iter: self.tree.iter(),
        }
    }
}

impl<K, V> Table<K, V> for BstMap<K, V>
where
    K: Ord,
{
    fn len(&self) -> usize {
        BstMap::len(self)
    }

    fn insert(&mut self, key: K, value: V) -> Result<()> {
        BstMap::insert(self, key, value)
    }

    fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        BstMap::remove(self, key)
    }

    fn try_find<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        BstMap::try_find(self, key)
    }

    fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        BstMap::get_mut(self, key)
    }

    fn clear(&mut self) {
        BstMap::clear(self)
    }
}

impl<K, V> IntoIterator for BstMap<K, V>
where
    K: Ord,
{
    type Item = (K, V);
    type IntoIter = BstMapIntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        BstMapIntoIter {
            tree_iter: self.tree.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a BstMap<K, V>
where
    K: 'a + Ord,
    V: 'a,
{
    type Item = (&'a K, &'a V);
    type IntoIter = BstMapIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `BstMap<K, V>`.
///
/// This iterator traverses the elements of the map in-order and yields owned entries.
pub struct BstMapIntoIter<K, V> {
    tree_iter: IntoIter<TableEntry<K, V>>,
}

impl<K, V> Iterator for BstMapIntoIter<K, V>
where
    K: Ord,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next().map(|entry| entry.into_pair())
    }
}

/// An iterator for `BstMap<K, V>`.
///
/// This iterator traverses the elements of the map in-order and yields immutable references.
pub struct BstMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    tree_iter: Iter<'a, TableEntry<K, V>>,
}

impl<'a, K, V> Iterator for BstMapIter<'a, K, V>
where
    K: 'a + Ord,
    V: 'a,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next().map(|entry| (&entry.key, &entry.value))
    }
}

impl<K, V> Default for BstMap<K, V>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K, V, Q> Index<&'a Q> for BstMap<K, V>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        self.try_find(key).expect("Error: key does not exist.")
    }
}

impl<'a, K, V, Q> IndexMut<&'a Q> for BstMap<K, V>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
{
    fn index_mut(&mut self, key: &Q) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}

#[cfg(test)]
mod tests {
    use super::BstMap;
    use crate::table::Error;

    #[test]
    fn test_len_empty() {
        let map: BstMap<u32, u32> = BstMap::new();
        assert_eq!(map.len(), 0);
        assert_eq!(map.height(), 0);
    }

    #[test]
    fn test_is_empty() {
        let map: BstMap<u32, u32> = BstMap::new();
        assert!(map.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let map: BstMap<u32, u32> = BstMap::new();
        assert_eq!(map.min(), None);
        assert_eq!(map.max(), None);
    }

    #[test]
    fn test_insert() {
        let mut map = BstMap::new();
        assert_eq!(map.insert(1, 1), Ok(()));
        assert!(map.contains_key(&1));
        assert_eq!(map.get(&1), Ok(&1));
    }

    #[test]
    fn test_insert_duplicate() {
        let mut map = BstMap::new();
        map.insert(5, 5).unwrap();
        map.insert(3, 3).unwrap();
        map.insert(8, 8).unwrap();
        let height = map.height();

        assert_eq!(map.insert(3, 4), Err(Error::DuplicateKey));
        assert_eq!(map.len(), 3);
        assert_eq!(map.height(), height);
        assert_eq!(map.get(&3), Ok(&3));
    }

    #[test]
    fn test_remove() {
        let mut map = BstMap::new();
        map.insert(1, 1).unwrap();
        assert_eq!(map.remove(&1), Ok(1));
        assert!(!map.contains_key(&1));
        assert_eq!(map.get(&1), Err(Error::MissingKey));
    }

    #[test]
    fn test_remove_missing() {
        let mut map = BstMap::new();
        map.insert(1, 1).unwrap();
        assert_eq!(map.remove(&2), Err(Error::MissingKey));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_remove_two_children() {
        let mut map = BstMap::new();
        for key in &[5, 3, 8] {
            map.insert(*key, *key).unwrap();
        }
        assert_eq!(map.remove(&5), Ok(5));
        assert_eq!(map.iter().map(|(key, _)| *key).collect::<Vec<u32>>(), vec![3, 8]);
        assert_eq!(map.height(), 2);
    }

    #[test]
    fn test_remove_successor() {
        let mut map = BstMap::new();
        for key in &[5, 3, 8, 6, 7] {
            map.insert(*key, *key * 10).unwrap();
        }
        assert_eq!(map.remove(&5), Ok(50));
        assert_eq!(
            map.iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&3, &30), (&6, &60), (&7, &70), (&8, &80)],
        );
    }

    #[test]
    fn test_ascending_insertions_degenerate() {
        let mut map = BstMap::new();
        for key in 0..100 {
            map.insert(key, ()).unwrap();
        }
        assert_eq!(map.height(), 100);
    }

    #[test]
    fn test_min_max() {
        let mut map = BstMap::new();
        map.insert(1, 1).unwrap();
        map.insert(3, 3).unwrap();
        map.insert(5, 5).unwrap();

        assert_eq!(map.min(), Some(&1));
        assert_eq!(map.max(), Some(&5));
    }

    #[test]
    fn test_get_mut() {
        let mut map = BstMap::new();
        map.insert(1, 1).unwrap();
        {
            let value = map.get_mut(&1);
            *value.unwrap() = 3;
        }
        assert_eq!(map.get(&1), Ok(&3));
        assert_eq!(map.get_mut(&2), Err(Error::MissingKey));
    }

    #[test]
    fn test_index() {
        let mut map = BstMap::new();
        map.insert(1, 1).unwrap();
        map[&1] += 1;
        assert_eq!(map[&1], 2);
    }

    #[test]
    #[should_panic]
    fn test_index_missing() {
        let map: BstMap<u32, u32> = BstMap::new();
        let _value = map[&1];
    }

    #[test]
    fn test_borrowed_key() {
        let mut map = BstMap::new();
        map.insert(String::from("b"), 2).unwrap();
        map.insert(String::from("a"), 1).unwrap();
        assert_eq!(map.get("a"), Ok(&1));
        assert_eq!(map.remove("b"), Ok(2));
        assert!(!map.contains_key("b"));
    }

    #[test]
    fn test_floor_ceil() {
        let mut map = BstMap::new();
        map.insert(1, 1).unwrap();
        map.insert(3, 3).unwrap();
        map.insert(5, 5).unwrap();

        assert_eq!(map.floor(&0), None);
        assert_eq!(map.floor(&2), Some(&1));
        assert_eq!(map.floor(&4), Some(&3));
        assert_eq!(map.floor(&6), Some(&5));

        assert_eq!(map.ceil(&0), Some(&1));
        assert_eq!(map.ceil(&2), Some(&3));
        assert_eq!(map.ceil(&4), Some(&5));
        assert_eq!(map.ceil(&6), None);
    }

    #[test]
    fn test_clear() {
        let mut map = BstMap::new();
        map.clear();
        assert!(map.is_empty());

        map.insert(1, 1).unwrap();
        map.insert(2, 2).unwrap();
        map.clear();
        assert!(map.is_empty());
        assert!(!map.contains_key(&1));
        assert_eq!(map.insert(1, 3), Ok(()));
    }

    #[test]
    fn test_clone() {
        let mut map = BstMap::new();
        map.insert(1, 1).unwrap();
        map.insert(2, 2).unwrap();

        let mut copy = map.clone();
        copy[&1] = 10;
        copy.remove(&2).unwrap();

        assert_eq!(map.iter().collect::<Vec<(&u32, &u32)>>(), vec![(&1, &1), (&2, &2)]);
        assert_eq!(copy.iter().collect::<Vec<(&u32, &u32)>>(), vec![(&1, &10)]);
    }

    #[test]
    fn test_into_iter() {
        let mut map = BstMap::new();
        map.insert(1, 2).unwrap();
        map.insert(5, 6).unwrap();
        map.insert(3, 4).unwrap();

        assert_eq!(map.into_iter().collect::<Vec<(u32, u32)>>(), vec![(1, 2), (3, 4), (5, 6)]);
    }

    #[test]
    fn test_iter() {
        let mut map = BstMap::new();
        map.insert(5, 5).unwrap();
        map.insert(3, 3).unwrap();
        map.insert(8, 8).unwrap();
        map.insert(1, 1).unwrap();
        map.insert(4, 4).unwrap();

        assert_eq!(
            map.iter().map(|(key, _)| *key).collect::<Vec<u32>>(),
            vec![1, 3, 4, 5, 8],
        );
        assert_eq!((&map).into_iter().count(), 5);
    }
}
