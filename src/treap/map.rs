use crate::bst::tree::{self as bst, Search};
use crate::entry::Entry;
use crate::table::{Error, Result, Table};
use crate::tree::{IntoIter, Iter};
use crate::treap::entry::PriorityEntry;
use crate::treap::tree::{self, Tree};
use log::debug;
use rand::{Rng, SeedableRng, XorShiftRng};
use std::borrow::Borrow;
use std::ops::{Index, IndexMut};

/// An ordered map implemented by a treap.
///
/// A treap is a tree that satisfies both the binary search tree property and a heap property.
/// Each node has a key, a value, and a priority drawn at random when the entry is inserted. The
/// key of any node is greater than all keys in its left subtree and less than all keys in its
/// right subtree. The priority of a node is less than or equal to the priorities of its children.
/// Because the priorities are random, the shape of the tree is that of a binary search tree built
/// by inserting the keys in random order, so the expected height is logarithmic in the number of
/// keys no matter in which order they were actually inserted.
///
/// # Examples
///
/// ```
/// use ordered_tables::{Error, TreapMap};
///
/// let mut map = TreapMap::new();
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
pub struct TreapMap<K, V> {
    tree: Tree<K, V>,
    rng: XorShiftRng,
}

impl<K, V> TreapMap<K, V>
where
    K: Ord,
{
    /// Constructs a new, empty `TreapMap<K, V>` whose priorities are drawn from a generator seeded
    /// by the thread-local random number generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::TreapMap;
    ///
    /// let map: TreapMap<u32, u32> = TreapMap::new();
    /// ```
    pub fn new() -> Self {
        Self::with_rng(rand::weak_rng())
    }

    /// Constructs a new, empty `TreapMap<K, V>` whose priorities are drawn from a generator with a
    /// fixed seed. Two maps with the same seed that see the same sequence of insertions have the
    /// same shape.
    ///
    /// # Panics
    ///
    /// Panics if `seed` is all zeros.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::TreapMap;
    ///
    /// let mut left = TreapMap::with_seed([1, 2, 3, 4]);
    /// let mut right = TreapMap::with_seed([1, 2, 3, 4]);
    /// for key in 0..100 {
    ///     left.insert(key, ()).unwrap();
    ///     right.insert(key, ()).unwrap();
    /// }
    /// assert_eq!(left.height(), right.height());
    /// ```
    pub fn with_seed(seed: [u32; 4]) -> Self {
        Self::with_rng(XorShiftRng::from_seed(seed))
    }

    /// Constructs a new, empty `TreapMap<K, V>` that draws priorities from `rng`.
    ///
    /// # Examples
    ///
    /// ```
    /// extern crate rand;
    /// extern crate ordered_tables;
    ///
    /// use ordered_tables::TreapMap;
    ///
    /// let map: TreapMap<u32, u32> = TreapMap::with_rng(rand::weak_rng());
    /// ```
    pub fn with_rng(rng: XorShiftRng) -> Self {
        TreapMap {
            tree: Tree::new(),
            rng,
        }
    }

    /// Inserts a key-value pair into the map. Returns `Err(Error::DuplicateKey)` and leaves the
    /// map unchanged if the key already exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::{Error, TreapMap};
    ///
    /// let mut map = TreapMap::new();
    /// assert_eq!(map.insert(1, 1), Ok(()));
    /// assert_eq!(map.insert(1, 2), Err(Error::DuplicateKey));
    /// assert_eq!(map.get(&1), Ok(&1));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        let new_entry = PriorityEntry::new(key, value, self.rng.next_u32());
        tree::insert(&mut self.tree, new_entry)
            .map(|_| ())
            .map_err(|_| Error::DuplicateKey)
    }

    /// Removes a key-value pair from the map and returns the value. Returns
    /// `Err(Error::MissingKey)` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::{Error, TreapMap};
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.remove(&1), Ok(1));
    /// assert_eq!(map.remove(&1), Err(Error::MissingKey));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match bst::find(&self.tree, key) {
            Search::Found(node) => {
                tree::remove(&mut self.tree, node);
                let (_, value) = self.tree.free(node).into_pair();
                Ok(value)
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
    /// use ordered_tables::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.try_find(&0), None);
    /// assert_eq!(map.try_find(&1), Some(&1));
    /// ```
    pub fn try_find<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        bst::get(&self.tree, key).map(|entry| entry.value())
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::TreapMap;
    ///
    /// let mut map = TreapMap::new();
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
    /// use ordered_tables::{Error, TreapMap};
    ///
    /// let mut map = TreapMap::new();
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
    /// use ordered_tables::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1).unwrap();
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Ok(&2));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        bst::get_mut(&mut self.tree, key)
            .map(|entry| entry.value_mut())
            .ok_or(Error::MissingKey)
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::TreapMap;
    ///
    /// let mut map = TreapMap::new();
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
    /// use ordered_tables::TreapMap;
    ///
    /// let map: TreapMap<u32, u32> = TreapMap::new();
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
    /// use ordered_tables::TreapMap;
    ///
    /// let mut map = TreapMap::new();
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
    /// use ordered_tables::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// for key in 0..1000 {
    ///     map.insert(key, key).unwrap();
    /// }
    /// assert!(map.height() < 100);
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
    /// use ordered_tables::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.ceil(&0), Some(&1));
    /// assert_eq!(map.ceil(&2), None);
    /// ```
    pub fn ceil<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        bst::ceil(&self.tree, key).map(|entry| entry.key())
    }

    /// Returns a key in the map that is less than or equal to a particular key. Returns `None` if
    /// such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.floor(&0), None);
    /// assert_eq!(map.floor(&2), Some(&1));
    /// ```
    pub fn floor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        bst::floor(&self.tree, key).map(|entry| entry.key())
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(3, 3).unwrap();
    /// assert_eq!(map.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&K> {
        bst::min(&self.tree).map(|entry| entry.key())
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(3, 3).unwrap();
    /// assert_eq!(map.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&K> {
        bst::max(&self.tree).map(|entry| entry.key())
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal. Rebalancing has no effect on the order in which entries are yielded.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tables::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(3, 3).unwrap();
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&3, &3)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> TreapMapIter<K, V> {
        TreapMapIter {
            tree_iter: self.tree.iter(),
        }
    }
}

impl<K, V> Table<K, V> for TreapMap<K, V>
where
    K: Ord,
{
    fn len(&self) -> usize {
        TreapMap::len(self)
    }

    fn insert(&mut self, key: K, value: V) -> Result<()> {
        TreapMap::insert(self, key, value)
    }

    fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        TreapMap::remove(self, key)
    }

    fn try_find<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        TreapMap::try_find(self, key)
    }

    fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        TreapMap::get_mut(self, key)
    }

    fn clear(&mut self) {
        TreapMap::clear(self)
    }
}

impl<K, V> IntoIterator for TreapMap<K, V>
where
    K: Ord,
{
    type Item = (K, V);
    type IntoIter = TreapMapIntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        TreapMapIntoIter {
            tree_iter: self.tree.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a TreapMap<K, V>
where
    K: 'a + Ord,
    V: 'a,
{
    type Item = (&'a K, &'a V);
    type IntoIter = TreapMapIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `TreapMap<K, V>`.
///
/// This iterator traverses the elements of the map in-order and yields owned entries.
pub struct TreapMapIntoIter<K, V> {
    tree_iter: IntoIter<PriorityEntry<K, V>>,
}

impl<K, V> Iterator for TreapMapIntoIter<K, V>
where
    K: Ord,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next().map(|entry| entry.into_pair())
    }
}

/// An iterator for `TreapMap<K, V>`.
///
/// This iterator traverses the elements of the map in-order and yields immutable references.
pub struct TreapMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    tree_iter: Iter<'a, PriorityEntry<K, V>>,
}

impl<'a, K, V> Iterator for TreapMapIter<'a, K, V>
where
    K: 'a + Ord,
    V: 'a,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next().map(|entry| (entry.key(), entry.value()))
    }
}

impl<K, V> Default for TreapMap<K, V>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K, V, Q> Index<&'a Q> for TreapMap<K, V>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        self.try_find(key).expect("Error: key does not exist.")
    }
}

impl<'a, K, V, Q> IndexMut<&'a Q> for TreapMap<K, V>
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
    use super::TreapMap;
    use crate::arena::Handle;
    use crate::table::Error;
    use crate::treap::tree::is_heap_ok;

    fn assert_heap_ordered(map: &TreapMap<u32, u32>) {
        let mut stack: Vec<Handle> = map.tree.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            assert!(is_heap_ok(&map.tree, node));
            stack.extend(map.tree.left(node));
            stack.extend(map.tree.right(node));
        }
    }

    #[test]
    fn test_len_empty() {
        let map: TreapMap<u32, u32> = TreapMap::new();
        assert_eq!(map.len(), 0);
        assert_eq!(map.height(), 0);
    }

    #[test]
    fn test_min_max_empty() {
        let map: TreapMap<u32, u32> = TreapMap::new();
        assert_eq!(map.min(), None);
        assert_eq!(map.max(), None);
    }

    #[test]
    fn test_insert() {
        let mut map = TreapMap::new();
        assert_eq!(map.insert(1, 1), Ok(()));
        assert!(map.contains_key(&1));
        assert_eq!(map.get(&1), Ok(&1));
    }

    #[test]
    fn test_insert_duplicate() {
        let mut map = TreapMap::with_seed([1, 1, 1, 1]);
        for key in 0..32 {
            map.insert(key, key).unwrap();
        }
        let before = map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<(u32, u32)>>();
        let height = map.height();

        assert_eq!(map.insert(7, 0), Err(Error::DuplicateKey));
        assert_eq!(map.len(), 32);
        assert_eq!(map.height(), height);
        assert_eq!(map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<(u32, u32)>>(), before);
    }

    #[test]
    fn test_heap_order_after_insertions() {
        let mut map = TreapMap::with_seed([1, 1, 1, 1]);
        for key in 0..500 {
            map.insert(key, key).unwrap();
            if key % 50 == 0 {
                assert_heap_ordered(&map);
            }
        }
        assert_heap_ordered(&map);
    }

    #[test]
    fn test_remove() {
        let mut map = TreapMap::new();
        map.insert(1, 1).unwrap();
        assert_eq!(map.remove(&1), Ok(1));
        assert!(!map.contains_key(&1));
        assert_eq!(map.get(&1), Err(Error::MissingKey));
        assert_eq!(map.remove(&1), Err(Error::MissingKey));
    }

    #[test]
    fn test_remove_keeps_heap_order() {
        let mut map = TreapMap::with_seed([3, 1, 4, 1]);
        for key in 0..200 {
            map.insert(key, key * 2).unwrap();
        }
        for key in (0..200).filter(|key| key % 3 == 0) {
            assert_eq!(map.remove(&key), Ok(key * 2));
        }
        assert_heap_ordered(&map);
        assert_eq!(map.len(), 133);
        assert!(map.iter().all(|(key, value)| key % 3 != 0 && *value == key * 2));
    }

    #[test]
    fn test_ascending_insertions_stay_shallow() {
        let mut map = TreapMap::with_seed([1, 1, 1, 1]);
        for key in 0..1000 {
            map.insert(key, key).unwrap();
        }
        // 10 * log2(1000)
        assert!(map.height() < 100);
    }

    #[test]
    fn test_min_max() {
        let mut map = TreapMap::new();
        map.insert(1, 1).unwrap();
        map.insert(3, 3).unwrap();
        map.insert(5, 5).unwrap();

        assert_eq!(map.min(), Some(&1));
        assert_eq!(map.max(), Some(&5));
    }

    #[test]
    fn test_get_mut() {
        let mut map = TreapMap::new();
        map.insert(1, 1).unwrap();
        {
            let value = map.get_mut(&1);
            *value.unwrap() = 3;
        }
        assert_eq!(map.get(&1), Ok(&3));
    }

    #[test]
    fn test_index() {
        let mut map = TreapMap::new();
        map.insert(1, 1).unwrap();
        map[&1] += 1;
        assert_eq!(map[&1], 2);
    }

    #[test]
    fn test_floor_ceil() {
        let mut map = TreapMap::new();
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
        let mut map = TreapMap::new();
        map.clear();
        assert!(map.is_empty());

        map.insert(1, 1).unwrap();
        map.insert(2, 2).unwrap();
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.try_find(&2), None);
    }

    #[test]
    fn test_clone() {
        let mut map = TreapMap::with_seed([1, 1, 1, 1]);
        map.insert(1, 1).unwrap();
        map.insert(2, 2).unwrap();

        let mut copy = map.clone();
        copy[&1] = 10;
        copy.insert(3, 3).unwrap();
        map.insert(3, 3).unwrap();

        assert_eq!(map.get(&1), Ok(&1));
        assert_eq!(copy.get(&1), Ok(&10));
        assert_eq!(map.height(), copy.height());
    }

    #[test]
    fn test_into_iter() {
        let mut map = TreapMap::new();
        map.insert(1, 2).unwrap();
        map.insert(5, 6).unwrap();
        map.insert(3, 4).unwrap();

        assert_eq!(map.into_iter().collect::<Vec<(u32, u32)>>(), vec![(1, 2), (3, 4), (5, 6)]);
    }

    #[test]
    fn test_iter() {
        let mut map = TreapMap::new();
        for key in &[5, 3, 8, 1, 4] {
            map.insert(*key, *key).unwrap();
        }

        assert_eq!(
            map.iter().map(|(key, _)| *key).collect::<Vec<u32>>(),
            vec![1, 3, 4, 5, 8],
        );
    }
}
