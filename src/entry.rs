/// Access to the key and value stored in a tree node.
///
/// The binary search tree algorithms are written once against this trait so that tables with
/// different node payloads (plain entries, entries with a priority) share them.
pub trait Entry {
    type Key: Ord;
    type Value;

    fn key(&self) -> &Self::Key;

    fn value(&self) -> &Self::Value;

    fn value_mut(&mut self) -> &mut Self::Value;

    fn into_pair(self) -> (Self::Key, Self::Value);
}

/// A key paired with a value. The key is never handed out mutably.
#[derive(Clone, Debug)]
pub struct TableEntry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> TableEntry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        TableEntry { key, value }
    }
}

impl<K, V> Entry for TableEntry<K, V>
where
    K: Ord,
{
    type Key = K;
    type Value = V;

    fn key(&self) -> &K {
        &self.key
    }

    fn value(&self) -> &V {
        &self.value
    }

    fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    fn into_pair(self) -> (K, V) {
        let TableEntry { key, value } = self;
        (key, value)
    }
}
