use crate::entry::{Entry, TableEntry};

/// A table entry together with the priority it was assigned on insertion.
#[derive(Clone, Debug)]
pub struct PriorityEntry<K, V> {
    pub entry: TableEntry<K, V>,
    pub priority: u32,
}

impl<K, V> PriorityEntry<K, V> {
    pub fn new(key: K, value: V, priority: u32) -> Self {
        PriorityEntry {
            entry: TableEntry::new(key, value),
            priority,
        }
    }
}

impl<K, V> Entry for PriorityEntry<K, V>
where
    K: Ord,
{
    type Key = K;
    type Value = V;

    fn key(&self) -> &K {
        &self.entry.key
    }

    fn value(&self) -> &V {
        &self.entry.value
    }

    fn value_mut(&mut self) -> &mut V {
        &mut self.entry.value
    }

    fn into_pair(self) -> (K, V) {
        self.entry.into_pair()
    }
}
