use std::hash::{Hash, Hasher};

use fnv::{FnvHashMap, FnvHasher};

/// FNV-backed map with insert-if-absent semantics.
pub struct Map<K, V>(pub FnvHashMap<K, V>);

impl<K: Eq + Hash, V> Default for Map<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> Map<K, V> {
    pub fn new() -> Self {
        Self(FnvHashMap::<K, V>::default())
    }

    pub fn insert(&mut self, k: K, data: V) -> Option<V> {
        self.0.insert(k, data)
    }

    /// Inserts `data` under `k` unless an entry exists; returns the stored value.
    pub fn insert_if_absent(&mut self, k: K, data: V) -> &V {
        self.0.entry(k).or_insert(data)
    }

    pub fn get(&self, k: &K) -> Option<&V> {
        self.0.get(k)
    }

    pub fn contains(&self, k: &K) -> bool {
        self.0.contains_key(k)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }
}

/// FNV-1a digest of a value, used to tell key material apart without storing it.
pub fn fingerprint<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher: FnvHasher = FnvHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}
