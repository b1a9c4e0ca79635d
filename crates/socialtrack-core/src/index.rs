//! KeyIndex: the associative container behind node lookup and search
//! bookkeeping.
//!
//! Backed by an [`IndexMap`], so lookups are amortized O(1) and iteration
//! follows insertion order. A key maps to at most one value; `put`
//! overwrites.

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;

use crate::error::CoreError;

/// Hash-indexed map from a key to an owned value.
#[derive(Debug, Clone)]
pub struct KeyIndex<K, V> {
    entries: IndexMap<K, V>,
}

impl<K, V> KeyIndex<K, V>
where
    K: Hash + Eq + fmt::Debug,
{
    pub fn new() -> Self {
        KeyIndex {
            entries: IndexMap::new(),
        }
    }

    /// Inserts `value` under `key`, returning the value it replaced.
    ///
    /// An overwritten key keeps its original iteration position.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Looks up the value for `key`.
    ///
    /// Returns [`CoreError::NotFound`] if the key is absent.
    pub fn get(&self, key: &K) -> Result<&V, CoreError> {
        self.entries.get(key).ok_or_else(|| CoreError::not_found(key))
    }

    /// Mutable lookup; same failure mode as [`get`](Self::get).
    pub fn get_mut(&mut self, key: &K) -> Result<&mut V, CoreError> {
        match self.entries.get_mut(key) {
            Some(value) => Ok(value),
            None => Err(CoreError::not_found(key)),
        }
    }

    /// Optional lookup for callers that treat a miss as a normal case.
    pub fn find(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }
}

impl<K, V> Default for KeyIndex<K, V>
where
    K: Hash + Eq + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get() {
        let mut index = KeyIndex::new();
        assert_eq!(index.put("a", 1), None);
        assert_eq!(index.get(&"a"), Ok(&1));
        assert!(index.contains_key(&"a"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn put_overwrites_without_growing() {
        let mut index = KeyIndex::new();
        index.put('x', 1.0);
        assert_eq!(index.put('x', 2.5), Some(1.0));
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(&'x'), Ok(&2.5));
    }

    #[test]
    fn missing_key_is_not_found() {
        let index: KeyIndex<&str, u32> = KeyIndex::new();
        assert_eq!(
            index.get(&"ghost"),
            Err(CoreError::NotFound {
                key: "\"ghost\"".into()
            })
        );
        assert!(index.find(&"ghost").is_none());
        assert!(!index.contains_key(&"ghost"));
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut index = KeyIndex::new();
        index.put(1u32, vec!['a']);
        index.get_mut(&1).unwrap().push('b');
        assert_eq!(index.get(&1).unwrap(), &vec!['a', 'b']);
        assert!(index.get_mut(&2).is_err());
    }

    #[test]
    fn iteration_follows_first_insertion() {
        let mut index = KeyIndex::new();
        index.put("c", 3);
        index.put("a", 1);
        index.put("b", 2);
        index.put("c", 30);
        let keys: Vec<_> = index.keys().copied().collect();
        assert_eq!(keys, vec!["c", "a", "b"]);
        let values: Vec<_> = index.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![30, 1, 2]);
    }
}
