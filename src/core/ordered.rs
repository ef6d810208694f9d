// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Insertion-ordered map.
//!
//! Runs, events and images are serialized in the order they were first
//! inserted, so the containers holding them must iterate in insertion
//! order rather than hash or sort order. [`OrderedMap`] keeps entries in a
//! `Vec` and a side `HashMap` from key to position for lookups.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// A map that iterates in insertion order.
///
/// Re-inserting an existing key replaces its value but keeps the
/// original position.
#[derive(Debug, Clone)]
pub struct OrderedMap<K, V> {
    entries: Vec<(K, V)>,
    index: HashMap<K, usize>,
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, V> OrderedMap<K, V> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous value for the key if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.index.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Get a value by key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    /// Get a mutable value by key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.get(key) {
            Some(&pos) => Some(&mut self.entries[pos].1),
            None => None,
        }
    }

    /// Get the value for `key`, inserting `make()` at the end if absent.
    pub fn get_or_insert_with(&mut self, key: K, make: impl FnOnce() -> V) -> &mut V {
        let pos = match self.index.get(&key) {
            Some(&pos) => pos,
            None => {
                let pos = self.entries.len();
                self.index.insert(key.clone(), pos);
                self.entries.push((key, make()));
                pos
            }
        };
        &mut self.entries[pos].1
    }

    /// Check whether the key is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Position of the key in insertion order.
    pub fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).copied()
    }
}

impl<K, V> OrderedMap<K, V> {
    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterate over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Entry at a given insertion position.
    pub fn get_index(&self, pos: usize) -> Option<(&K, &V)> {
        self.entries.get(pos).map(|(k, v)| (k, v))
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq + Hash + Clone, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iterates_in_insertion_order() {
        let mut map = OrderedMap::new();
        map.insert(30u32, "c");
        map.insert(10u32, "a");
        map.insert(20u32, "b");
        let keys: Vec<u32> = map.keys().copied().collect();
        assert_eq!(keys, vec![30, 10, 20]);
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let mut map = OrderedMap::new();
        map.insert("x".to_string(), 1);
        map.insert("y".to_string(), 2);
        let old = map.insert("x".to_string(), 3);
        assert_eq!(old, Some(1));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get_index(0), Some((&"x".to_string(), &3)));
        assert_eq!(map.position("y"), Some(1));
    }

    #[test]
    fn test_get_or_insert_with() {
        let mut map: OrderedMap<u8, Vec<u8>> = OrderedMap::new();
        map.get_or_insert_with(1, Vec::new).push(7);
        map.get_or_insert_with(1, Vec::new).push(8);
        assert_eq!(map.get(&1), Some(&vec![7, 8]));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let a: OrderedMap<u8, u8> = [(1, 1), (2, 2)].into_iter().collect();
        let b: OrderedMap<u8, u8> = [(2, 2), (1, 1)].into_iter().collect();
        assert_ne!(a, b);
        assert!(a.contains_key(&2));
        assert!(!a.contains_key(&3));
    }
}
