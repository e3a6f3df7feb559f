//! Utility trait shared by [`OpenAddressingMap`] and [`ChainingMap`]

use crate::{ChainingMap, OpenAddressingMap};

/// Extension trait for map implementations that provides additional utility methods
pub trait HashMapExtensions<V> {
    /// Returns every live key-value pair in table order
    fn pairs(&self) -> Vec<(&str, &V)>;

    /// Returns true if the map contains the given key
    fn contains_key(&self, key: &str) -> bool;

    /// Returns the keys of the map as a Vec, in table order
    fn keys(&self) -> Vec<String> {
        self.pairs().into_iter().map(|(k, _)| k.to_string()).collect()
    }

    /// Returns the values of the map as a Vec, in table order
    fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.pairs().into_iter().map(|(_, v)| v.clone()).collect()
    }
}

impl<V> HashMapExtensions<V> for OpenAddressingMap<V> {
    fn pairs(&self) -> Vec<(&str, &V)> {
        self.get_keys_and_values()
    }

    fn contains_key(&self, key: &str) -> bool {
        Self::contains_key(self, key)
    }
}

impl<V> HashMapExtensions<V> for ChainingMap<V> {
    fn pairs(&self) -> Vec<(&str, &V)> {
        self.get_keys_and_values()
    }

    fn contains_key(&self, key: &str) -> bool {
        Self::contains_key(self, key)
    }
}
