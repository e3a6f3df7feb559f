use std::{fmt, iter::FusedIterator, mem};

use log::debug;

use crate::{
    hash::{HashFunction, hash_function_1},
    linked_list::{self, LinkedList},
    prime::{coerce_capacity, next_prime},
};

/// Capacity used by [`ChainingMap::default`]
pub const DEFAULT_CAPACITY: usize = 11;

/// A string-keyed hash map resolving collisions with a linked list per bucket.
///
/// An insert that would bring the load factor to 1.0 first doubles the
/// capacity (rounded to a prime) and rehashes every entry. Unlike
/// [`OpenAddressingMap`](crate::OpenAddressingMap), an explicit
/// [`resize_table`](Self::resize_table) may go below the current size.
#[derive(Debug, Clone)]
pub struct ChainingMap<V> {
    /// One chain per bucket; the length is the capacity and is always prime or 2
    buckets: Vec<LinkedList<V>>,
    /// Current number of entries across all chains
    size: usize,
    /// Hash applied to every key before reducing it modulo the capacity
    hash_function: HashFunction,
}

impl<V> Default for ChainingMap<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, hash_function_1)
    }
}

impl<V> ChainingMap<V> {
    /// Creates an empty map with `next_prime(capacity)` buckets
    #[must_use]
    pub fn new(capacity: usize, hash_function: HashFunction) -> Self {
        Self::with_exact_capacity(next_prime(capacity), hash_function)
    }

    /// Creates an empty map with exactly `capacity` buckets (at least 2)
    fn with_exact_capacity(capacity: usize, hash_function: HashFunction) -> Self {
        let capacity = capacity.max(2);
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, LinkedList::new);

        Self { buckets, size: 0, hash_function }
    }

    /// Index of the bucket `key` belongs to
    #[allow(clippy::arithmetic_side_effects)]
    fn bucket_index(&self, key: &str) -> usize {
        // `buckets` is never empty
        (self.hash_function)(key) % self.buckets.len().max(1)
    }

    /// The bucket `key` belongs to
    fn bucket(&self, key: &str) -> Option<&LinkedList<V>> {
        self.buckets.get(self.bucket_index(key))
    }

    /// The bucket `key` belongs to, mutably
    fn bucket_mut(&mut self, key: &str) -> Option<&mut LinkedList<V>> {
        let index = self.bucket_index(key);
        self.buckets.get_mut(index)
    }

    /// Inserts or updates a key-value pair.
    ///
    /// Updating an existing key never resizes. Inserting a new key resizes to
    /// twice the capacity first when the new entry would bring the load factor
    /// to 1.0.
    pub fn put(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();

        if let Some(existing) = self.get_mut(&key) {
            *existing = value;
            return;
        }

        if self.size.saturating_add(1) >= self.buckets.len() {
            self.resize_table(self.buckets.len().saturating_mul(2));
        }

        if let Some(bucket) = self.bucket_mut(&key) {
            bucket.insert(key, value);
            self.size = self.size.saturating_add(1);
        }
    }

    /// Retrieve a value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.bucket(key)?.contains(key).map(linked_list::Node::value)
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.bucket_mut(key)?.contains_mut(key).map(linked_list::Node::value_mut)
    }

    /// Returns true if the map holds an entry for `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes a key from its bucket and returns its value
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let removed = self.bucket_mut(key)?.remove(key)?;
        self.size = self.size.saturating_sub(1);
        Some(removed)
    }

    /// Rebuilds the table with `new_capacity` buckets, rounded up to a prime.
    ///
    /// Requests below 1 are ignored; 2 is kept as 2. There is no floor at the
    /// current size: the fresh map grows through its own inserts if the
    /// request was too small, so the load factor invariant still holds.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < 1 {
            debug!("ignoring resize of chaining table to {new_capacity}");
            return;
        }

        let old_capacity = self.buckets.len();
        let mut resized = Self::with_exact_capacity(coerce_capacity(new_capacity), self.hash_function);

        for mut bucket in mem::take(&mut self.buckets) {
            for (key, value) in bucket.drain() {
                resized.put(key, value);
            }
        }

        debug!(
            "resized chaining table from {old_capacity} to {} buckets ({} entries)",
            resized.buckets.len(),
            resized.size
        );

        *self = resized;
    }

    /// Returns the current load factor of the map
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Returns the number of buckets with no entries
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|bucket| bucket.is_empty()).count()
    }

    /// Collects every pair in bucket order, then chain order
    #[must_use]
    pub fn get_keys_and_values(&self) -> Vec<(&str, &V)> {
        self.items().collect()
    }

    /// Clears the map, keeping its capacity
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            *bucket = LinkedList::new();
        }
        self.size = 0;
    }

    /// Returns the number of entries
    #[must_use]
    pub fn get_size(&self) -> usize {
        self.size
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn get_capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns true if the map holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Length of the longest chain
    #[must_use]
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(LinkedList::len).max().unwrap_or(0)
    }

    /// Lazily walks every pair, bucket by bucket
    #[must_use]
    pub fn items(&self) -> Items<'_, V> {
        Items { buckets: self.buckets.iter(), chain: None }
    }
}

impl<K, V> Extend<(K, V)> for ChainingMap<V>
where
    K: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ChainingMap<V>
where
    K: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<'a, V> IntoIterator for &'a ChainingMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Items<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.items()
    }
}

impl<V: fmt::Display> fmt::Display for ChainingMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, bucket) in self.buckets.iter().enumerate() {
            writeln!(f, "{index}: {bucket}")?;
        }
        Ok(())
    }
}

/// Iterator over the pairs of a [`ChainingMap`], in bucket order then chain order
#[derive(Debug, Clone)]
pub struct Items<'a, V> {
    /// Buckets not yet entered
    buckets: std::slice::Iter<'a, LinkedList<V>>,
    /// Remaining nodes of the current bucket
    chain: Option<linked_list::Iter<'a, V>>,
}

impl<'a, V> Iterator for Items<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.chain.as_mut().and_then(Iterator::next) {
                return Some((node.key(), node.value()));
            }
            self.chain = Some(self.buckets.next()?.iter());
        }
    }
}

impl<V> FusedIterator for Items<'_, V> {}
