use std::{fmt, iter::FusedIterator, mem};

use log::{debug, warn};

use crate::{
    hash::HashFunction,
    prime::{coerce_capacity, next_prime},
};

/// A single slot of the backing table
#[derive(Debug, Clone)]
enum Slot<V> {
    /// Never written since construction or the last `clear`
    Empty,
    /// Holds a live key-value pair
    Occupied {
        /// The key in the key-value pair
        key: String,
        /// The value associated with the key
        value: V,
    },
    /// Held a pair that has since been removed; probing continues past it
    Tombstone,
}

impl<V: fmt::Display> fmt::Display for Slot<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("None"),
            Self::Occupied { key, value } => write!(f, "K: {key} V: {value}"),
            Self::Tombstone => f.write_str("TOMBSTONE"),
        }
    }
}

/// Adds two residues of `modulus` without overflowing.
fn add_mod(a: usize, b: usize, modulus: usize) -> usize {
    let (sum, overflowed) = a.overflowing_add(b);
    if overflowed || sum >= modulus { sum.wrapping_sub(modulus) } else { sum }
}

/// The probe sequence `(base + p^2) mod capacity` for `p = 0, 1, ..`, capped at
/// `capacity` probes.
#[derive(Debug, Clone)]
struct QuadraticProbe {
    /// Home slot of the key
    base: usize,
    /// Length of the table being probed, at least 2
    capacity: usize,
    /// Number of probes handed out so far (`p`)
    step: usize,
    /// `p^2 mod capacity`, maintained incrementally
    offset: usize,
}

impl QuadraticProbe {
    /// Starts the sequence for `hash` over a table of `capacity` slots.
    #[allow(clippy::arithmetic_side_effects)]
    fn new(hash: usize, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { base: hash % capacity, capacity, step: 0, offset: 0 }
    }
}

impl Iterator for QuadraticProbe {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.step >= self.capacity {
            return None;
        }

        let index = add_mod(self.base, self.offset, self.capacity);

        // (p + 1)^2 = p^2 + 2p + 1
        let twice = add_mod(self.step, self.step, self.capacity);
        let delta = add_mod(twice, 1, self.capacity);
        self.offset = add_mod(self.offset, delta, self.capacity);
        self.step = self.step.saturating_add(1);

        Some(index)
    }
}

/// A string-keyed hash map using open addressing with quadratic probing.
///
/// Removal leaves a tombstone behind so that probe sequences running through
/// the removed slot keep working. The table stays below half full: an insert
/// that would bring the load factor to 0.5 first doubles the capacity (rounded
/// to a prime) and rehashes every live entry.
///
/// Note: This implementation is not thread-safe.
#[derive(Debug, Clone)]
pub struct OpenAddressingMap<V> {
    /// The backing table; its length is the capacity and is always prime or 2
    slots: Vec<Slot<V>>,
    /// Current number of live entries
    size: usize,
    /// Hash applied to every key before reducing it modulo the capacity
    hash_function: HashFunction,
}

impl<V> OpenAddressingMap<V> {
    /// Creates an empty map with room for `next_prime(capacity)` slots
    #[must_use]
    pub fn new(capacity: usize, hash_function: HashFunction) -> Self {
        Self::with_exact_capacity(next_prime(capacity), hash_function)
    }

    /// Creates an empty map with exactly `capacity` slots (at least 2)
    fn with_exact_capacity(capacity: usize, hash_function: HashFunction) -> Self {
        let capacity = capacity.max(2);
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || Slot::Empty);

        Self { slots, size: 0, hash_function }
    }

    /// Probe sequence for `key` over the current table
    fn probe(&self, key: &str) -> QuadraticProbe {
        QuadraticProbe::new((self.hash_function)(key), self.slots.len())
    }

    /// Finds the live slot holding `key`, with the number of slots examined
    fn find(&self, key: &str) -> Option<(usize, usize)> {
        for (probed, index) in self.probe(key).enumerate() {
            match self.slots.get(index)? {
                // The key would have been placed here, so it is not in the table
                Slot::Empty => return None,
                Slot::Occupied { key: stored, .. } if stored == key => {
                    return Some((index, probed.saturating_add(1)));
                }
                Slot::Occupied { .. } | Slot::Tombstone => {}
            }
        }

        None
    }

    /// True when one more entry would bring the load factor to 0.5 or above
    fn would_overload(&self) -> bool {
        self.size.saturating_add(1).saturating_mul(2) >= self.slots.len()
    }

    /// Inserts or updates a key-value pair.
    ///
    /// Updating an existing key never resizes. Inserting a new key resizes to
    /// twice the capacity first when the new entry would bring the load factor
    /// to 0.5.
    pub fn put(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();

        if let Some(existing) = self.get_mut(&key) {
            *existing = value;
            return;
        }

        if self.would_overload() {
            self.resize_table(self.slots.len().saturating_mul(2));
        }

        self.insert_new(key, value);
    }

    /// Places a key that is known to be absent.
    ///
    /// The first tombstone on the probe path is reused; otherwise the empty
    /// slot that ended the probe is.
    fn insert_new(&mut self, key: String, value: V) {
        let capacity = self.slots.len();
        let mut first_tombstone = None;
        let mut target = None;

        for index in self.probe(&key) {
            match self.slots.get(index) {
                Some(Slot::Empty) => {
                    target = first_tombstone.or(Some(index));
                    break;
                }
                Some(Slot::Tombstone) if first_tombstone.is_none() => {
                    first_tombstone = Some(index);
                }
                _ => {}
            }
        }

        let Some(slot) = target.or(first_tombstone).and_then(|index| self.slots.get_mut(index))
        else {
            warn!("probe budget of {capacity} exhausted, dropping insert of {key:?}");
            return;
        };

        *slot = Slot::Occupied { key, value };
        self.size = self.size.saturating_add(1);
    }

    /// Retrieve a value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        let (index, _) = self.find(key)?;
        match self.slots.get(index)? {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let (index, _) = self.find(key)?;
        match self.slots.get_mut(index)? {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    /// Returns true if the map holds a live entry for `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Removes a key, leaving a tombstone in its slot, and returns its value
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let (index, _) = self.find(key)?;
        let slot = self.slots.get_mut(index)?;

        match mem::replace(slot, Slot::Tombstone) {
            Slot::Occupied { value, .. } => {
                self.size = self.size.saturating_sub(1);
                Some(value)
            }
            other => {
                *slot = other;
                None
            }
        }
    }

    /// Rebuilds the table with `new_capacity` slots, rounded up to a prime.
    ///
    /// Requests below the current size, or below 1, are ignored. Live entries
    /// are re-inserted in slot order into a fresh map, which then replaces
    /// this one; that map may grow further while being filled.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < self.size || new_capacity < 1 {
            debug!(
                "ignoring resize of open addressing table to {new_capacity} (size {})",
                self.size
            );
            return;
        }

        let old_capacity = self.slots.len();
        let mut resized = Self::with_exact_capacity(coerce_capacity(new_capacity), self.hash_function);

        for slot in mem::take(&mut self.slots) {
            if let Slot::Occupied { key, value } = slot {
                resized.put(key, value);
            }
        }

        debug!(
            "resized open addressing table from {old_capacity} to {} slots ({} entries)",
            resized.slots.len(),
            resized.size
        );

        *self = resized;
    }

    /// Returns the current load factor of the map
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.slots.len() as f64
    }

    /// Returns the number of slots without a live entry (tombstones included)
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.slots.iter().filter(|slot| matches!(slot, Slot::Empty | Slot::Tombstone)).count()
    }

    /// Collects every live pair in slot order
    #[must_use]
    pub fn get_keys_and_values(&self) -> Vec<(&str, &V)> {
        self.iter().collect()
    }

    /// Clears the map, keeping its capacity
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.size = 0;
    }

    /// Returns the number of live entries
    #[must_use]
    pub fn get_size(&self) -> usize {
        self.size
    }

    /// Returns the number of slots in the table
    #[must_use]
    pub fn get_capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the map holds no live entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of slots examined to find `key`; 1 means it sits in its home slot
    #[must_use]
    pub fn probe_length(&self, key: &str) -> Option<usize> {
        self.find(key).map(|(_, probed)| probed)
    }

    /// Returns an iterator over the live pairs in slot order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { slots: self.slots.iter() }
    }
}

impl<K, V> Extend<(K, V)> for OpenAddressingMap<V>
where
    K: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<'a, V> IntoIterator for &'a OpenAddressingMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Display> fmt::Display for OpenAddressingMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.slots.iter().enumerate() {
            writeln!(f, "{index}: {slot}")?;
        }
        Ok(())
    }
}

/// Iterator over the live pairs of an [`OpenAddressingMap`], in slot order
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Remaining slots of the table
    slots: std::slice::Iter<'a, Slot<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(|slot| match slot {
            Slot::Occupied { key, value } => Some((key.as_str(), value)),
            Slot::Empty | Slot::Tombstone => None,
        })
    }
}

impl<V> FusedIterator for Iter<'_, V> {}
