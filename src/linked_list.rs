//! Singly linked list used as a bucket by [`ChainingMap`](crate::ChainingMap).

use std::{fmt, iter::FusedIterator};

/// A node of a [`LinkedList`], owned by its predecessor or by the list head
#[derive(Debug, Clone)]
pub struct Node<V> {
    /// The key stored in the node
    key: String,
    /// The value associated with the key
    value: V,
    /// The rest of the chain
    next: Option<Box<Self>>,
}

impl<V> Node<V> {
    /// Returns the node's key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the node's value
    #[must_use]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns a mutable reference to the node's value
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }
}

/// An owned singly linked list of key-value nodes.
///
/// The list itself does not check for duplicate keys; [`ChainingMap`](crate::ChainingMap)
/// only inserts keys it has just looked up and not found.
#[derive(Debug, Clone)]
pub struct LinkedList<V> {
    /// First node of the chain
    head: Option<Box<Node<V>>>,
    /// Number of nodes in the chain
    len: usize,
}

impl<V> Default for LinkedList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> LinkedList<V> {
    /// Creates an empty list
    #[must_use]
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Returns the number of nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Pushes a new node at the front of the list
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { key: key.into(), value, next }));
        self.len = self.len.saturating_add(1);
    }

    /// Unlinks the first node holding `key` and returns its value
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let mut link = &mut self.head;
        while link.as_ref().is_some_and(|node| node.key != key) {
            link = &mut link.as_mut()?.next;
        }

        let node = link.take()?;
        let Node { value, next, .. } = *node;
        *link = next;
        self.len = self.len.saturating_sub(1);

        Some(value)
    }

    /// Returns the node holding `key`, if any
    #[must_use]
    pub fn contains(&self, key: &str) -> Option<&Node<V>> {
        self.iter().find(|node| node.key == key)
    }

    /// Returns the node holding `key` for in-place updates
    pub fn contains_mut(&mut self, key: &str) -> Option<&mut Node<V>> {
        let mut link = self.head.as_deref_mut();
        while let Some(node) = link {
            if node.key == key {
                return Some(node);
            }
            link = node.next.as_deref_mut();
        }
        None
    }

    /// Returns an iterator over the nodes, front to back
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { next: self.head.as_deref() }
    }

    /// Moves every pair out of the list, front to back
    pub(crate) fn drain(&mut self) -> Drain<V> {
        self.len = 0;
        Drain { next: self.head.take() }
    }
}

impl<V> Drop for LinkedList<V> {
    fn drop(&mut self) {
        // Unlink node by node so long chains do not recurse
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

impl<'a, V> IntoIterator for &'a LinkedList<V> {
    type Item = &'a Node<V>;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Display> fmt::Display for LinkedList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SLL [")?;
        for (position, node) in self.iter().enumerate() {
            if position > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}: {}", node.key, node.value)?;
        }
        f.write_str("]")
    }
}

/// Iterator over the nodes of a [`LinkedList`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Next node to yield
    next: Option<&'a Node<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a Node<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(node)
    }
}

impl<V> FusedIterator for Iter<'_, V> {}

/// Owning iterator produced by [`LinkedList::drain`]
#[derive(Debug)]
pub(crate) struct Drain<V> {
    /// Remaining chain
    next: Option<Box<Node<V>>>,
}

impl<V> Iterator for Drain<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next.take()?;
        let Node { key, value, next } = *node;
        self.next = next;
        Some((key, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_at_front() {
        let mut list = LinkedList::new();
        list.insert("a", 1);
        list.insert("b", 2);
        list.insert("c", 3);

        let keys: Vec<&str> = list.iter().map(Node::key).collect();
        assert_eq!(keys, vec!["c", "b", "a"]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_contains() {
        let mut list = LinkedList::new();
        assert!(list.contains("a").is_none());

        list.insert("a", 1);
        list.insert("b", 2);

        assert_eq!(list.contains("a").map(Node::value), Some(&1));
        assert!(list.contains("z").is_none());
    }

    #[test]
    fn test_contains_mut() {
        let mut list = LinkedList::new();
        list.insert("a", 1);
        list.insert("b", 2);

        if let Some(node) = list.contains_mut("a") {
            *node.value_mut() += 10;
        }

        assert_eq!(list.contains("a").map(Node::value), Some(&11));
        assert!(list.contains_mut("z").is_none());
    }

    #[test]
    fn test_remove_head_middle_tail() {
        let mut list = LinkedList::new();
        for (i, key) in ["a", "b", "c", "d"].into_iter().enumerate() {
            list.insert(key, i);
        }

        assert_eq!(list.remove("d"), Some(3));
        assert_eq!(list.remove("b"), Some(1));
        assert_eq!(list.remove("a"), Some(0));
        assert_eq!(list.remove("a"), None);

        let keys: Vec<&str> = list.iter().map(Node::key).collect();
        assert_eq!(keys, vec!["c"]);
        assert_eq!(list.len(), 1);

        assert_eq!(list.remove("c"), Some(2));
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_drain() {
        let mut list = LinkedList::new();
        list.insert("a", 1);
        list.insert("b", 2);

        let pairs: Vec<(String, i32)> = list.drain().collect();
        assert_eq!(pairs, vec![("b".to_string(), 2), ("a".to_string(), 1)]);
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_display() {
        let mut list = LinkedList::new();
        assert_eq!(list.to_string(), "SLL []");

        list.insert("a", 1);
        list.insert("b", 2);
        assert_eq!(list.to_string(), "SLL [b: 2 -> a: 1]");
    }

    #[test]
    fn test_long_chain_drop() {
        let mut list = LinkedList::new();
        for i in 0..200_000 {
            list.insert(i.to_string(), i);
        }
        assert_eq!(list.len(), 200_000);
        drop(list);
    }
}
