//! # Prime Map
//!
//! String-keyed hash maps built from scratch over prime-sized tables.
//!
//! This crate provides two hash map implementations with the same surface:
//!
//! - `OpenAddressingMap`: quadratic probing with tombstone deletion, kept below half full
//! - `ChainingMap`: separate chaining with a singly linked list per bucket, kept below
//!   one entry per bucket
//!
//! Both round every capacity to a prime and resize by building a fresh table and
//! re-inserting every live entry through the ordinary insert path. `find_mode` is built
//! on `ChainingMap`.
//!
//! ## Basic Usage
//!
//! ```rust
//! use primemap::{OpenAddressingMap, hash_function_1};
//!
//! // Create a new hash map with 11 slots
//! let mut map = OpenAddressingMap::new(11, hash_function_1);
//!
//! // Insert values
//! map.put("apple", 1);
//! map.put("banana", 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.put("apple", 10);
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Remove values
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! assert_eq!(map.get_size(), 1);
//! ```
//!
//! ## Chaining
//!
//! ```rust
//! use primemap::{ChainingMap, find_mode};
//!
//! // Default capacity is 11 buckets with `hash_function_1`
//! let mut map = ChainingMap::default();
//! for i in 0..20 {
//!     map.put(format!("key-{i}"), i);
//! }
//!
//! // The table grew before any insert could fill it
//! assert!(map.table_load() < 1.0);
//! assert_eq!(map.get("key-7"), Some(&7));
//!
//! let (mode, frequency) = find_mode(&["a", "b", "a"]);
//! assert_eq!(mode, vec!["a".to_string()]);
//! assert_eq!(frequency, 2);
//! ```

/// Module implementing the separate chaining hash map
mod chaining;
/// Hash functions for string keys
pub mod hash;
/// Singly linked list used as a chaining bucket
pub mod linked_list;
/// Most-frequent-element search over a chaining map
mod mode;
/// Module implementing the quadratic probing hash map
mod open_addressing;
/// Prime capacity helpers shared by both maps
pub mod prime;
/// Utility traits for the hash maps
mod utils;

pub use chaining::{ChainingMap, DEFAULT_CAPACITY, Items};
pub use hash::{HashFunction, hash_function_1, hash_function_2};
pub use linked_list::{LinkedList, Node};
pub use mode::find_mode;
pub use open_addressing::{Iter, OpenAddressingMap};
pub use utils::HashMapExtensions;
