use std::collections::{HashMap, HashSet};

use primemap::{
    ChainingMap, HashFunction, HashMapExtensions, OpenAddressingMap, hash_function_1,
    hash_function_2, prime::is_prime,
};
use proptest::prelude::*;

/// A single mutation applied to a map and to the `std` model alongside it
#[derive(Debug, Clone)]
enum Op {
    Put(String, u32),
    Remove(String),
    Resize(usize),
    Clear,
}

/// Short keys over a small alphabet so that both hash functions collide often
fn key() -> impl Strategy<Value = String> {
    "[a-d]{1,3}"
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (key(), any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
        3 => key().prop_map(Op::Remove),
        1 => (0usize..64).prop_map(Op::Resize),
        1 => Just(Op::Clear),
    ]
}

fn hash_function() -> impl Strategy<Value = HashFunction> {
    prop_oneof![Just::<HashFunction>(hash_function_1), Just::<HashFunction>(hash_function_2)]
}

/// The operations both maps share, so one driver can check either
trait Subject: HashMapExtensions<u32> {
    /// Load factor every insert must stay below
    const MAX_LOAD: f64;

    fn build(capacity: usize, hash_function: HashFunction) -> Self;
    fn put(&mut self, key: &str, value: u32);
    fn get(&self, key: &str) -> Option<&u32>;
    fn remove(&mut self, key: &str) -> Option<u32>;
    fn resize_table(&mut self, capacity: usize);
    fn clear(&mut self);
    fn size(&self) -> usize;
    fn capacity(&self) -> usize;
    fn load(&self) -> f64;
}

impl Subject for OpenAddressingMap<u32> {
    const MAX_LOAD: f64 = 0.5;

    fn build(capacity: usize, hash_function: HashFunction) -> Self {
        Self::new(capacity, hash_function)
    }
    fn put(&mut self, key: &str, value: u32) {
        Self::put(self, key, value);
    }
    fn get(&self, key: &str) -> Option<&u32> {
        Self::get(self, key)
    }
    fn remove(&mut self, key: &str) -> Option<u32> {
        Self::remove(self, key)
    }
    fn resize_table(&mut self, capacity: usize) {
        Self::resize_table(self, capacity);
    }
    fn clear(&mut self) {
        Self::clear(self);
    }
    fn size(&self) -> usize {
        self.get_size()
    }
    fn capacity(&self) -> usize {
        self.get_capacity()
    }
    fn load(&self) -> f64 {
        self.table_load()
    }
}

impl Subject for ChainingMap<u32> {
    const MAX_LOAD: f64 = 1.0;

    fn build(capacity: usize, hash_function: HashFunction) -> Self {
        Self::new(capacity, hash_function)
    }
    fn put(&mut self, key: &str, value: u32) {
        Self::put(self, key, value);
    }
    fn get(&self, key: &str) -> Option<&u32> {
        Self::get(self, key)
    }
    fn remove(&mut self, key: &str) -> Option<u32> {
        Self::remove(self, key)
    }
    fn resize_table(&mut self, capacity: usize) {
        Self::resize_table(self, capacity);
    }
    fn clear(&mut self) {
        Self::clear(self);
    }
    fn size(&self) -> usize {
        self.get_size()
    }
    fn capacity(&self) -> usize {
        self.get_capacity()
    }
    fn load(&self) -> f64 {
        self.table_load()
    }
}

/// Replays `ops` against `M` and a `std` model, checking invariants after each step
fn check_against_model<M: Subject>(
    capacity: usize,
    hash_function: HashFunction,
    ops: &[Op],
) -> Result<(), TestCaseError> {
    let mut map = M::build(capacity, hash_function);
    let mut model: HashMap<String, u32> = HashMap::new();

    for op in ops {
        match op {
            Op::Put(k, v) => {
                map.put(k, *v);
                model.insert(k.clone(), *v);
                prop_assert!(map.load() < M::MAX_LOAD, "load {} after put", map.load());
                prop_assert_eq!(map.get(k), Some(v));
            }
            Op::Remove(k) => {
                prop_assert_eq!(map.remove(k), model.remove(k));
                prop_assert_eq!(map.get(k), None);
            }
            Op::Resize(n) => {
                let before = map.size();
                map.resize_table(*n);
                prop_assert_eq!(map.size(), before);
            }
            Op::Clear => {
                map.clear();
                model.clear();
            }
        }

        prop_assert!(map.capacity() == 2 || is_prime(map.capacity()));
        prop_assert_eq!(map.size(), model.len());

        let keys = map.keys();
        let unique: HashSet<&String> = keys.iter().collect();
        prop_assert_eq!(unique.len(), keys.len(), "duplicate keys in {:?}", keys);

        for (k, v) in &model {
            prop_assert_eq!(map.get(k), Some(v));
        }
    }

    Ok(())
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

proptest! {
    #[test]
    fn open_addressing_matches_model(
        capacity in 0usize..40,
        hash_function in hash_function(),
        ops in prop::collection::vec(op(), 0..200),
    ) {
        init_logger();
        check_against_model::<OpenAddressingMap<u32>>(capacity, hash_function, &ops)?;
    }

    #[test]
    fn chaining_matches_model(
        capacity in 0usize..40,
        hash_function in hash_function(),
        ops in prop::collection::vec(op(), 0..200),
    ) {
        init_logger();
        check_against_model::<ChainingMap<u32>>(capacity, hash_function, &ops)?;
    }

    #[test]
    fn resize_preserves_contents(
        pairs in prop::collection::hash_map(key(), any::<u32>(), 0..30),
        target in 1usize..200,
    ) {
        let mut open = OpenAddressingMap::new(11, hash_function_2);
        let mut chained = ChainingMap::new(11, hash_function_2);
        open.extend(pairs.clone());
        chained.extend(pairs.clone());

        let open_capacity = open.get_capacity();
        open.resize_table(target);
        chained.resize_table(target);

        if target < pairs.len() {
            prop_assert_eq!(open.get_capacity(), open_capacity);
        }
        prop_assert_eq!(open.get_size(), pairs.len());
        prop_assert_eq!(chained.get_size(), pairs.len());
        for (k, v) in &pairs {
            prop_assert_eq!(open.get(k), Some(v));
            prop_assert_eq!(chained.get(k), Some(v));
        }
    }
}

#[test]
fn clear_forgets_every_key() {
    init_logger();
    let mut open = OpenAddressingMap::new(53, hash_function_1);
    let mut chained = ChainingMap::new(53, hash_function_1);
    for i in 0..100 {
        open.put(format!("key{i}"), i);
        chained.put(format!("key{i}"), i);
    }

    open.clear();
    chained.clear();
    open.clear();

    assert_eq!(open.get_size(), 0);
    assert_eq!(chained.get_size(), 0);
    for i in 0..100 {
        assert_eq!(open.get(&format!("key{i}")), None);
        assert_eq!(chained.get(&format!("key{i}")), None);
    }
    assert_eq!(open.empty_buckets(), open.get_capacity());
    assert_eq!(chained.empty_buckets(), chained.get_capacity());
}
