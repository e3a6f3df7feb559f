//! Hash functions the maps can be built with.
//!
//! The maps only need a deterministic `&str -> usize`; the two functions here
//! are deliberately simple so that collisions are easy to produce in tests.

/// A key hash. Must be deterministic; every `usize` is a valid result.
pub type HashFunction = fn(&str) -> usize;

/// Sum of the key's code points.
///
/// Anagrams collide, which makes this the weaker of the two.
#[must_use]
pub fn hash_function_1(key: &str) -> usize {
    key.chars().fold(0usize, |hash, letter| hash.wrapping_add(letter as usize))
}

/// Sum of code points weighted by their 1-based position.
#[must_use]
pub fn hash_function_2(key: &str) -> usize {
    key.chars()
        .zip(1usize..)
        .fold(0usize, |hash, (letter, position)| {
            hash.wrapping_add(position.wrapping_mul(letter as usize))
        })
}
