//! Prime sizing shared by both map variants.
//!
//! Table capacities are always prime so that `hash % capacity` spreads keys
//! whose hashes share small factors, and so that quadratic probing visits
//! enough distinct slots.

/// Returns the first prime at or above `n`, bumping even input to odd first.
///
/// Because even input is bumped before testing, `next_prime(2)` is 3. Callers
/// that must keep 2 as 2 go through [`coerce_capacity`].
#[must_use]
pub fn next_prime(n: usize) -> usize {
    let mut candidate = if n % 2 == 0 { n.saturating_add(1) } else { n };

    while !is_prime(candidate) {
        candidate = candidate.saturating_add(2);
    }

    candidate
}

/// Trial division by odd factors up to the square root of `n`.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }

    if n < 2 || n % 2 == 0 {
        return false;
    }

    let mut factor: usize = 3;
    // `factor <= n / factor` is `factor * factor <= n` without the overflow
    while factor <= n / factor {
        if n % factor == 0 {
            return false;
        }
        factor = factor.saturating_add(2);
    }

    true
}

/// Resize-time coercion: primes (2 included) are kept, anything else goes to
/// [`next_prime`].
pub(crate) fn coerce_capacity(n: usize) -> usize {
    if is_prime(n) { n } else { next_prime(n) }
}
