use crate::ChainingMap;

/// Returns the most frequent values of `values` together with their count.
///
/// Every value sharing the highest count is returned, in the order the
/// frequency table's buckets yield them rather than input order. An empty
/// input gives `(vec![], 0)`.
///
/// ```rust
/// use primemap::find_mode;
///
/// let (mode, frequency) = find_mode(&["apple", "apple", "grape", "melon", "peach"]);
/// assert_eq!(mode, vec!["apple".to_string()]);
/// assert_eq!(frequency, 2);
/// ```
#[must_use]
pub fn find_mode<S: AsRef<str>>(values: &[S]) -> (Vec<String>, usize) {
    let mut frequencies: ChainingMap<usize> = ChainingMap::default();

    for value in values {
        let value = value.as_ref();
        match frequencies.get_mut(value) {
            Some(count) => *count = count.saturating_add(1),
            None => frequencies.put(value, 1),
        }
    }

    let mut highest_frequency = 0;
    let mut mode = Vec::new();

    for (key, &count) in frequencies.items() {
        if count > highest_frequency {
            highest_frequency = count;
            mode.clear();
            mode.push(key.to_string());
        } else if count == highest_frequency {
            mode.push(key.to_string());
        }
    }

    (mode, highest_frequency)
}
