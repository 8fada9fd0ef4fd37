use std::collections::BTreeMap;
use std::fmt;

/// A specialized map that stores non-zero integers.
/// - All mutating methods will remove keys when their value is zeroed
/// - Getting a nonexistent key returns 0
/// - Iteration is ordered by key, so anything folded over a Counter is reproducible
#[derive(Clone, PartialEq, Eq)]
pub struct Counter<K: Ord + Clone> {
    counts: BTreeMap<K, i32>,
}

impl<K: Ord + Clone> Default for Counter<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone> Counter<K> {
    /// Creates a new empty Counter
    pub fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }

    /// Gets the count for a key, returning 0 if the key doesn't exist
    pub fn get(&self, key: &K) -> i32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Sets the count for a key, removing it if the value is 0
    pub fn set(&mut self, key: K, value: i32) {
        if value == 0 {
            self.counts.remove(&key);
        } else {
            self.counts.insert(key, value);
        }
    }

    /// Adds a value to the count for a key
    pub fn add(&mut self, key: K, value: i32) {
        let current = self.get(&key);
        self.set(key, current + value);
    }

    /// Adds all counts from another Counter
    pub fn add_all(&mut self, other: &Counter<K>) {
        for (key, value) in &other.counts {
            self.add(key.clone(), *value);
        }
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.counts.contains_key(key)
    }

    pub fn values(&self) -> impl Iterator<Item = i32> + '_ {
        self.counts.values().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, i32)> + '_ {
        self.counts.iter().map(|(key, value)| (key, *value))
    }

    /// Returns the sum of all values
    pub fn sum_values(&self) -> i32 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }
}

impl<K: Ord + Clone + fmt::Display> fmt::Debug for Counter<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Counter {{")?;
        for (key, value) in &self.counts {
            write!(f, " {}: {}", key, value)?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_keys_are_removed() {
        let mut counter = Counter::new();
        counter.add("Flanking".to_string(), 10);
        counter.add("Flanking".to_string(), -10);
        assert!(counter.is_empty());
        assert_eq!(counter.get(&"Flanking".to_string()), 0);
    }

    #[test]
    fn add_all_merges_per_key() {
        let mut first = Counter::new();
        first.add("Tile", 25);
        let mut second = Counter::new();
        second.add("Tile", 25);
        second.add("Fortification", 40);
        first.add_all(&second);
        assert_eq!(first.get(&"Tile"), 50);
        assert_eq!(first.get(&"Fortification"), 40);
        assert_eq!(first.sum_values(), 90);
    }
}
