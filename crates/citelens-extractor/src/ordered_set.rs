//! Insertion-ordered set used for first-seen deduplication

use std::collections::HashSet;
use std::hash::Hash;

/// A set that remembers the order values were first inserted
#[derive(Debug, Clone)]
pub struct OrderedSet<T> {
    seen: HashSet<T>,
    order: Vec<T>,
}

impl<T: Eq + Hash + Clone> OrderedSet<T> {
    /// Create an empty set
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
            order: Vec::new(),
        }
    }

    /// Insert a value; returns false if it was already present
    pub fn insert(&mut self, value: T) -> bool {
        if self.seen.contains(&value) {
            return false;
        }
        self.seen.insert(value.clone());
        self.order.push(value);
        true
    }

    /// Whether `value` has been inserted
    pub fn contains(&self, value: &T) -> bool {
        self.seen.contains(value)
    }

    /// Number of distinct values
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing has been inserted
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate in first-seen order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.order.iter()
    }

    /// Consume into a vector in first-seen order
    pub fn into_vec(self) -> Vec<T> {
        self.order
    }
}

impl<T: Eq + Hash + Clone> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_first_seen_order() {
        let set: OrderedSet<&str> = ["b", "a", "b", "c", "a"].into_iter().collect();
        assert_eq!(set.into_vec(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_insert_reports_novelty() {
        let mut set = OrderedSet::new();
        assert!(set.insert(1));
        assert!(!set.insert(1));
        assert!(set.contains(&1));
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());
    }
}
