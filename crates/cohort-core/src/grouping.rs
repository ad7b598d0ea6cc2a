//! Insertion-ordered grouping used by the aggregators.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

/// A map from group key to accumulator that remembers the order in which
/// keys were first seen.
///
/// Lookups go through the map and the order lives in a separate key list,
/// so grouping stays linear in the number of records.
///
/// New keys start from `V::default()`, so accumulators must treat their
/// default as the empty group.
#[derive(Debug, Clone)]
pub struct OrderedGroups<K, V> {
    values: HashMap<K, V>,
    order: Vec<K>,
}

impl<K: Eq + Hash + Clone, V: Default> OrderedGroups<K, V> {
    /// Create an empty grouping.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Accumulator for `key`, inserted on first encounter.
    pub fn entry(&mut self, key: K) -> &mut V {
        match self.values.entry(key) {
            Entry::Occupied(slot) => slot.into_mut(),
            Entry::Vacant(slot) => {
                self.order.push(slot.key().clone());
                slot.insert(V::default())
            }
        }
    }

    /// Number of distinct keys seen.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no key has been seen.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Consume the grouping, yielding `(key, accumulator)` pairs in
    /// first-encounter order.
    pub fn into_ordered(self) -> Vec<(K, V)> {
        let Self { mut values, order } = self;
        order
            .into_iter()
            .filter_map(|key| values.remove(&key).map(|value| (key, value)))
            .collect()
    }
}

impl<K: Eq + Hash + Clone, V: Default> Default for OrderedGroups<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_encounter_order() {
        let mut groups: OrderedGroups<&str, u32> = OrderedGroups::new();
        for key in ["c", "a", "c", "b", "a", "c"] {
            let slot = groups.entry(key);
            *slot = slot.saturating_add(1);
        }
        assert_eq!(groups.len(), 3);
        assert_eq!(groups.into_ordered(), vec![("c", 3), ("a", 2), ("b", 1)]);
    }

    #[test]
    fn empty_grouping_yields_nothing() {
        let groups: OrderedGroups<u8, u8> = OrderedGroups::default();
        assert!(groups.is_empty());
        assert!(groups.into_ordered().is_empty());
    }

    #[test]
    fn owned_keys_keep_order_across_many_groups() {
        let mut groups: OrderedGroups<String, usize> = OrderedGroups::new();
        let keys: Vec<String> = (0..50).rev().map(|n| format!("k{n}")).collect();
        for key in keys.iter().chain(keys.iter()) {
            let slot = groups.entry(key.clone());
            *slot = slot.saturating_add(1);
        }
        let ordered = groups.into_ordered();
        assert_eq!(ordered.len(), 50);
        assert!(ordered.iter().map(|(k, _)| k).eq(keys.iter()));
        assert!(ordered.iter().all(|(_, count)| *count == 2));
    }
}
