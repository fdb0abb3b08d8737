use std::collections::hash_map;
use std::collections::HashMap;

use ahash::RandomState;

use crate::event::Event;

/// A key together with the number of times it was seen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrequencyEntry<K = String> {
    pub key: K,
    pub count: u64,
}

impl<K> FrequencyEntry<K> {
    pub fn new(key: K, count: u64) -> Self {
        Self { key, count }
    }
}

impl<K> From<(K, u64)> for FrequencyEntry<K> {
    fn from((key, count): (K, u64)) -> Self {
        Self { key, count }
    }
}

/// Exact key -> occurrence count mapping.
///
/// Grows while events are ingested and is read-only afterwards. Final counts
/// only depend on the multiset of keys, never on their arrival order.
#[derive(Debug, Clone, Default)]
pub struct FrequencyMap {
    counts: HashMap<String, u64, RandomState>,
}

impl FrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            counts: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    /// Builds the mapping from an already filtered stream of `(timestamp, key)` pairs.
    pub fn aggregate<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u64, &'a str)>,
    {
        let mut map = Self::new();
        for (_, key) in pairs {
            map.increment(key);
        }
        map
    }

    /// Counts one more occurrence of `key`, inserting it with a count of 1 if absent.
    #[inline]
    pub fn increment(&mut self, key: &str) {
        self.add(key, 1);
    }

    /// Adds `count` occurrences of `key`. The key is only allocated on first sight.
    pub fn add(&mut self, key: &str, count: u64) {
        // Fast path: the key has been seen before
        if let Some(existing) = self.counts.get_mut(key) {
            *existing += count;
            return;
        }
        self.counts.insert(key.to_owned(), count);
    }

    /// Folds the counts of `other` into this map, e.g. after sharded counting.
    pub fn merge(&mut self, other: FrequencyMap) {
        for (key, count) in other.counts {
            *self.counts.entry(key).or_insert(0) += count;
        }
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.counts.get(key).copied()
    }

    /// Sum of all counts, i.e. the number of aggregated events.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(key, count)| (key.as_str(), *count))
    }
}

impl<'a> FromIterator<Event<'a>> for FrequencyMap {
    fn from_iter<I: IntoIterator<Item = Event<'a>>>(events: I) -> Self {
        Self::aggregate(events.into_iter().map(|event| (event.timestamp, event.key)))
    }
}

impl<'a> Extend<Event<'a>> for FrequencyMap {
    fn extend<I: IntoIterator<Item = Event<'a>>>(&mut self, events: I) {
        for event in events {
            self.increment(event.key);
        }
    }
}

pub struct IntoIter {
    inner: hash_map::IntoIter<String, u64>,
}

impl Iterator for IntoIter {
    type Item = FrequencyEntry;

    fn next(&mut self) -> Option<FrequencyEntry> {
        self.inner.next().map(FrequencyEntry::from)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for IntoIter {}

impl IntoIterator for FrequencyMap {
    type Item = FrequencyEntry;
    type IntoIter = IntoIter;

    fn into_iter(self) -> IntoIter {
        IntoIter {
            inner: self.counts.into_iter(),
        }
    }
}
