use std::mem;
use std::slice;

use crate::frequency::FrequencyEntry;

/// A fixed-capacity container that keeps the `capacity` highest-count entries
/// it has been offered, sorted by count descending.
///
/// Implemented as a flat sorted array rather than a heap so the final top-k can be
/// read back in order without another sort.
///
/// * filling (`len < capacity`): binary search + shift, O(log k + k)
/// * full: O(1) rejection of anything not above the current minimum, otherwise
///   binary search + cascading displacement that evicts the old minimum
///
/// The backing storage is allocated once with room for exactly `capacity` entries
/// and never grows afterwards.
///
/// Entries with equal counts keep their insertion order, and once the container
/// is full an entry equal to the current minimum is rejected, so among equal
/// counts the first admitted entry wins. With `capacity == 0` every `add` is a no-op.
#[derive(Debug, Clone)]
pub struct BoundedTopK<K = String> {
    slots: Vec<FrequencyEntry<K>>,
    capacity: usize,
}

impl<K> BoundedTopK<K> {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    /// The lowest admitted count, held by the last slot.
    pub fn min_count(&self) -> Option<u64> {
        self.slots.last().map(|entry| entry.count)
    }

    // First slot whose count is strictly lower than `count`.
    fn insertion_point(&self, count: u64) -> usize {
        self.slots.partition_point(|entry| entry.count >= count)
    }

    pub fn add(&mut self, entry: FrequencyEntry<K>) {
        // Still some room: insert at the right position, within the reserved storage
        if self.slots.len() < self.capacity {
            let pos = self.insertion_point(entry.count);
            self.slots.insert(pos, entry);
            return;
        }

        let Some(floor) = self.min_count() else {
            return;
        };
        if entry.count <= floor {
            return;
        }

        // Carry each displaced entry one slot down; the old minimum falls off the end
        let pos = self.insertion_point(entry.count);
        let mut carry = entry;
        for slot in &mut self.slots[pos..] {
            mem::swap(slot, &mut carry);
        }
    }

    /// Current contents, highest count first.
    pub fn as_slice(&self) -> &[FrequencyEntry<K>] {
        &self.slots
    }

    pub fn iter(&self) -> slice::Iter<'_, FrequencyEntry<K>> {
        self.slots.iter()
    }

    pub fn into_vec(self) -> Vec<FrequencyEntry<K>> {
        self.slots
    }
}

impl<K> Extend<FrequencyEntry<K>> for BoundedTopK<K> {
    fn extend<I: IntoIterator<Item = FrequencyEntry<K>>>(&mut self, entries: I) {
        for entry in entries {
            self.add(entry);
        }
    }
}

impl<'a, K> IntoIterator for &'a BoundedTopK<K> {
    type Item = &'a FrequencyEntry<K>;
    type IntoIter = slice::Iter<'a, FrequencyEntry<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
