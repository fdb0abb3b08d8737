use std::cmp::Ordering;
use std::fmt;

use crate::bounded::BoundedTopK;
use crate::frequency::{FrequencyEntry, FrequencyMap};

/// Largest `k` for which the bounded container is preferred over a full sort.
pub const DEFAULT_THRESHOLD: usize = 100;

/// How the top-k entries are extracted from a [`FrequencyMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Feed every entry through a [`BoundedTopK`] of capacity `min(k, len)`.
    Bounded,
    /// Sort all entries by count descending, then truncate to `k`.
    FullSort,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Bounded => f.write_str("bounded"),
            Strategy::FullSort => f.write_str("full-sort"),
        }
    }
}

/// Chooses a [`Strategy`] from `k` and runs it.
///
/// Both strategies return the same counts at every rank, and entries with equal
/// counts are reported in key order. Which of several entries tied at the k-th
/// boundary make it into the result is unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopKSelector {
    threshold: usize,
}

impl Default for TopKSelector {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl TopKSelector {
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn strategy_for(&self, k: usize) -> Strategy {
        if k <= self.threshold {
            Strategy::Bounded
        } else {
            Strategy::FullSort
        }
    }

    /// Returns the `min(k, map.len())` highest-count entries, highest first.
    pub fn select(&self, map: FrequencyMap, k: usize) -> Vec<FrequencyEntry> {
        let strategy = self.strategy_for(k);
        log::debug!(
            "selecting top {} of {} distinct keys using {} strategy",
            k,
            map.len(),
            strategy
        );
        select_with(strategy, map, k)
    }
}

/// Runs the given strategy regardless of the threshold.
pub fn select_with(strategy: Strategy, map: FrequencyMap, k: usize) -> Vec<FrequencyEntry> {
    if k == 0 || map.is_empty() {
        return Vec::new();
    }

    let mut top = match strategy {
        Strategy::Bounded => {
            let mut topk = BoundedTopK::new(k.min(map.len()));
            topk.extend(map);
            topk.into_vec()
        }
        Strategy::FullSort => {
            let mut entries: Vec<FrequencyEntry> = map.into_iter().collect();
            entries.sort_unstable_by(by_count_then_key);
            entries.truncate(k);
            entries
        }
    };
    // Hash iteration order is seeded per process; settle ties on the key
    top.sort_by(by_count_then_key);
    top
}

fn by_count_then_key(a: &FrequencyEntry, b: &FrequencyEntry) -> Ordering {
    b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key))
}
