//! Memoized allocation keyed by a fingerprint of (dataset, rules, order).
//!
//! The allocator is re-run on every rule edit, reorder, or dataset reload.
//! Callers that re-render on unrelated state changes can route through this
//! cache instead of recomputing; correctness never depends on it. Payloads
//! are excluded from the fingerprint because they do not affect which
//! flights a rule claims.

use lru::LruCache;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;

use crate::allocation::{allocate, AllocationResult};
use crate::index::ColumnIndex;
use crate::rules::Rule;

const DEFAULT_CAPACITY: usize = 64;

/// LRU cache over allocator runs.
///
/// Relies on [`ColumnIndex::dataset_key`] distinguishing loaded datasets;
/// two different indexes sharing a key would alias.
pub struct AllocationCache {
    cache: LruCache<u64, AllocationResult>,
}

impl AllocationCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: LruCache::new(
                NonZeroUsize::new(capacity.max(1)).expect("cache size must be non-zero"),
            ),
        }
    }

    /// Return the cached result for this (rules, index) pair, running the
    /// allocator on a miss.
    pub fn get_or_compute(&mut self, rules: &[Rule], index: &ColumnIndex) -> AllocationResult {
        let key = fingerprint(rules, index);
        self.cache
            .get_or_insert(key, || allocate(rules, index))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl Default for AllocationCache {
    fn default() -> Self {
        Self::new()
    }
}

fn fingerprint(rules: &[Rule], index: &ColumnIndex) -> u64 {
    let mut hasher = DefaultHasher::new();
    index.dataset_key().hash(&mut hasher);
    rules.len().hash(&mut hasher);
    for rule in rules {
        rule.id.hash(&mut hasher);
        for condition in rule.predicate.conditions() {
            condition.column.hash(&mut hasher);
            condition.values.len().hash(&mut hasher);
            for value in &condition.values {
                value.hash(&mut hasher);
            }
        }
    }
    hasher.finish()
}
