//! Memoized matching for presentation layers that re-filter on every change.
//!
//! Results are keyed by an `XxHash64` fingerprint of the filter and are only
//! valid for one member collection, identified by `Arc` pointer identity.
//! Swapping the collection drops every entry.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tracing::trace;
use twox_hash::XxHash64;

use kgdir_core::types::{FilterState, Member};

use crate::matching_indices;

pub const DEFAULT_CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

struct CacheEntry {
    filter: FilterState,
    indices: Arc<[usize]>,
}

pub struct CachedMatcher {
    members: Option<Arc<[Member]>>,
    entries: HashMap<u64, CacheEntry>,
    capacity: usize,
    stats: CacheStats,
}

impl Default for CachedMatcher {
    fn default() -> Self { Self::new(DEFAULT_CAPACITY) }
}

impl CachedMatcher {
    pub fn new(capacity: usize) -> Self {
        Self { members: None, entries: HashMap::new(), capacity: capacity.max(1), stats: CacheStats::default() }
    }

    /// Indices of the members visible under `filter`, ascending.
    pub fn matching(&mut self, members: &Arc<[Member]>, filter: &FilterState) -> Arc<[usize]> {
        if !self.members.as_ref().is_some_and(|cached| Arc::ptr_eq(cached, members)) {
            self.entries.clear();
            self.members = Some(Arc::clone(members));
        }
        let key = fingerprint(filter);
        if let Some(entry) = self.entries.get(&key).filter(|e| e.filter == *filter) {
            self.stats.hits += 1;
            trace!(key, "filter cache hit");
            return Arc::clone(&entry.indices);
        }
        self.stats.misses += 1;
        let indices: Arc<[usize]> = matching_indices(members, filter).into();
        if self.entries.len() >= self.capacity {
            self.entries.clear();
        }
        self.entries.insert(key, CacheEntry { filter: filter.clone(), indices: Arc::clone(&indices) });
        indices
    }

    pub fn stats(&self) -> CacheStats { self.stats }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

pub fn fingerprint(filter: &FilterState) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    filter.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_filters_share_a_fingerprint() {
        let a = FilterState::new().with_category("x").with_category("y");
        let b = FilterState::new().with_category("y").with_category("x");
        assert_eq!(fingerprint(&a), fingerprint(&b));
        assert_ne!(fingerprint(&a), fingerprint(&FilterState::new()));
    }

    #[test]
    fn capacity_is_at_least_one() {
        let mut matcher = CachedMatcher::new(0);
        let members: Arc<[Member]> = Arc::from(Vec::new());
        matcher.matching(&members, &FilterState::new());
        assert_eq!(matcher.len(), 1);
    }
}
