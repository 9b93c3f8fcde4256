//! In-memory response cache keyed by [`ColumnIdentity`].
//!
//! The cache is an explicitly-owned handle: construct one per session and
//! pass it to every [`crate::Explorer`] that should share it. Entries are
//! written only for explorations that complete successfully and are never
//! evicted automatically; bypass is per call (`refresh_cache`) or global
//! (`set_refresh_all`).

use moka::sync::Cache;
use scry_common::models::{ColumnIdentity, QueryResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone)]
pub struct ResponseCache {
    // No TTL, no capacity bound: entries live for the life of the handle.
    entries: Cache<ColumnIdentity, Arc<QueryResult>>,
    refresh_all: Arc<AtomicBool>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self {
            entries: Cache::builder().build(),
            refresh_all: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn get(&self, identity: &ColumnIdentity) -> Option<Arc<QueryResult>> {
        self.entries.get(identity)
    }

    pub fn contains(&self, identity: &ColumnIdentity) -> bool {
        self.entries.contains_key(identity)
    }

    pub fn insert(&self, identity: ColumnIdentity, result: Arc<QueryResult>) {
        self.entries.insert(identity, result);
    }

    pub fn invalidate(&self, identity: &ColumnIdentity) {
        self.entries.invalidate(identity);
    }

    /// Force every subsequent explore through launch+poll until cleared.
    pub fn set_refresh_all(&self, refresh: bool) {
        self.refresh_all.store(refresh, Ordering::Relaxed);
    }

    pub fn refresh_all(&self) -> bool {
        self.refresh_all.load(Ordering::Relaxed)
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scry_common::models::QueryStatus;

    fn complete_result() -> Arc<QueryResult> {
        Arc::new(QueryResult {
            status: QueryStatus::Complete,
            description: None,
            metrics: vec![],
            extra: serde_json::Map::new(),
        })
    }

    #[test]
    fn test_insert_and_get() {
        let cache = ResponseCache::new();
        let identity = ColumnIdentity::new("ds", "tbl", "col");

        assert!(!cache.contains(&identity));
        cache.insert(identity.clone(), complete_result());
        assert!(cache.contains(&identity));
        assert_eq!(
            cache.get(&identity).unwrap().status,
            QueryStatus::Complete
        );
    }

    #[test]
    fn test_handles_share_state() {
        let cache = ResponseCache::new();
        let clone = cache.clone();
        let identity = ColumnIdentity::new("ds", "tbl", "col");

        cache.insert(identity.clone(), complete_result());
        assert!(clone.contains(&identity));

        clone.set_refresh_all(true);
        assert!(cache.refresh_all());
        cache.set_refresh_all(false);
        assert!(!clone.refresh_all());
    }

    #[test]
    fn test_invalidate() {
        let cache = ResponseCache::new();
        let identity = ColumnIdentity::new("ds", "tbl", "col");

        cache.insert(identity.clone(), complete_result());
        cache.invalidate(&identity);
        assert!(!cache.contains(&identity));
    }
}
