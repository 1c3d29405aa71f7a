//! An in-process [`CacheStore`].

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::cache::CacheStore;

/// Entry count above which `put` sweeps out expired entries.
pub const SWEEP_THRESHOLD: usize = 256;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    expires_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(true, |deadline| deadline > now)
    }
}

/// A mutex-guarded map with per-entry expiry.
///
/// Expired entries are dropped when read, and swept on `put` once the map
/// holds at least [`SWEEP_THRESHOLD`] entries.
///
/// # Example
///
/// ```rust
/// use openalex::cache::{CacheStore, InMemoryCache};
/// use serde_json::json;
///
/// let cache = InMemoryCache::new();
/// cache.put("key", json!({"results": []}), None);
/// assert_eq!(cache.get("key"), Some(json!({"results": []})));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl InMemoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, including ones that have expired but
    /// have not been read or swept since.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CacheStore for InMemoryCache {
    fn get(&self, key: &str) -> Option<Value> {
        let now = Utc::now();
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn put(&self, key: &str, value: Value, ttl: Option<Duration>) {
        let expires_at = ttl.map(|ttl| {
            chrono::Duration::from_std(ttl)
                .ok()
                .and_then(|delta| Utc::now().checked_add_signed(delta))
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
        });
        let mut entries = self.lock();
        if entries.len() >= SWEEP_THRESHOLD {
            let now = Utc::now();
            entries.retain(|_, entry| entry.is_live(now));
        }
        entries.insert(key.to_string(), CacheEntry { value, expires_at });
    }

    fn forget(&self, key: &str) {
        self.lock().remove(key);
    }

    fn flush(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_put_and_get_forever() {
        let cache = InMemoryCache::new();
        cache.put("a", json!(1), None);
        assert_eq!(cache.get("a"), Some(json!(1)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_missing_key() {
        let cache = InMemoryCache::new();
        assert!(cache.get("missing").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_expired_entry_is_evicted_on_read() {
        let cache = InMemoryCache::new();
        cache.put("a", json!(1), Some(Duration::ZERO));
        assert!(cache.get("a").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_put_sweeps_expired_entries_past_threshold() {
        let cache = InMemoryCache::new();
        for i in 0..SWEEP_THRESHOLD {
            cache.put(&format!("stale{i}"), json!(i), Some(Duration::ZERO));
        }
        cache.put("kept", json!("forever"), None);
        assert_eq!(cache.len(), 1);

        cache.put("next", json!(2), Some(Duration::from_secs(60)));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("kept"), Some(json!("forever")));
    }

    #[test]
    fn test_put_below_threshold_keeps_expired_entries() {
        let cache = InMemoryCache::new();
        cache.put("a", json!(1), Some(Duration::ZERO));
        cache.put("b", json!(2), None);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_live_ttl_entry() {
        let cache = InMemoryCache::new();
        cache.put("a", json!("x"), Some(Duration::from_secs(60)));
        assert_eq!(cache.get("a"), Some(json!("x")));
    }

    #[test]
    fn test_forget_and_flush() {
        let cache = InMemoryCache::new();
        cache.put("a", json!(1), None);
        cache.put("b", json!(2), None);

        cache.forget("a");
        assert!(cache.get("a").is_none());
        assert_eq!(cache.get("b"), Some(json!(2)));

        cache.flush();
        assert!(cache.is_empty());
    }
}
