//! Response caching.
//!
//! Query builders cache the raw JSON of a response, before it is mapped
//! onto a typed record, so changing a record's shape never invalidates
//! stored entries.
//!
//! # Overview
//!
//! - [`CacheStore`]: the key-value collaborator the client writes to
//! - [`InMemoryCache`]: the default in-process store
//! - [`CacheDirective`] and [`CacheTtl`]: a builder's caching mode
//! - [`cache_key`]: the fingerprint of a fully qualified request URL
//! - [`remember_with_ttl`] and [`remember_forever`]: read-through helpers

mod directive;
mod memory;

pub use directive::{CacheDirective, CacheTtl};
pub use memory::{InMemoryCache, SWEEP_THRESHOLD};

use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Prefix shared by every key the client writes.
pub const CACHE_KEY_PREFIX: &str = "openalex_";

/// A key-value store for raw API responses.
///
/// Implementations must be safe to share between tasks. Failures inside a
/// store are the store's concern; the client performs no translation.
pub trait CacheStore: Send + Sync {
    /// Returns the live value stored under `key`.
    fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key`. A `ttl` of `None` keeps it forever.
    fn put(&self, key: &str, value: Value, ttl: Option<Duration>);

    /// Removes `key`.
    fn forget(&self, key: &str);

    /// Removes every entry.
    fn flush(&self);
}

/// Derives the cache key for a fully qualified request URL.
///
/// # Example
///
/// ```rust
/// use openalex::cache::cache_key;
///
/// let a = cache_key("https://api.openalex.org/works?filter=a%3A1");
/// let b = cache_key("https://api.openalex.org/works?filter=a%3A2");
/// assert!(a.starts_with("openalex_"));
/// assert_ne!(a, b);
/// ```
#[must_use]
pub fn cache_key(url: &str) -> String {
    format!("{CACHE_KEY_PREFIX}{:x}", Sha256::digest(url.as_bytes()))
}

/// Returns the value under `key`, or runs `producer` once and stores its result.
///
/// Nothing is stored when the producer fails, returns `None`, or when `ttl`
/// is an absolute deadline that has already passed.
///
/// # Errors
///
/// Propagates the producer's error unchanged.
pub async fn remember_with_ttl<F, Fut, E>(
    store: &dyn CacheStore,
    key: &str,
    ttl: CacheTtl,
    producer: F,
) -> Result<Option<Value>, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Option<Value>, E>>,
{
    if let Some(hit) = store.get(key) {
        tracing::debug!(key, "OpenAlex cache hit");
        return Ok(Some(hit));
    }

    tracing::debug!(key, "OpenAlex cache miss");
    let value = producer().await?;
    if let Some(value) = &value {
        match ttl.remaining(chrono::Utc::now()) {
            Some(remaining) => {
                tracing::debug!(key, ttl = ?remaining, "Storing OpenAlex response");
                store.put(key, value.clone(), Some(remaining));
            }
            None => tracing::debug!(key, "Cache deadline already passed, not storing"),
        }
    }
    Ok(value)
}

/// Returns the value under `key`, or runs `producer` once and stores its
/// result without expiry.
///
/// # Errors
///
/// Propagates the producer's error unchanged.
pub async fn remember_forever<F, Fut, E>(
    store: &dyn CacheStore,
    key: &str,
    producer: F,
) -> Result<Option<Value>, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Option<Value>, E>>,
{
    if let Some(hit) = store.get(key) {
        tracing::debug!(key, "OpenAlex cache hit");
        return Ok(Some(hit));
    }

    tracing::debug!(key, "OpenAlex cache miss");
    let value = producer().await?;
    if let Some(value) = &value {
        tracing::debug!(key, "Storing OpenAlex response forever");
        store.put(key, value.clone(), None);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_cache_key_is_deterministic() {
        let url = "https://api.openalex.org/works?filter=type%3Aarticle";
        assert_eq!(cache_key(url), cache_key(url));
        // prefix + 64 hex chars
        assert_eq!(cache_key(url).len(), CACHE_KEY_PREFIX.len() + 64);
    }

    #[tokio::test]
    async fn test_remember_with_ttl_calls_producer_once() {
        let store = InMemoryCache::new();
        let calls = AtomicUsize::new(0);
        let ttl = CacheTtl::Relative(Duration::from_secs(60));

        for _ in 0..2 {
            let value = remember_with_ttl(&store, "k", ttl, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ()>(Some(json!({"n": 1})))
            })
            .await
            .unwrap();
            assert_eq!(value, Some(json!({"n": 1})));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_remember_forever_calls_producer_once() {
        let store = InMemoryCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            remember_forever(&store, "k", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ()>(Some(json!(true)))
            })
            .await
            .unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_none_and_errors_are_not_stored() {
        let store = InMemoryCache::new();

        let none = remember_forever(&store, "k", || async { Ok::<_, ()>(None) }).await;
        assert_eq!(none, Ok(None));
        assert!(store.is_empty());

        let failed = remember_forever(&store, "k", || async { Err::<Option<Value>, _>("boom") }).await;
        assert_eq!(failed, Err("boom"));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_past_deadline_is_not_stored() {
        let store = InMemoryCache::new();
        let ttl = CacheTtl::Until(Utc::now() - chrono::Duration::seconds(5));

        let value = remember_with_ttl(&store, "k", ttl, || async { Ok::<_, ()>(Some(json!(1))) })
            .await
            .unwrap();

        assert_eq!(value, Some(json!(1)));
        assert!(store.is_empty());
    }
}
