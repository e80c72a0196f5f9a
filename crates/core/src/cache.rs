//! In-memory TTL memoization for scraped resources.
//!
//! The cache is volatile and lives for the process lifetime only. One TTL is
//! shared across all keys, fixed at construction. Entries are replaced
//! wholesale on refresh, never mutated in place.
//!
//! Failures are never stored: a refresh that errors falls back to the
//! previous value if one exists (however old), so a transient origin failure
//! cannot stick for a full TTL.
//!
//! Concurrent callers hitting the same expired key may both invoke the
//! refresh; the last writer wins. The refresh is idempotent, so this is an
//! accepted race rather than a correctness problem.

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

struct Entry<V> {
    stored_at: Instant,
    value: Arc<V>,
}

/// TTL-keyed memoization store.
///
/// Constructed explicitly and passed to whatever composes the pipeline, so
/// tests can build a fresh instance each.
pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, Entry<V>>>,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Copy + Debug,
{
    pub fn new(ttl: Duration) -> Self {
        Self { entries: RwLock::new(HashMap::new()), ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the live value for `key`, refreshing it first if the entry is
    /// missing or older than the TTL.
    ///
    /// On refresh failure the previous value is served stale when one exists;
    /// otherwise the error propagates to the caller.
    pub async fn get_or_refresh<F, Fut, E>(&self, key: K, refresh: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get_fresh(key).await {
            tracing::debug!(?key, "cache hit");
            return Ok(value);
        }

        match refresh().await {
            Ok(value) => {
                let value = Arc::new(value);
                let mut entries = self.entries.write().await;
                entries.insert(key, Entry { stored_at: Instant::now(), value: value.clone() });
                Ok(value)
            }
            Err(err) => {
                let entries = self.entries.read().await;
                if let Some(entry) = entries.get(&key) {
                    tracing::warn!(?key, age_secs = entry.stored_at.elapsed().as_secs(), "refresh failed, serving stale entry");
                    return Ok(entry.value.clone());
                }
                Err(err)
            }
        }
    }

    async fn get_fresh(&self, key: K) -> Option<Arc<V>> {
        let entries = self.entries.read().await;
        let entry = entries.get(&key)?;
        (entry.stored_at.elapsed() < self.ttl).then(|| entry.value.clone())
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_computes_once_within_ttl() {
        let cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cache
                .get_or_refresh("placements", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>(7)
                })
                .await
                .unwrap();
            assert_eq!(*value, 7);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_recomputes_after_expiry() {
        let cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_millis(30));
        let calls = AtomicUsize::new(0);

        let refresh = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(1)
        };
        cache.get_or_refresh("about", refresh).await.unwrap();

        tokio::time::sleep(Duration::from_millis(60)).await;

        let refresh = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(2)
        };
        let value = cache.get_or_refresh("about", refresh).await.unwrap();

        assert_eq!(*value, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let result = cache
                .get_or_refresh("admissions", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err::<u32, _>("boom".to_string())
                })
                .await;
            assert!(result.is_err());
        }

        // each failing call re-invoked the refresh, nothing was stored
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_stale_value_served_when_refresh_fails() {
        let cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_millis(30));

        cache
            .get_or_refresh("placements", || async { Ok::<_, String>(42) })
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(60)).await;

        let value = cache
            .get_or_refresh("placements", || async { Err::<u32, _>("origin down".to_string()) })
            .await
            .unwrap();

        assert_eq!(*value, 42);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_secs(60));
        cache
            .get_or_refresh("about", || async { Ok::<_, String>(1) })
            .await
            .unwrap();
        assert_eq!(cache.len().await, 1);

        cache.clear().await;
        assert_eq!(cache.len().await, 0);
    }
}
