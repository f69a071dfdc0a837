//! TTL read-through cache
//!
//! Explicit cache component for read-mostly data (the public menu): a
//! freshness window, an injected clock so tests control time, and
//! single-flight de-duplication so a second caller awaits the first
//! in-progress fetch instead of issuing a duplicate. Purely advisory:
//! stale reads within the TTL are acceptable by design, and write
//! handlers call [`TtlCache::invalidate`] to shorten the window.

use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Time source, injectable for tests
pub trait Clock: Send + Sync + 'static {
    fn now_ms(&self) -> i64;
}

/// Wall-clock time
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

struct Entry<V> {
    value: V,
    stored_at_ms: i64,
}

/// Keyed TTL cache with single-flight fetch de-duplication
pub struct TtlCache<V> {
    ttl_ms: i64,
    clock: Arc<dyn Clock>,
    entries: DashMap<String, Entry<V>>,
    flights: DashMap<String, Arc<Mutex<()>>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl_ms: ttl.as_millis() as i64,
            clock,
            entries: DashMap::new(),
            flights: DashMap::new(),
        }
    }

    /// Get a value if present and still fresh
    pub fn get(&self, key: &str) -> Option<V> {
        let entry = self.entries.get(key)?;
        if self.clock.now_ms() - entry.stored_at_ms < self.ttl_ms {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Get a fresh value, fetching at most once across concurrent callers.
    ///
    /// The first caller for a stale key runs `fetch`; concurrent callers
    /// block on the same flight and pick up the freshly stored value. Fetch
    /// errors are propagated and nothing is cached.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        let flight = self
            .flights
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = flight.lock().await;

        // The winning flight may have stored a value while we waited
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        let value = fetch().await?;
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.clone(),
                stored_at_ms: self.clock.now_ms(),
            },
        );
        drop(_guard);
        self.flights.remove(key);
        Ok(value)
    }

    /// Drop a cached value so the next read refetches
    pub fn invalidate(&self, key: &str) {
        self.entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

    struct ManualClock {
        ms: AtomicI64,
    }

    impl ManualClock {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                ms: AtomicI64::new(0),
            })
        }

        fn advance(&self, ms: i64) {
            self.ms.fetch_add(ms, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now_ms(&self) -> i64 {
            self.ms.load(Ordering::SeqCst)
        }
    }

    #[tokio::test]
    async fn serves_cached_value_within_ttl() {
        let clock = ManualClock::new();
        let cache = TtlCache::new(Duration::from_secs(120), clock.clone());
        let fetches = AtomicUsize::new(0);

        for _ in 0..3 {
            let value: Result<i32, ()> = cache
                .get_or_fetch("menu", || async {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    Ok(7)
                })
                .await;
            assert_eq!(value.unwrap(), 7);
        }
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn refetches_after_ttl_expires() {
        let clock = ManualClock::new();
        let cache = TtlCache::new(Duration::from_secs(120), clock.clone());
        let fetches = AtomicUsize::new(0);

        let fetch = || async {
            fetches.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ()>(1)
        };
        cache.get_or_fetch("menu", fetch).await.unwrap();

        clock.advance(119_999);
        assert_eq!(cache.get("menu"), Some(1));

        clock.advance(2);
        assert_eq!(cache.get("menu"), None);
        cache
            .get_or_fetch("menu", || async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ()>(2)
            })
            .await
            .unwrap();
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_fetch() {
        let clock = ManualClock::new();
        let cache = Arc::new(TtlCache::new(Duration::from_secs(120), clock.clone()));
        let fetches = Arc::new(AtomicUsize::new(0));

        let slow_fetch = |fetches: Arc<AtomicUsize>| async move {
            fetches.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok::<_, ()>(42)
        };

        let (a, b) = tokio::join!(
            cache.get_or_fetch("menu", || slow_fetch(fetches.clone())),
            cache.get_or_fetch("menu", || slow_fetch(fetches.clone())),
        );
        assert_eq!(a.unwrap(), 42);
        assert_eq!(b.unwrap(), 42);
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let clock = ManualClock::new();
        let cache = TtlCache::new(Duration::from_secs(120), clock.clone());
        let fetches = AtomicUsize::new(0);

        let fetch = || async {
            fetches.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ()>(1)
        };
        cache.get_or_fetch("menu", fetch).await.unwrap();
        cache.invalidate("menu");
        cache
            .get_or_fetch("menu", || async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ()>(1)
            })
            .await
            .unwrap();
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn fetch_errors_are_not_cached() {
        let clock = ManualClock::new();
        let cache = TtlCache::new(Duration::from_secs(120), clock.clone());

        let err: Result<i32, &str> = cache.get_or_fetch("menu", || async { Err("db down") }).await;
        assert!(err.is_err());

        let ok: Result<i32, &str> = cache.get_or_fetch("menu", || async { Ok(3) }).await;
        assert_eq!(ok.unwrap(), 3);
    }
}
