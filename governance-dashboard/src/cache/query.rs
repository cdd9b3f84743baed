// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use futures::future::{BoxFuture, Shared};
use futures::{FutureExt, TryFutureExt};
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::trace;

type SharedFetch<V, E> = Shared<BoxFuture<'static, Result<V, Arc<E>>>>;

struct Entry<V> {
    value: V,
    fetched_at: Instant,
}

struct QueryCacheInner<K, V, E> {
    entries: HashMap<K, Entry<V>>,
    in_flight: HashMap<K, SharedFetch<V, E>>,
}

/// Keyed cache of query results.
///
/// - a value younger than the stale time is served without hitting the source,
/// - at most one fetch per key is in flight, concurrent callers await the same one,
/// - the most recently completed fetch overwrites whatever was cached before.
pub struct QueryCache<K, V, E> {
    stale_time: Duration,
    inner: Arc<Mutex<QueryCacheInner<K, V, E>>>,
}

impl<K, V, E> Clone for QueryCache<K, V, E> {
    fn clone(&self) -> Self {
        QueryCache {
            stale_time: self.stale_time,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V, E> QueryCache<K, V, E>
where
    K: Eq + Hash + Clone,
    V: Clone + Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    pub fn new(stale_time: Duration) -> Self {
        QueryCache {
            stale_time,
            inner: Arc::new(Mutex::new(QueryCacheInner {
                entries: HashMap::new(),
                in_flight: HashMap::new(),
            })),
        }
    }

    // the lock is never held across an await point, so a poisoned state is still consistent
    fn lock(&self) -> MutexGuard<'_, QueryCacheInner<K, V, E>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn invalidate(&self, key: &K) {
        self.lock().entries.remove(key);
    }

    /// Resolves the value for `key`, calling `fetcher` only if there is neither a fresh value
    /// nor an already in-flight request. `force` ignores the freshness of the cached value,
    /// but still joins a request that is already in flight.
    pub async fn fetch<F, Fut>(&self, key: K, force: bool, fetcher: F) -> Result<V, Arc<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        let request = {
            let mut guard = self.lock();

            if !force {
                if let Some(entry) = guard.entries.get(&key) {
                    if entry.fetched_at.elapsed() < self.stale_time {
                        return Ok(entry.value.clone());
                    }
                }
            }

            match guard.in_flight.get(&key) {
                Some(in_flight) => {
                    trace!("joining an in-flight request");
                    in_flight.clone()
                }
                None => {
                    let request = fetcher().map_err(Arc::new).boxed().shared();
                    guard.in_flight.insert(key.clone(), request.clone());
                    request
                }
            }
        };

        let result = request.clone().await;

        let mut guard = self.lock();
        // only the first waiter to observe the completion stores the result
        let is_current = guard
            .in_flight
            .get(&key)
            .is_some_and(|in_flight| in_flight.ptr_eq(&request));
        if is_current {
            guard.in_flight.remove(&key);
            if let Ok(value) = &result {
                guard.entries.insert(
                    key,
                    Entry {
                        value: value.clone(),
                        fetched_at: Instant::now(),
                    },
                );
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug)]
    struct Failure;

    impl<K, V, E> QueryCache<K, V, E>
    where
        K: Eq + Hash + Clone,
        V: Clone + Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        fn cached(&self, key: &K) -> Option<V> {
            self.lock().entries.get(key).map(|entry| entry.value.clone())
        }

        fn is_fresh(&self, key: &K) -> bool {
            self.lock()
                .entries
                .get(key)
                .is_some_and(|entry| entry.fetched_at.elapsed() < self.stale_time)
        }

        fn is_fetching(&self, key: &K) -> bool {
            self.lock().in_flight.contains_key(key)
        }
    }

    fn counting_fetch(
        calls: &Arc<AtomicU32>,
        delay: Duration,
    ) -> impl FnOnce() -> BoxFuture<'static, Result<u32, Failure>> {
        let calls = calls.clone();
        move || {
            async move {
                let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
                tokio::time::sleep(delay).await;
                Ok(call)
            }
            .boxed()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_values_are_served_from_cache() {
        let cache = QueryCache::<&str, u32, Failure>::new(Duration::from_secs(300));
        let calls = Arc::new(AtomicU32::new(0));

        let first = cache
            .fetch("list", false, counting_fetch(&calls, Duration::ZERO))
            .await
            .unwrap();
        let second = cache
            .fetch("list", false, counting_fetch(&calls, Duration::ZERO))
            .await
            .unwrap();
        assert_eq!((first, second), (1, 1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(301)).await;
        assert!(!cache.is_fresh(&"list"));
        let third = cache
            .fetch("list", false, counting_fetch(&calls, Duration::ZERO))
            .await
            .unwrap();
        assert_eq!(third, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_requests_share_a_single_fetch() {
        let cache = QueryCache::<&str, u32, Failure>::new(Duration::from_secs(300));
        let calls = Arc::new(AtomicU32::new(0));

        // a manual refresh racing with the automatic one
        let (automatic, manual) = tokio::join!(
            cache.fetch("list", false, counting_fetch(&calls, Duration::from_secs(1))),
            cache.fetch("list", true, counting_fetch(&calls, Duration::from_secs(1))),
        );
        assert_eq!(automatic.unwrap(), 1);
        assert_eq!(manual.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!cache.is_fetching(&"list"));
    }

    #[tokio::test(start_paused = true)]
    async fn forced_refetch_overwrites_the_cached_value() {
        let cache = QueryCache::<&str, u32, Failure>::new(Duration::from_secs(300));
        let calls = Arc::new(AtomicU32::new(0));

        cache
            .fetch("details", false, counting_fetch(&calls, Duration::ZERO))
            .await
            .unwrap();
        let refetched = cache
            .fetch("details", true, counting_fetch(&calls, Duration::ZERO))
            .await
            .unwrap();
        assert_eq!(refetched, 2);
        assert_eq!(cache.cached(&"details"), Some(2));
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let cache = QueryCache::<u8, u32, Failure>::new(Duration::from_secs(300));

        let err = cache
            .fetch(1, false, || async { Err(Failure) })
            .await
            .unwrap_err();
        assert!(matches!(*err, Failure));
        assert_eq!(cache.cached(&1), None);
        assert!(!cache.is_fetching(&1));

        let value = cache.fetch(1, false, || async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let cache = QueryCache::<u8, u32, Failure>::new(Duration::from_secs(300));
        cache.fetch(1, false, || async { Ok(10) }).await.unwrap();
        cache.fetch(2, false, || async { Ok(20) }).await.unwrap();

        assert_eq!(cache.cached(&1), Some(10));
        assert_eq!(cache.cached(&2), Some(20));

        cache.invalidate(&1);
        assert_eq!(cache.cached(&1), None);
        assert_eq!(cache.cached(&2), Some(20));
    }
}
