// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::cache::SharedCache;
use async_trait::async_trait;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

#[async_trait]
pub trait CacheItemProvider {
    type Item;
    type Error: std::error::Error;

    async fn try_refresh(&self) -> Result<Self::Item, Self::Error>;
}

/// Refresh more frequently until the cached item satisfies the predicate.
struct Warmup<T> {
    interval: Duration,
    is_ready: fn(&T) -> bool,
}

/// Long running task responsible for keeping a [`SharedCache`] up to date.
pub struct CacheRefresher<T, E> {
    name: String,
    refreshing_interval: Duration,
    warmup: Option<Warmup<T>>,

    provider: Box<dyn CacheItemProvider<Item = T, Error = E> + Send + Sync>,
    shared_cache: SharedCache<T>,
}

impl<T, E> CacheRefresher<T, E>
where
    T: Send + Sync + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    pub fn new(
        item_provider: Box<dyn CacheItemProvider<Item = T, Error = E> + Send + Sync>,
        refreshing_interval: Duration,
    ) -> Self {
        Self::new_with_initial_value(item_provider, refreshing_interval, SharedCache::new())
    }

    pub fn new_with_initial_value(
        item_provider: Box<dyn CacheItemProvider<Item = T, Error = E> + Send + Sync>,
        refreshing_interval: Duration,
        shared_cache: SharedCache<T>,
    ) -> Self {
        CacheRefresher {
            name: "GenericCacheRefresher".to_string(),
            refreshing_interval,
            warmup: None,
            provider: item_provider,
            shared_cache,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Use `interval` instead of the regular refreshing interval for as long as
    /// the cache is empty or its value does not satisfy `is_ready`.
    #[must_use]
    pub fn with_warmup(mut self, interval: Duration, is_ready: fn(&T) -> bool) -> Self {
        self.warmup = Some(Warmup { interval, is_ready });
        self
    }

    pub fn get_shared_cache(&self) -> SharedCache<T> {
        self.shared_cache.clone()
    }

    pub async fn refresh(&self) -> bool {
        trace!("{}: refreshing cache", self.name);
        match self.provider.try_refresh().await {
            Ok(updated_items) => {
                self.shared_cache.update(updated_items).await;
                debug!("{}: cache has been refreshed", self.name);
                true
            }
            Err(err) => {
                warn!("{}: failed to refresh the cache: {err}", self.name);
                false
            }
        }
    }

    async fn next_interval(&self) -> Duration {
        let Some(warmup) = &self.warmup else {
            return self.refreshing_interval;
        };

        match self.shared_cache.get().await {
            Ok(cached) if (warmup.is_ready)(&**cached) => self.refreshing_interval,
            _ => warmup.interval,
        }
    }

    pub async fn run(&self, shutdown: CancellationToken) {
        info!("{}: starting", self.name);
        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    trace!("{}: received shutdown", self.name);
                    break
                }
                _ = self.refresh() => {}
            }

            let next = self.next_interval().await;
            trace!("{}: next refresh in {}", self.name, humantime::format_duration(next));

            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    trace!("{}: received shutdown", self.name);
                    break
                }
                _ = tokio::time::sleep(next) => {}
            }
        }
        info!("{}: exiting", self.name);
    }

    pub fn start(self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(shutdown).await })
    }
}
