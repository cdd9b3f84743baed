// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use std::ops::Deref;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{RwLock, RwLockReadGuard};

pub mod providers;
pub mod query;
pub mod refresher;

pub use query::QueryCache;
pub use refresher::{CacheItemProvider, CacheRefresher};

#[derive(Debug, Error)]
#[error("the cache item has not been initialised")]
pub struct UninitialisedCache;

/// Single value shared between the background refresher and all of its readers.
pub struct SharedCache<T>(Arc<RwLock<CachedItem<T>>>);

impl<T> Clone for SharedCache<T> {
    fn clone(&self) -> Self {
        SharedCache(Arc::clone(&self.0))
    }
}

impl<T> Default for SharedCache<T> {
    fn default() -> Self {
        SharedCache(Arc::new(RwLock::new(CachedItem { inner: None })))
    }
}

impl<T> SharedCache<T> {
    pub fn new() -> Self {
        SharedCache::default()
    }

    pub async fn update(&self, value: T) {
        let mut guard = self.0.write().await;
        guard.inner = Some(Cache { value });
    }

    pub async fn get(&self) -> Result<RwLockReadGuard<'_, Cache<T>>, UninitialisedCache> {
        let guard = self.0.read().await;
        RwLockReadGuard::try_map(guard, |a| a.inner.as_ref()).map_err(|_| UninitialisedCache)
    }

    pub async fn get_cloned_or_default(&self) -> T
    where
        T: Clone + Default,
    {
        match self.get().await {
            Ok(cache) => cache.value.clone(),
            Err(_) => T::default(),
        }
    }
}

pub(crate) struct CachedItem<T> {
    inner: Option<Cache<T>>,
}

pub struct Cache<T> {
    value: T,
}

impl<T> Deref for Cache<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}
