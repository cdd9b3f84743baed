// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::cache::refresher::CacheItemProvider;
use crate::cache::{CacheRefresher, SharedCache};
use crate::config::RefreshConfig;
use async_trait::async_trait;
use gfp_governance_client::{GovernanceApi, GovernanceApiError};
use gfp_governance_types::{ChainStats, CurrentValue};
use std::sync::Arc;
use tracing::debug;

pub struct ChainStatsProvider {
    api: Arc<dyn GovernanceApi>,
}

impl ChainStatsProvider {
    pub fn new(api: Arc<dyn GovernanceApi>) -> Self {
        ChainStatsProvider { api }
    }
}

#[async_trait]
impl CacheItemProvider for ChainStatsProvider {
    type Item = ChainStats;
    type Error = GovernanceApiError;

    async fn try_refresh(&self) -> Result<Self::Item, Self::Error> {
        let stats = self.api.get_network_stats().await?;
        debug!(
            "current block: {}, gas price: {}",
            stats.current_block, stats.gas_price
        );
        Ok(stats)
    }
}

pub struct CurrentValueProvider {
    api: Arc<dyn GovernanceApi>,
}

impl CurrentValueProvider {
    pub fn new(api: Arc<dyn GovernanceApi>) -> Self {
        CurrentValueProvider { api }
    }
}

#[async_trait]
impl CacheItemProvider for CurrentValueProvider {
    type Item = CurrentValue;
    type Error = GovernanceApiError;

    async fn try_refresh(&self) -> Result<Self::Item, Self::Error> {
        self.api.get_current_value().await
    }
}

pub fn chain_stats_refresher(
    api: Arc<dyn GovernanceApi>,
    config: &RefreshConfig,
    cache: SharedCache<ChainStats>,
) -> CacheRefresher<ChainStats, GovernanceApiError> {
    CacheRefresher::new_with_initial_value(
        Box::new(ChainStatsProvider::new(api)),
        config.chain_stats,
        cache,
    )
    .named("ChainStatsRefresher")
}

/// The current value is polled frequently until the backend returns an actual value.
pub fn current_value_refresher(
    api: Arc<dyn GovernanceApi>,
    config: &RefreshConfig,
    cache: SharedCache<CurrentValue>,
) -> CacheRefresher<CurrentValue, GovernanceApiError> {
    CacheRefresher::new_with_initial_value(
        Box::new(CurrentValueProvider::new(api)),
        config.current_value,
        cache,
    )
    .named("CurrentValueRefresher")
    .with_warmup(config.current_value_pending, CurrentValue::is_valid)
}
