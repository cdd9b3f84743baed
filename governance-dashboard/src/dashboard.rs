// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::cache::providers::{chain_stats_refresher, current_value_refresher};
use crate::cache::SharedCache;
use crate::config::Config;
use crate::error::DashboardError;
use crate::intent::IntentBuilder;
use crate::notify::{Notifier, TracingNotifier};
use crate::view::ProposalBoard;
use crate::wallet::{ConnectedWallet, JsonRpcWallet, WalletContext, WalletProvider};
use gfp_governance_client::{GovernanceApi, GovernanceApiClient};
use gfp_governance_types::{ChainStats, CurrentValue};
use gfp_network_defaults::Network;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Everything required for displaying and interacting with the governance proposals,
/// wired together according to the provided config.
pub struct Dashboard {
    config: Config,
    api: Arc<dyn GovernanceApi>,
    wallet: WalletContext,
    board: ProposalBoard,
    current_value: SharedCache<CurrentValue>,
}

impl Dashboard {
    pub fn new(config: Config) -> Result<Self, DashboardError> {
        let api = GovernanceApiClient::builder(config.backend.url.as_str())?.build()?;

        let provider = match &config.wallet.rpc_url {
            Some(rpc_url) => {
                let wallet = JsonRpcWallet::new(rpc_url.clone())?
                    .with_expected_chain_id(config.network.chain_id())
                    .with_receipt_poll_interval(config.wallet.receipt_poll_interval);
                Some(Arc::new(wallet) as Arc<dyn WalletProvider>)
            }
            None => {
                debug!("no wallet rpc has been configured");
                None
            }
        };

        Ok(Dashboard::new_with_components(
            config,
            Arc::new(api),
            provider,
            Arc::new(TracingNotifier),
        ))
    }

    pub fn new_with_components(
        config: Config,
        api: Arc<dyn GovernanceApi>,
        provider: Option<Arc<dyn WalletProvider>>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let wallet = WalletContext::new(provider, Arc::clone(&notifier));
        let intents = IntentBuilder::new(
            Arc::clone(&api),
            wallet.clone(),
            config.wallet.confirmation,
        );
        let board = ProposalBoard::new(
            Arc::clone(&api),
            intents,
            wallet.clone(),
            notifier,
            config.network,
            &config.cache,
        );

        Dashboard {
            config,
            api,
            wallet,
            board,
            current_value: SharedCache::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn network(&self) -> Network {
        self.config.network
    }

    pub fn board(&self) -> &ProposalBoard {
        &self.board
    }

    pub fn wallet(&self) -> &WalletContext {
        &self.wallet
    }

    /// Connects the configured wallet, failing if that was not possible.
    pub async fn connect_wallet(&self) -> Result<ConnectedWallet, DashboardError> {
        self.wallet.connect().await;
        self.wallet
            .connected()
            .await
            .ok_or(DashboardError::WalletNotConnected)
    }

    pub async fn refresh_chain_stats(&self) -> Result<ChainStats, DashboardError> {
        let stats = self.api.get_network_stats().await?;
        self.wallet.chain_stats_cache().update(stats.clone()).await;
        Ok(stats)
    }

    /// Returns the protocol's current value, only querying the backend if it has never been
    /// retrieved or if `force` is set.
    pub async fn current_value(&self, force: bool) -> Result<CurrentValue, DashboardError> {
        if !force {
            if let Ok(cached) = self.current_value.get().await {
                return Ok((**cached).clone());
            }
        }

        let value = self.api.get_current_value().await?;
        self.current_value.update(value.clone()).await;
        Ok(value)
    }

    /// Starts background refreshing of the chain statistics and of the current value.
    /// Both stop once the shutdown token is cancelled.
    pub fn start_refreshers(&self, shutdown: CancellationToken) -> Vec<JoinHandle<()>> {
        info!("starting the background refreshers");
        vec![
            chain_stats_refresher(
                Arc::clone(&self.api),
                &self.config.refresh,
                self.wallet.chain_stats_cache(),
            )
            .start(shutdown.clone()),
            current_value_refresher(
                Arc::clone(&self.api),
                &self.config.refresh,
                self.current_value.clone(),
            )
            .start(shutdown),
        ]
    }
}
