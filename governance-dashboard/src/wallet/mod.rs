// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::cache::SharedCache;
use crate::notify::{Notification, Notifier};
use gfp_governance_types::format::{format_token_value, truncate_string, TruncateAt};
use gfp_governance_types::{Address, ChainStats, U256};
use serde::Serialize;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

pub mod error;
pub mod provider;
pub mod rpc;

pub use error::WalletError;
pub use provider::{TransactionReceipt, TransactionRequest, WalletProvider};
pub use rpc::JsonRpcWallet;

const DISPLAYED_ADDRESS_LENGTH: usize = 12;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

#[derive(Clone, Default)]
pub struct WalletSession {
    pub status: WalletStatus,
    pub address: Option<Address>,
    pub balance: U256,
    pub provider: Option<Arc<dyn WalletProvider>>,
}

impl Debug for WalletSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletSession")
            .field("status", &self.status)
            .field("address", &self.address)
            .field("balance", &self.balance)
            .field("provider", &self.provider.as_ref().map(|_| "<provider>"))
            .finish()
    }
}

impl WalletSession {
    pub fn is_connected(&self) -> bool {
        self.status == WalletStatus::Connected && self.address.is_some()
    }

    pub fn display_address(&self) -> Option<String> {
        self.address.map(|address| {
            truncate_string(
                &address.to_string(),
                DISPLAYED_ADDRESS_LENGTH,
                TruncateAt::Middle,
            )
        })
    }

    pub fn display_balance(&self, symbol: &str) -> String {
        format!("{} {symbol}", format_token_value(self.balance))
    }
}

/// Partial session update. Fields left as `None` keep their current values.
#[derive(Debug, Default, Clone)]
pub struct WalletUpdate {
    pub status: Option<WalletStatus>,
    pub address: Option<Address>,
    pub balance: Option<U256>,
}

/// Handle to a connected account, as required for submitting transactions.
#[derive(Clone)]
pub struct ConnectedWallet {
    pub address: Address,
    pub provider: Arc<dyn WalletProvider>,
}

/// Process-wide wallet state: the session of the connected account and the chain statistics
/// shared with everything that needs to build or classify transactions.
#[derive(Clone)]
pub struct WalletContext {
    session: Arc<RwLock<WalletSession>>,
    provider: Option<Arc<dyn WalletProvider>>,
    chain_stats: SharedCache<ChainStats>,
    notifier: Arc<dyn Notifier>,
}

impl WalletContext {
    pub fn new(provider: Option<Arc<dyn WalletProvider>>, notifier: Arc<dyn Notifier>) -> Self {
        WalletContext {
            session: Default::default(),
            provider,
            chain_stats: SharedCache::new(),
            notifier,
        }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Attempts to connect the wallet. Failures are reported through the notifier
    /// and leave the session disconnected.
    pub async fn connect(&self) {
        let Some(provider) = self.provider.clone() else {
            warn!("failed to connect the wallet: {}", WalletError::NoProvider);
            self.notifier
                .notify(Notification::error("No wallet provider found"));
            return;
        };

        {
            let mut session = self.session.write().await;
            if session.status != WalletStatus::Disconnected {
                debug!("wallet is already {:?}", session.status);
                return;
            }
            session.status = WalletStatus::Connecting;
        }

        match Self::establish(provider.as_ref()).await {
            Ok((address, balance)) => {
                info!("connected wallet {address}");
                *self.session.write().await = WalletSession {
                    status: WalletStatus::Connected,
                    address: Some(address),
                    balance,
                    provider: Some(provider),
                };
            }
            Err(err) => {
                warn!("failed to connect the wallet: {err}");
                self.notifier
                    .notify(Notification::error("Wallet connect error"));
                self.reset().await;
            }
        }
    }

    async fn establish(provider: &dyn WalletProvider) -> Result<(Address, U256), WalletError> {
        let accounts = provider.request_accounts().await?;
        let address = accounts
            .into_iter()
            .next()
            .ok_or(WalletError::NoAccounts)?;
        let balance = provider.get_balance(address).await?;
        Ok((address, balance))
    }

    /// Restores the empty session.
    pub async fn reset(&self) {
        *self.session.write().await = WalletSession::default();
    }

    pub async fn update(&self, update: WalletUpdate) {
        let mut session = self.session.write().await;
        if let Some(status) = update.status {
            session.status = status;
        }
        if let Some(address) = update.address {
            session.address = Some(address);
        }
        if let Some(balance) = update.balance {
            session.balance = balance;
        }
    }

    pub async fn session(&self) -> WalletSession {
        self.session.read().await.clone()
    }

    pub async fn connected(&self) -> Option<ConnectedWallet> {
        let session = self.session.read().await;
        if !session.is_connected() {
            return None;
        }
        Some(ConnectedWallet {
            address: session.address?,
            provider: session.provider.clone()?,
        })
    }

    pub async fn refresh_balance(&self) -> Result<U256, WalletError> {
        let Some(wallet) = self.connected().await else {
            return Err(WalletError::NoAccounts);
        };
        let balance = wallet.provider.get_balance(wallet.address).await?;
        self.update(WalletUpdate {
            balance: Some(balance),
            ..Default::default()
        })
        .await;
        Ok(balance)
    }

    /// Latest known chain statistics, or the defaults if they were never retrieved.
    pub async fn chain_stats(&self) -> ChainStats {
        self.chain_stats.get_cloned_or_default().await
    }

    pub fn chain_stats_cache(&self) -> SharedCache<ChainStats> {
        self.chain_stats.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::testing::{user, MockWallet};

    fn context(wallet: Option<MockWallet>) -> (WalletContext, RecordingNotifier) {
        let notifier = RecordingNotifier::default();
        let provider = wallet.map(|w| Arc::new(w) as Arc<dyn WalletProvider>);
        (
            WalletContext::new(provider, Arc::new(notifier.clone())),
            notifier,
        )
    }

    #[tokio::test]
    async fn connecting_populates_the_session() {
        let (ctx, notifier) = context(Some(MockWallet::default()));
        ctx.connect().await;

        let session = ctx.session().await;
        assert!(session.is_connected());
        assert_eq!(session.address, Some(user()));
        assert_eq!(session.display_balance("ETH"), "1.5 ETH");
        assert_eq!(
            session.display_address().unwrap(),
            "0x1111...111111"
        );
        assert!(ctx.connected().await.is_some());
        assert!(notifier.received().is_empty());
    }

    #[tokio::test]
    async fn missing_provider_is_reported() {
        let (ctx, notifier) = context(None);
        ctx.connect().await;

        assert_eq!(ctx.session().await.status, WalletStatus::Disconnected);
        assert_eq!(
            notifier.received(),
            vec![Notification::error("No wallet provider found")]
        );
    }

    #[tokio::test]
    async fn rejected_connection_leaves_session_disconnected() {
        let (ctx, notifier) = context(Some(MockWallet {
            reject_connection: true,
            ..Default::default()
        }));
        ctx.connect().await;

        let session = ctx.session().await;
        assert_eq!(session.status, WalletStatus::Disconnected);
        assert!(session.address.is_none());
        assert!(ctx.connected().await.is_none());
        assert_eq!(
            notifier.received(),
            vec![Notification::error("Wallet connect error")]
        );
    }

    #[tokio::test]
    async fn wallet_without_accounts_fails_to_connect() {
        let (ctx, notifier) = context(Some(MockWallet {
            accounts: vec![],
            ..Default::default()
        }));
        ctx.connect().await;

        assert_eq!(ctx.session().await.status, WalletStatus::Disconnected);
        assert_eq!(notifier.received().len(), 1);
    }

    #[tokio::test]
    async fn reset_restores_empty_session() {
        let (ctx, _) = context(Some(MockWallet::default()));
        ctx.connect().await;
        ctx.reset().await;

        let session = ctx.session().await;
        assert_eq!(session.status, WalletStatus::Disconnected);
        assert!(session.address.is_none());
        assert!(session.provider.is_none());
        assert_eq!(session.balance, U256::ZERO);

        // no automatic reconnection, but an explicit one works
        ctx.connect().await;
        assert!(ctx.session().await.is_connected());
    }

    #[tokio::test]
    async fn update_merges_into_current_state() {
        let (ctx, _) = context(Some(MockWallet::default()));
        ctx.connect().await;

        ctx.update(WalletUpdate {
            balance: Some(U256::from(7)),
            ..Default::default()
        })
        .await;

        let session = ctx.session().await;
        assert_eq!(session.balance, U256::from(7));
        assert_eq!(session.address, Some(user()));
        assert_eq!(session.status, WalletStatus::Connected);

        ctx.refresh_balance().await.unwrap();
        assert_eq!(
            ctx.session().await.balance,
            U256::from(1_500_000_000_000_000_000u64)
        );
    }

    #[tokio::test]
    async fn chain_stats_fall_back_to_defaults() {
        let (ctx, _) = context(None);
        assert_eq!(ctx.chain_stats().await, ChainStats::default());

        let stats = ChainStats {
            chain_id: Some(1),
            current_block: 42,
            gas_price: U256::from(3),
        };
        ctx.chain_stats_cache().update(stats.clone()).await;
        assert_eq!(ctx.chain_stats().await, stats);
    }
}
