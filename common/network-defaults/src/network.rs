// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::{local, mainnet, sepolia};
use serde::{Deserialize, Serialize};
#[cfg(feature = "env")]
use std::path::PathBuf;
use std::{fmt, str::FromStr};
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum NetworkDefaultsError {
    #[error("the provided network '{0}' is not supported. try one of: sepolia, mainnet, localhost, hardhat")]
    MalformedNetworkProvided(String),

    #[cfg(feature = "env")]
    #[error("failed to load the env file at '{}': {source}", path.display())]
    EnvFileLoadFailure {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

#[derive(Copy, Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Sepolia,
    Mainnet,
    Localhost,
    Hardhat,
}

pub struct ChainDetails {
    pub name: &'static str,
    pub chain_id: u64,
    pub currency_symbol: &'static str,
    pub block_explorer: Option<&'static str>,
}

const SEPOLIA: ChainDetails = ChainDetails {
    name: sepolia::NETWORK_NAME,
    chain_id: sepolia::CHAIN_ID,
    currency_symbol: sepolia::CURRENCY_SYMBOL,
    block_explorer: sepolia::BLOCK_EXPLORER,
};

const MAINNET: ChainDetails = ChainDetails {
    name: mainnet::NETWORK_NAME,
    chain_id: mainnet::CHAIN_ID,
    currency_symbol: mainnet::CURRENCY_SYMBOL,
    block_explorer: mainnet::BLOCK_EXPLORER,
};

const LOCALHOST: ChainDetails = ChainDetails {
    name: local::LOCALHOST_NETWORK_NAME,
    chain_id: local::LOCALHOST_CHAIN_ID,
    currency_symbol: local::CURRENCY_SYMBOL,
    block_explorer: None,
};

const HARDHAT: ChainDetails = ChainDetails {
    name: local::HARDHAT_NETWORK_NAME,
    chain_id: local::HARDHAT_CHAIN_ID,
    currency_symbol: local::CURRENCY_SYMBOL,
    block_explorer: None,
};

impl Network {
    pub const ALL: [Network; 4] = [
        Network::Sepolia,
        Network::Mainnet,
        Network::Localhost,
        Network::Hardhat,
    ];

    pub fn details(&self) -> &'static ChainDetails {
        match self {
            Network::Sepolia => &SEPOLIA,
            Network::Mainnet => &MAINNET,
            Network::Localhost => &LOCALHOST,
            Network::Hardhat => &HARDHAT,
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.details().chain_id
    }

    pub fn currency_symbol(&self) -> &'static str {
        self.details().currency_symbol
    }

    pub fn block_explorer(&self) -> Option<Url> {
        self.details()
            .block_explorer
            .and_then(|raw| raw.parse().ok())
    }

    /// Link to the transaction page of the block explorer, if the network has one.
    pub fn explorer_tx_url(&self, tx_hash: &str) -> Option<String> {
        self.details()
            .block_explorer
            .map(|explorer| format!("{explorer}/tx/{tx_hash}"))
    }

    /// Select the network based on the environment, falling back to sepolia if nothing was set.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self, NetworkDefaultsError> {
        match crate::env_setup::read_var(crate::var_names::NETWORK) {
            Some(raw) => raw.parse(),
            None => Ok(Network::default()),
        }
    }
}

impl FromStr for Network {
    type Err = NetworkDefaultsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase();
        Network::ALL
            .into_iter()
            .find(|network| network.details().name == normalised)
            .ok_or_else(|| NetworkDefaultsError::MalformedNetworkProvided(s.to_string()))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.details().name)
    }
}
