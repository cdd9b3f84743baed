// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::config::r#override::ConfigOverride;
use crate::error::DashboardError;
use crate::intent::ConfirmationMode;
use crate::wallet::rpc::DEFAULT_RECEIPT_POLL_INTERVAL;
use gfp_bin_common::logging::LoggingSettings;
use gfp_network_defaults::{read_var, var_names, Network};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

pub mod r#override;

const GFP_DIR: &str = ".gfp";
const DEFAULT_DASHBOARD_DIR: &str = "dashboard";
const DEFAULT_CONFIG_DIR: &str = "config";
const DEFAULT_CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

const DEFAULT_CHAIN_STATS_REFRESH: Duration = Duration::from_secs(60);
const DEFAULT_CURRENT_VALUE_REFRESH: Duration = Duration::from_secs(5 * 60);
const DEFAULT_CURRENT_VALUE_PENDING_REFRESH: Duration = Duration::from_secs(10);
const DEFAULT_PROPOSAL_LIST_TTL: Duration = Duration::from_secs(5 * 60);
const DEFAULT_PROPOSAL_DETAILS_TTL: Duration = Duration::from_secs(10 * 60);

/// Get default path to dashboard's config directory.
/// It should get resolved to `$HOME/.gfp/dashboard/config`
pub fn default_config_directory() -> Result<PathBuf, DashboardError> {
    let home = dirs::home_dir().ok_or(DashboardError::UnknownHomeDirectory)?;
    Ok(home
        .join(GFP_DIR)
        .join(DEFAULT_DASHBOARD_DIR)
        .join(DEFAULT_CONFIG_DIR))
}

/// Get default path to dashboard's config file.
/// It should get resolved to `$HOME/.gfp/dashboard/config/config.toml`
pub fn default_config_filepath() -> Result<PathBuf, DashboardError> {
    Ok(default_config_directory()?.join(DEFAULT_CONFIG_FILENAME))
}

fn parse_env_url(var: &str) -> Result<Option<Url>, DashboardError> {
    read_var(var)
        .map(|raw| {
            raw.parse().map_err(|err| DashboardError::InvalidConfig {
                reason: format!("'{raw}' set via {var} is not a valid url: {err}"),
            })
        })
        .transpose()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    // additional metadata holding on-disk location of this config file
    #[serde(skip)]
    pub(crate) save_path: Option<PathBuf>,

    /// The chain the governor contract is deployed on.
    pub network: Network,

    pub backend: BackendConfig,

    #[serde(default)]
    pub wallet: WalletConfig,

    #[serde(default)]
    pub refresh: RefreshConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Config {
    /// Creates a config based on the environment, falling back to the defaults
    /// for anything that has not been set.
    pub fn new() -> Result<Self, DashboardError> {
        let network = Network::from_env()?;
        let backend_url = match parse_env_url(var_names::BACKEND_URL)? {
            Some(url) => url,
            None => DEFAULT_BACKEND_URL
                .parse()
                .map_err(|err| DashboardError::InvalidConfig {
                    reason: format!("malformed default backend url: {err}"),
                })?,
        };

        let mut config = Config::new_with_backend(network, backend_url);
        config.wallet.rpc_url = parse_env_url(var_names::WALLET_RPC)?;
        Ok(config)
    }

    pub fn new_with_backend(network: Network, backend_url: Url) -> Self {
        Config {
            save_path: None,
            network,
            backend: BackendConfig { url: backend_url },
            wallet: WalletConfig::default(),
            refresh: RefreshConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingSettings::default(),
        }
    }

    pub fn ensure_is_valid(&self) -> Result<(), DashboardError> {
        fn ensure_http(name: &str, url: &Url) -> Result<(), DashboardError> {
            if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
                return Err(DashboardError::InvalidConfig {
                    reason: format!("{name} '{url}' is not a valid http(s) url"),
                });
            }
            Ok(())
        }

        fn ensure_non_zero(name: &str, value: Duration) -> Result<(), DashboardError> {
            if value.is_zero() {
                return Err(DashboardError::InvalidConfig {
                    reason: format!("{name} must be non-zero"),
                });
            }
            Ok(())
        }

        ensure_http("backend url", &self.backend.url)?;
        if let Some(rpc_url) = &self.wallet.rpc_url {
            ensure_http("wallet rpc url", rpc_url)?;
        }
        ensure_non_zero(
            "receipt polling interval",
            self.wallet.receipt_poll_interval,
        )?;
        ensure_non_zero("chain stats refresh interval", self.refresh.chain_stats)?;
        ensure_non_zero("current value refresh interval", self.refresh.current_value)?;
        ensure_non_zero(
            "pending current value refresh interval",
            self.refresh.current_value_pending,
        )?;
        Ok(())
    }

    pub fn r#override<O: ConfigOverride>(&mut self, r#override: O) {
        r#override.override_config(self)
    }

    pub fn with_override<O: ConfigOverride>(mut self, r#override: O) -> Self {
        self.r#override(r#override);
        self
    }

    pub fn save_path(&self) -> Option<&Path> {
        self.save_path.as_deref()
    }

    pub fn read_from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, DashboardError> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|source| DashboardError::ConfigLoadFailure {
                path: path.to_path_buf(),
                source,
            })?;
        let mut loaded: Config =
            toml::from_str(&content).map_err(|source| DashboardError::MalformedConfig {
                path: path.to_path_buf(),
                source,
            })?;
        loaded.ensure_is_valid()?;
        loaded.save_path = Some(path.to_path_buf());
        debug!("loaded config file from {}", path.display());
        Ok(loaded)
    }

    pub fn default_location() -> Result<PathBuf, DashboardError> {
        default_config_filepath()
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), DashboardError> {
        let path = path.as_ref();
        let serialised = toml::to_string_pretty(self)
            .map_err(|source| DashboardError::ConfigSerialisationFailure { source })?;

        let save = || {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, serialised)
        };
        save().map_err(|source| DashboardError::ConfigSaveFailure {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("saved config file to {}", path.display());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base url of the backend building the governance transactions.
    pub url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WalletConfig {
    /// JSON-RPC endpoint of the wallet holding the signing keys.
    /// Without it, the dashboard is restricted to read-only operations.
    pub rpc_url: Option<Url>,

    /// Whether submissions wait for the transaction receipt.
    pub confirmation: ConfirmationMode,

    #[serde(with = "humantime_serde")]
    pub receipt_poll_interval: Duration,
}

impl Default for WalletConfig {
    fn default() -> Self {
        WalletConfig {
            rpc_url: None,
            confirmation: ConfirmationMode::default(),
            receipt_poll_interval: DEFAULT_RECEIPT_POLL_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RefreshConfig {
    #[serde(with = "humantime_serde")]
    pub chain_stats: Duration,

    #[serde(with = "humantime_serde")]
    pub current_value: Duration,

    /// Refresh interval of the current value used until the backend returns a valid value.
    #[serde(with = "humantime_serde")]
    pub current_value_pending: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        RefreshConfig {
            chain_stats: DEFAULT_CHAIN_STATS_REFRESH,
            current_value: DEFAULT_CURRENT_VALUE_REFRESH,
            current_value_pending: DEFAULT_CURRENT_VALUE_PENDING_REFRESH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    #[serde(with = "humantime_serde")]
    pub proposal_list_ttl: Duration,

    #[serde(with = "humantime_serde")]
    pub proposal_details_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            proposal_list_ttl: DEFAULT_PROPOSAL_LIST_TTL,
            proposal_details_ttl: DEFAULT_PROPOSAL_DETAILS_TTL,
        }
    }
}
