// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::cli::ConfigOverridableArgs;
use crate::config::Config;

pub trait ConfigOverride {
    fn override_config(self, config: &mut Config);
}

impl ConfigOverride for ConfigOverridableArgs {
    fn override_config(self, config: &mut Config) {
        if let Some(network) = self.network {
            config.network = network
        }

        if let Some(backend_url) = self.backend_url {
            config.backend.url = backend_url
        }

        if let Some(wallet_rpc) = self.wallet_rpc {
            config.wallet.rpc_url = Some(wallet_rpc)
        }

        if let Some(confirmation) = self.confirmation {
            config.wallet.confirmation = confirmation
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::ConfirmationMode;
    use gfp_network_defaults::Network;

    #[test]
    fn only_provided_values_are_overridden() {
        let base = Config::new_with_backend(
            Network::Sepolia,
            "http://localhost:8000".parse().unwrap(),
        );

        let unchanged = base.clone().with_override(ConfigOverridableArgs::default());
        assert_eq!(unchanged, base);

        let overridden = base.clone().with_override(ConfigOverridableArgs {
            network: Some(Network::Localhost),
            backend_url: None,
            wallet_rpc: Some("http://127.0.0.1:8545".parse().unwrap()),
            confirmation: Some(ConfirmationMode::BroadcastOnly),
        });
        assert_eq!(overridden.network, Network::Localhost);
        assert_eq!(overridden.backend, base.backend);
        assert_eq!(
            overridden.wallet.rpc_url.unwrap().as_str(),
            "http://127.0.0.1:8545/"
        );
        assert_eq!(
            overridden.wallet.confirmation,
            ConfirmationMode::BroadcastOnly
        );
    }
}
