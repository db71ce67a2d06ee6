use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::error::MintResult;
use crate::generation::{ImageGenerator, StabilityClient};
use crate::hedera::{LedgerQuery, MirrorNodeClient};
use crate::storage::{ContentStore, NftStorageClient};
use crate::utils::NetworkState;
use crate::wallet::{BridgeWallet, MockWallet, WalletConnector};

/// The four external collaborators the workflow talks to
#[derive(Clone)]
pub struct Services {
    pub generator: Arc<dyn ImageGenerator>,
    pub store: Arc<dyn ContentStore>,
    pub ledger: Arc<dyn LedgerQuery>,
    pub wallet: Arc<dyn WalletConnector>,
}

impl Services {
    /// Build the live adapters. Missing API keys fail here, before the UI starts.
    pub fn from_config(config: &Config, network_state: &NetworkState) -> MintResult<Self> {
        let generator = StabilityClient::new(
            &config.stability.api_url,
            &config.stability.engine,
            &config.stability.api_key,
        )?;
        let store = NftStorageClient::new(
            &config.storage.api_url,
            &config.storage.api_key,
            &config.storage.gateway,
        )?;

        let wallet: Arc<dyn WalletConnector> = if config.wallet.mock {
            info!(account = %config.wallet.mock_account, "using mock wallet");
            Arc::new(MockWallet::new(config.wallet.mock_account))
        } else {
            info!(bridge = %config.wallet.bridge_url, "using wallet bridge");
            Arc::new(BridgeWallet::new(&config.wallet.bridge_url)?)
        };

        Ok(Self {
            generator: Arc::new(generator),
            store: Arc::new(store),
            ledger: Self::ledger_for(network_state)?,
            wallet,
        })
    }

    pub fn ledger_for(network_state: &NetworkState) -> MintResult<Arc<dyn LedgerQuery>> {
        Ok(Arc::new(MirrorNodeClient::new(network_state.get_current_mirror())?))
    }
}
