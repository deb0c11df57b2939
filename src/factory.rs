//! Composition root: one shared transport, busy tracker and config,
//! handed out to the per-domain APIs.

use std::sync::Arc;

use crate::account::AccountApi;
use crate::api::ApiCore;
use crate::broadcast::BroadcastCore;
use crate::busy::BusyTracker;
use crate::config::ChainConfig;
use crate::proposals::ProposalsApi;
use crate::transport::{HttpTransport, Transport};
use crate::validators::ValidatorsApi;
use crate::wallet::WalletSigner;

pub struct ApiFactory {
    transport: Arc<dyn Transport>,
    busy: Arc<BusyTracker>,
    config: Arc<ChainConfig>,
    signer: Option<Arc<dyn WalletSigner>>,
}

impl ApiFactory {
    pub fn new(config: ChainConfig) -> Self {
        Self::with_transport(config, Arc::new(HttpTransport::new()))
    }

    pub fn with_transport(config: ChainConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            busy: Arc::new(BusyTracker::new()),
            config: Arc::new(config),
            signer: None,
        }
    }

    /// Installs the wallet-signer capability; replaced on reconnect.
    pub fn with_signer(mut self, signer: Arc<dyn WalletSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn set_signer(&mut self, signer: Option<Arc<dyn WalletSigner>>) {
        self.signer = signer;
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Shared busy counter, for the UI's global loading indicator.
    pub fn busy_tracker(&self) -> Arc<BusyTracker> {
        Arc::clone(&self.busy)
    }

    fn core(&self) -> ApiCore {
        ApiCore::new(Arc::clone(&self.transport), Arc::clone(&self.busy))
    }

    pub fn account_api(&self) -> AccountApi {
        AccountApi::new(
            self.core(),
            BroadcastCore::new(Arc::clone(&self.busy), self.signer.clone()),
            Arc::clone(&self.config),
        )
    }

    pub fn proposals_api(&self) -> ProposalsApi {
        ProposalsApi::new(self.core(), Arc::clone(&self.config))
    }

    pub fn validators_api(&self) -> ValidatorsApi {
        ValidatorsApi::new(self.core(), Arc::clone(&self.config))
    }
}
