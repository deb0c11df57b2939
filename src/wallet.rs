//! Wallet connection state and the external signer capability.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::Fee;
use crate::msg::EncodedMsg;

/// How the dashboard is connected to a wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionType {
    Disconnected,
    /// Read-only view over a pasted address.
    Address,
    /// Browser-extension signer able to sign and broadcast.
    Extension,
}

impl ConnectionType {
    /// Whether this connection can produce signatures. Total over all
    /// variants; every mutating operation consults this before doing
    /// anything else.
    pub fn has_signer(self) -> bool {
        match self {
            ConnectionType::Extension => true,
            ConnectionType::Disconnected | ConnectionType::Address => false,
        }
    }
}

impl std::fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConnectionType::Disconnected => "Disconnected",
            ConnectionType::Address => "Address",
            ConnectionType::Extension => "Extension",
        };
        write!(f, "{name}")
    }
}

/// Snapshot of the current wallet connection, replaced on every
/// connect/disconnect event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub account: String,
    pub connected: bool,
    pub connection_type: ConnectionType,
}

impl ConnectionInfo {
    pub fn new(account: impl Into<String>, connected: bool, connection_type: ConnectionType) -> Self {
        Self {
            account: account.into(),
            connected,
            connection_type,
        }
    }

    pub fn disconnected() -> Self {
        Self::new("", false, ConnectionType::Disconnected)
    }
}

/// Message-value encoding a signing backend accepts: amino-style JSON
/// objects for extension/hardware flows, canonical protobuf bytes for
/// direct signing. Chosen once per connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgEncoding {
    Amino,
    Direct,
}

/// Broadcast outcome as reported by the signer after inclusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastResult {
    pub height: u64,
    pub code: u32,
    pub transaction_hash: String,
    pub raw_log: String,
    pub gas_used: u64,
    pub gas_wanted: u64,
}

#[derive(Debug, Clone, Error)]
pub enum SignerError {
    #[error("signing failed: {0}")]
    Signing(String),
    #[error("broadcast failed: {0}")]
    Broadcast(String),
}

/// External sign-and-broadcast capability, implemented over a browser
/// extension in production and mocked in tests.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Encoding this backend expects message values in.
    fn encoding(&self) -> MsgEncoding;

    /// Signs the messages, submits the transaction and waits for
    /// inclusion. A nonzero code in the result is not an `Err`: the
    /// transaction made it on chain but failed there.
    async fn sign_and_broadcast(
        &self,
        signer_address: &str,
        messages: &[EncodedMsg],
        fee: &Fee,
        memo: &str,
    ) -> Result<BroadcastResult, SignerError>;
}
