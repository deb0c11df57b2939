//! Transaction signing/broadcast orchestration.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error};

use crate::busy::{BusyTracker, LocalSpinner};
use crate::model::{Fee, StdCoin, TxData};
use crate::msg::EncodedMsg;
use crate::response::RequestResponse;
use crate::wallet::{ConnectionInfo, MsgEncoding, WalletSigner};

/// Failure of a mutating operation. `tx_data` is present when the
/// transaction reached the chain and failed there.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TxBroadcastError {
    pub message: String,
    pub tx_data: Option<TxData>,
}

impl TxBroadcastError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tx_data: None,
        }
    }

    pub fn with_tx_data(message: impl Into<String>, tx_data: TxData) -> Self {
        Self {
            message: message.into(),
            tx_data: Some(tx_data),
        }
    }
}

pub type TxResponse = RequestResponse<TxData, TxBroadcastError>;

/// Drives a [`WalletSigner`] for every mutating operation.
#[derive(Clone)]
pub struct BroadcastCore {
    busy: Arc<BusyTracker>,
    signer: Option<Arc<dyn WalletSigner>>,
}

impl BroadcastCore {
    pub fn new(busy: Arc<BusyTracker>, signer: Option<Arc<dyn WalletSigner>>) -> Self {
        Self { busy, signer }
    }

    /// Fee for one operation: the gas limit varies per operation, the fee
    /// amount is always zero in the fee coin (gas is subsidized).
    pub fn create_fee(gas: impl Into<String>, denom: &str) -> Fee {
        Fee {
            amount: vec![StdCoin {
                amount: "0".to_owned(),
                denom: denom.to_owned(),
            }],
            gas: gas.into(),
        }
    }

    /// Builds messages through `get_messages` and drives the signer.
    ///
    /// The connection check runs before anything else: without a usable
    /// signer no message is constructed and nothing touches the network.
    pub async fn sign_and_broadcast(
        &self,
        connection: &ConnectionInfo,
        get_messages: impl FnOnce(MsgEncoding) -> Result<Vec<EncodedMsg>, TxBroadcastError>,
        fee: Fee,
        memo: &str,
        lock_screen: bool,
        local_spinner: Option<Arc<dyn LocalSpinner>>,
    ) -> TxResponse {
        let _busy = self.busy.acquire(lock_screen, local_spinner);

        if !connection.connection_type.has_signer() {
            let err = TxBroadcastError::new(format!(
                "No signer for connection type: {}",
                connection.connection_type
            ));
            error!("[sign_and_broadcast] {}", err.message);
            return RequestResponse::Error(err);
        }
        let signer = match &self.signer {
            Some(signer) => signer,
            None => {
                let err = TxBroadcastError::new("No wallet signer configured");
                error!("[sign_and_broadcast] {}", err.message);
                return RequestResponse::Error(err);
            }
        };

        let messages = match get_messages(signer.encoding()) {
            Ok(messages) => messages,
            Err(err) => return RequestResponse::Error(err),
        };
        debug!(
            "[sign_and_broadcast] {} message(s), fee gas {}, signer {}",
            messages.len(),
            fee.gas,
            connection.account
        );

        match signer
            .sign_and_broadcast(&connection.account, &messages, &fee, memo)
            .await
        {
            Ok(result) => {
                let tx_data = TxData::from(result);
                debug!(
                    "[sign_and_broadcast] included at height {} with code {}",
                    tx_data.height, tx_data.code
                );
                if tx_data.code == 0 {
                    RequestResponse::Success(tx_data)
                } else {
                    let err = TxBroadcastError::with_tx_data("Transaction Broadcast error", tx_data);
                    error!(
                        "[sign_and_broadcast] {}: {}",
                        err.message,
                        err.tx_data.as_ref().map(|tx| tx.raw_log.as_str()).unwrap_or_default()
                    );
                    RequestResponse::Error(err)
                }
            }
            Err(err) => {
                error!("[sign_and_broadcast] signer error: {err}");
                RequestResponse::Error(TxBroadcastError::new(err.to_string()))
            }
        }
    }
}
