//! Shared mocks: a scripted transport and a recording wallet signer.

// Each integration test binary compiles its own copy; not every binary
// uses every helper.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use skiff::config::{ChainConfig, OperationGas};
use skiff::model::Fee;
use skiff::msg::EncodedMsg;
use skiff::transport::{RequestConfig, Transport, TransportError};
use skiff::wallet::{BroadcastResult, MsgEncoding, SignerError, WalletSigner};

pub const ADDRESS: &str = "c4e17svcuc8dt7gr4hlu3rmeu5u0jpc7snar3kdr55";
pub const VALIDATOR: &str = "c4evaloper1psaq0n2lzh84lzgh39kghuy0n256xltlg6yh4a";
pub const SECOND_VALIDATOR: &str = "c4evaloper1zwl9pd5mmn23mze2686494w9c2fyymxaqrhhl5";
pub const DENOM: &str = "uc4e";

pub fn test_config() -> ChainConfig {
    ChainConfig {
        chain_id: "c4e-testnet".to_owned(),
        api_url: "https://lcd.example".to_owned(),
        staking_denom: DENOM.to_owned(),
        view_denom_decimals: 6,
        operation_gas: OperationGas {
            vote: "10000".to_owned(),
            delegate: "20000".to_owned(),
            undelegate: "30000".to_owned(),
            redelegate: "40000".to_owned(),
            claim_rewards: "50000".to_owned(),
        },
    }
}

type ScriptedResponse = Result<Value, TransportError>;

/// Transport that replays a scripted queue of responses and records
/// every request it saw.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<ScriptedResponse>>,
    requests: Mutex<Vec<RequestConfig>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, body: Value) {
        self.responses.lock().unwrap().push_back(Ok(body));
    }

    pub fn push_status_error(&self, status: u16, code: i64, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(TransportError::Status {
                message: format!("Request failed with status code {status}"),
                status,
                body: serde_json::json!({"code": code, "message": message, "details": []})
                    .to_string(),
            }));
    }

    pub fn push_network_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(TransportError::Network {
                message: message.to_owned(),
            }));
    }

    pub fn requests(&self) -> Vec<RequestConfig> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(&self, config: &RequestConfig) -> Result<Value, TransportError> {
        self.requests.lock().unwrap().push(config.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected request: mock response queue is empty")
    }
}

#[derive(Debug, Clone)]
pub struct RecordedSigning {
    pub signer_address: String,
    pub messages: Vec<EncodedMsg>,
    pub fee: Fee,
    pub memo: String,
}

/// Signer that records every sign-and-broadcast call and replies with a
/// preconfigured result.
pub struct MockSigner {
    encoding: MsgEncoding,
    result: Mutex<Result<BroadcastResult, SignerError>>,
    calls: Mutex<Vec<RecordedSigning>>,
}

impl MockSigner {
    pub fn new(encoding: MsgEncoding, result: Result<BroadcastResult, SignerError>) -> Self {
        Self {
            encoding,
            result: Mutex::new(result),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedSigning> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl WalletSigner for MockSigner {
    fn encoding(&self) -> MsgEncoding {
        self.encoding
    }

    async fn sign_and_broadcast(
        &self,
        signer_address: &str,
        messages: &[EncodedMsg],
        fee: &Fee,
        memo: &str,
    ) -> Result<BroadcastResult, SignerError> {
        self.calls.lock().unwrap().push(RecordedSigning {
            signer_address: signer_address.to_owned(),
            messages: messages.to_vec(),
            fee: fee.clone(),
            memo: memo.to_owned(),
        });
        self.result.lock().unwrap().clone()
    }
}

pub fn tx_success_response() -> BroadcastResult {
    BroadcastResult {
        height: 123_222,
        code: 0,
        transaction_hash: "8653E21B825AAFCDC75261EAEFF71207044AF40DE390BEB31C8B0C9AA7BAA3EA"
            .to_owned(),
        raw_log: "Success log".to_owned(),
        gas_used: 34,
        gas_wanted: 22,
    }
}

pub fn tx_error_response() -> BroadcastResult {
    BroadcastResult {
        height: 67_812,
        code: 3,
        transaction_hash: "D1A61D1288598A7A5718A4ABC6176D3E70E374A81D91623DE88BDF516A25FBE8"
            .to_owned(),
        raw_log: "Error log".to_owned(),
        gas_used: 11,
        gas_wanted: 44,
    }
}

pub fn delegations_page(
    address: &str,
    validators: &[&str],
    balances: &[&str],
    next_key: Option<&str>,
) -> Value {
    let responses: Vec<Value> = validators
        .iter()
        .zip(balances)
        .map(|(validator, balance)| {
            serde_json::json!({
                "delegation": {
                    "delegator_address": address,
                    "validator_address": validator,
                    "shares": format!("{balance}.000000000000000000"),
                },
                "balance": {"denom": DENOM, "amount": balance},
            })
        })
        .collect();
    serde_json::json!({
        "delegation_responses": responses,
        "pagination": {"next_key": next_key, "total": validators.len().to_string()},
    })
}

pub fn unbonding_page(
    address: &str,
    validators: &[&str],
    entries: &[&[&str]],
    next_key: Option<&str>,
) -> Value {
    let responses: Vec<Value> = validators
        .iter()
        .zip(entries)
        .map(|(validator, balances)| {
            let entries: Vec<Value> = balances
                .iter()
                .map(|balance| {
                    serde_json::json!({
                        "creation_height": "100",
                        "completion_time": "2022-08-03T12:00:00Z",
                        "initial_balance": balance,
                        "balance": balance,
                    })
                })
                .collect();
            serde_json::json!({
                "delegator_address": address,
                "validator_address": validator,
                "entries": entries,
            })
        })
        .collect();
    serde_json::json!({
        "unbonding_responses": responses,
        "pagination": {"next_key": next_key, "total": validators.len().to_string()},
    })
}
