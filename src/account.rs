//! Account, staking and distribution operations for one wallet address.

use std::sync::Arc;

use cosmos_sdk_proto::cosmos::gov::v1beta1::VoteOption;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use tracing::info;

use crate::api::{ApiCore, ApiResponse, DisplayAsError};
use crate::broadcast::{BroadcastCore, TxBroadcastError, TxResponse};
use crate::config::ChainConfig;
use crate::mapper;
use crate::model::{
    Account, Coin, Delegations, Rewards, StakingPool, UnbondingDelegations,
};
use crate::msg;
use crate::response::{BlockchainApiError, ErrorData, RequestResponse};
use crate::transport::RequestConfig;
use crate::utils::to_base_units;
use crate::wallet::ConnectionInfo;
use crate::wire::{
    AccountResponse, BalanceResponse, DelegationsResponse, RewardsResponse,
    UnbondingDelegationsResponse,
};

lazy_static! {
    static ref NOT_FOUND_PATTERN: Regex =
        Regex::new("(?i)rpc error: code = NotFound").expect("valid pattern");
}

/// The one place that decides whether a failed account fetch is the
/// expected "address has no on-chain record yet" state. Every other
/// status/code combination stays a reportable error.
pub fn is_account_not_found(status: Option<u16>, data: Option<&BlockchainApiError>) -> bool {
    match (status, data) {
        (Some(404), Some(data)) => data.code == 5 && NOT_FOUND_PATTERN.is_match(&data.message),
        _ => false,
    }
}

pub struct AccountApi {
    core: ApiCore,
    broadcast: BroadcastCore,
    config: Arc<ChainConfig>,
}

impl AccountApi {
    pub(crate) fn new(core: ApiCore, broadcast: BroadcastCore, config: Arc<ChainConfig>) -> Self {
        Self {
            core,
            broadcast,
            config,
        }
    }

    fn url(&self, path: String) -> RequestConfig {
        RequestConfig::get(format!("{}{}", self.config.api_url, path))
    }

    /// Fetches the account record. A 404 classified as not-found comes
    /// back as a successful synthetic nonexistent account instead of an
    /// error.
    pub async fn fetch_account(&self, address: &str, lock_screen: bool) -> ApiResponse<Account> {
        fn not_found_is_expected(err: &ErrorData<BlockchainApiError>) -> bool {
            !is_account_not_found(err.status, err.data.as_ref())
        }

        let request = self.url(format!("/cosmos/auth/v1beta1/accounts/{address}"));
        let map_address = address.to_owned();
        let handle_address = address.to_owned();
        let handle_error = move |err: ErrorData<BlockchainApiError>| {
            if is_account_not_found(err.status, err.data.as_ref()) {
                RequestResponse::Success(mapper::nonexistent_account(&handle_address))
            } else {
                RequestResponse::Error(err)
            }
        };
        self.core
            .get_handled(
                request,
                move |body: AccountResponse| mapper::map_account(&map_address, body.account),
                lock_screen,
                None,
                "fetch_account",
                Some(&not_found_is_expected as &DisplayAsError),
                handle_error,
            )
            .await
    }

    pub async fn fetch_balance(
        &self,
        address: &str,
        denom: &str,
        lock_screen: bool,
    ) -> ApiResponse<Coin> {
        let request = self
            .url(format!("/cosmos/bank/v1beta1/balances/{address}/by_denom"))
            .with_query("denom", denom);
        let denom = denom.to_owned();
        self.core
            .get(
                request,
                move |body: BalanceResponse| mapper::map_coin(body.balance, &denom),
                lock_screen,
                None,
                "fetch_balance",
                None,
            )
            .await
    }

    /// Drains every page of the delegations endpoint.
    pub async fn fetch_delegations(
        &self,
        address: &str,
        lock_screen: bool,
    ) -> ApiResponse<Delegations> {
        let request = self.url(format!("/cosmos/staking/v1beta1/delegations/{address}"));
        self.core
            .get_all_paginated(
                request,
                |body: DelegationsResponse| mapper::map_delegations(body.delegation_responses),
                |so_far, body: DelegationsResponse| {
                    mapper::map_and_add_delegations(so_far, body.delegation_responses)
                },
                lock_screen,
                None,
                "fetch_delegations",
                None,
            )
            .await
    }

    /// Drains every page of the unbonding-delegations endpoint.
    pub async fn fetch_unbonding_delegations(
        &self,
        address: &str,
        lock_screen: bool,
    ) -> ApiResponse<UnbondingDelegations> {
        let request = self.url(format!(
            "/cosmos/staking/v1beta1/delegators/{address}/unbonding_delegations"
        ));
        self.core
            .get_all_paginated(
                request,
                |body: UnbondingDelegationsResponse| {
                    mapper::map_unbonding_delegations(body.unbonding_responses)
                },
                |so_far, body: UnbondingDelegationsResponse| {
                    mapper::map_and_add_unbonding_delegations(so_far, body.unbonding_responses)
                },
                lock_screen,
                None,
                "fetch_unbonding_delegations",
                None,
            )
            .await
    }

    pub async fn fetch_rewards(&self, address: &str, lock_screen: bool) -> ApiResponse<Rewards> {
        let request = self.url(format!(
            "/cosmos/distribution/v1beta1/delegators/{address}/rewards"
        ));
        let staking_denom = self.config.staking_denom.clone();
        self.core
            .get(
                request,
                move |body: RewardsResponse| mapper::map_rewards(body, &staking_denom),
                lock_screen,
                None,
                "fetch_rewards",
                None,
            )
            .await
    }

    /// Composes the aggregate stake position from three independent
    /// fetches running in parallel; each participates in the busy
    /// counter on its own.
    pub async fn fetch_staking_pool(
        &self,
        address: &str,
        lock_screen: bool,
    ) -> ApiResponse<StakingPool> {
        let (balance, delegations, undelegations) = futures::join!(
            self.fetch_balance(address, &self.config.staking_denom, lock_screen),
            self.fetch_delegations(address, lock_screen),
            self.fetch_unbonding_delegations(address, lock_screen),
        );
        let balance = match balance {
            RequestResponse::Success(balance) => balance,
            RequestResponse::Error(err) => return RequestResponse::Error(err),
        };
        let delegations = match delegations {
            RequestResponse::Success(delegations) => delegations,
            RequestResponse::Error(err) => return RequestResponse::Error(err),
        };
        let undelegations = match undelegations {
            RequestResponse::Success(undelegations) => undelegations,
            RequestResponse::Error(err) => return RequestResponse::Error(err),
        };
        RequestResponse::Success(StakingPool {
            available: balance.amount,
            delegated: delegations.total_delegated,
            unbonding: undelegations.total_undelegating,
        })
    }

    /// Delegates `amount` (view denom) to `validator`. `reserved_fee`
    /// overrides the configured gas limit.
    pub async fn delegate(
        &self,
        connection: &ConnectionInfo,
        validator: &str,
        amount: Decimal,
        reserved_fee: Option<u64>,
    ) -> TxResponse {
        let bc_amount = to_base_units(amount, self.config.conversion_factor());
        let denom = self.config.staking_denom.clone();
        let delegator = connection.account.clone();
        let validator = validator.to_owned();
        let get_messages = move |encoding| {
            Ok(vec![msg::delegate(
                encoding, &delegator, &validator, &bc_amount, &denom,
            )])
        };
        let gas = match reserved_fee {
            Some(gas) => gas.to_string(),
            None => self.config.operation_gas.delegate.clone(),
        };
        let fee = BroadcastCore::create_fee(gas, &self.config.staking_denom);
        self.broadcast
            .sign_and_broadcast(connection, get_messages, fee, "", true, None)
            .await
    }

    pub async fn undelegate(
        &self,
        connection: &ConnectionInfo,
        validator: &str,
        amount: Decimal,
    ) -> TxResponse {
        let bc_amount = to_base_units(amount, self.config.conversion_factor());
        let denom = self.config.staking_denom.clone();
        let delegator = connection.account.clone();
        let validator = validator.to_owned();
        let get_messages = move |encoding| {
            Ok(vec![msg::undelegate(
                encoding, &delegator, &validator, &bc_amount, &denom,
            )])
        };
        let fee = BroadcastCore::create_fee(
            self.config.operation_gas.undelegate.clone(),
            &self.config.staking_denom,
        );
        self.broadcast
            .sign_and_broadcast(connection, get_messages, fee, "", true, None)
            .await
    }

    pub async fn redelegate(
        &self,
        connection: &ConnectionInfo,
        validator_src: &str,
        validator_dst: &str,
        amount: Decimal,
    ) -> TxResponse {
        let bc_amount = to_base_units(amount, self.config.conversion_factor());
        let denom = self.config.staking_denom.clone();
        let delegator = connection.account.clone();
        let validator_src = validator_src.to_owned();
        let validator_dst = validator_dst.to_owned();
        let get_messages = move |encoding| {
            Ok(vec![msg::begin_redelegate(
                encoding,
                &delegator,
                &validator_src,
                &validator_dst,
                &bc_amount,
                &denom,
            )])
        };
        let fee = BroadcastCore::create_fee(
            self.config.operation_gas.redelegate.clone(),
            &self.config.staking_denom,
        );
        self.broadcast
            .sign_and_broadcast(connection, get_messages, fee, "", true, None)
            .await
    }

    pub async fn vote(
        &self,
        connection: &ConnectionInfo,
        option: VoteOption,
        proposal_id: u64,
    ) -> TxResponse {
        let voter = connection.account.clone();
        let get_messages = move |encoding| Ok(vec![msg::vote(encoding, &voter, proposal_id, option)]);
        let fee = BroadcastCore::create_fee(
            self.config.operation_gas.vote.clone(),
            &self.config.staking_denom,
        );
        self.broadcast
            .sign_and_broadcast(connection, get_messages, fee, "", true, None)
            .await
    }

    /// One withdraw-reward message per validator. An empty validator set
    /// fails before the signer is ever consulted.
    pub async fn claim_rewards(
        &self,
        connection: &ConnectionInfo,
        validators: &[String],
    ) -> TxResponse {
        let delegator = connection.account.clone();
        let validators = validators.to_vec();
        let get_messages = move |encoding| {
            let messages: Vec<_> = validators
                .iter()
                .map(|validator| msg::withdraw_delegator_reward(encoding, &delegator, validator))
                .collect();
            if messages.is_empty() {
                info!("[claim_rewards] no rewards to claim");
                return Err(TxBroadcastError::new("No rewards to claim"));
            }
            Ok(messages)
        };
        let fee = BroadcastCore::create_fee(
            self.config.operation_gas.claim_rewards.clone(),
            &self.config.staking_denom,
        );
        self.broadcast
            .sign_and_broadcast(connection, get_messages, fee, "", true, None)
            .await
    }
}
