//! Domain objects exposed to the dashboard stores.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::wallet::BroadcastResult;

/// Coin in the chain's base denomination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coin {
    pub amount: u128,
    pub denom: String,
}

impl Coin {
    pub fn zero(denom: impl Into<String>) -> Self {
        Self {
            amount: 0,
            denom: denom.into(),
        }
    }
}

/// Coin with a fractional amount, as used by distribution rewards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecCoin {
    pub amount: Decimal,
    pub denom: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    BaseAccount,
    ContinuousVestingAccount,
    /// Address with no on-chain record yet.
    Nonexistent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuousVestingData {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub original_vesting: Vec<Coin>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub address: String,
    pub account_type: AccountType,
    pub continuous_vesting: Option<ContinuousVestingData>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delegation {
    pub validator_address: String,
    pub amount: u128,
}

/// Delegations keyed by validator, with a running total kept in step with
/// the map across paginated merges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delegations {
    pub delegations: HashMap<String, Delegation>,
    pub total_delegated: u128,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnbondingEntry {
    pub amount: u128,
    pub completion_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnbondingDelegation {
    pub validator_address: String,
    pub entries: Vec<UnbondingEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnbondingDelegations {
    pub undelegations: HashMap<String, UnbondingDelegation>,
    pub total_undelegating: u128,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorRewards {
    pub validator_address: String,
    pub rewards: Vec<DecCoin>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rewards {
    pub rewards: HashMap<String, ValidatorRewards>,
    /// Total claimable in the staking denom.
    pub total_rewards: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorStatus {
    Bonded,
    Unbonding,
    Unbonded,
    Unspecified,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatorDescription {
    pub moniker: String,
    pub identity: String,
    pub website: String,
    pub security_contact: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validator {
    pub operator_address: String,
    pub jailed: bool,
    pub status: ValidatorStatus,
    pub tokens: u128,
    pub commission_rate: Decimal,
    pub description: ValidatorDescription,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validators {
    pub validators: Vec<Validator>,
    pub number_of_active: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalStatus {
    DepositPeriod,
    VotingPeriod,
    Passed,
    Rejected,
    Failed,
    Unspecified,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TallyResult {
    pub yes: u128,
    pub abstain: u128,
    pub no: u128,
    pub no_with_veto: u128,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    pub proposal_id: u64,
    pub title: String,
    pub description: String,
    pub status: ProposalStatus,
    pub final_tally_result: TallyResult,
    pub submit_time: Option<DateTime<Utc>>,
    pub deposit_end_time: Option<DateTime<Utc>>,
    pub voting_start_time: Option<DateTime<Utc>>,
    pub voting_end_time: Option<DateTime<Utc>>,
    pub total_deposit: Vec<Coin>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Proposals {
    pub proposals: Vec<Proposal>,
    pub number_of_active: usize,
}

/// Aggregate stake position composed from three independent fetches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StakingPool {
    pub available: u128,
    pub delegated: u128,
    pub unbonding: u128,
}

impl StakingPool {
    pub fn total(&self) -> u128 {
        self.available + self.delegated + self.unbonding
    }
}

/// Diagnostics from a broadcast, populated on success and failure alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxData {
    pub height: u64,
    pub code: u32,
    pub transaction_hash: String,
    pub raw_log: String,
    pub gas_used: u64,
    pub gas_wanted: u64,
}

impl From<BroadcastResult> for TxData {
    fn from(result: BroadcastResult) -> Self {
        Self {
            height: result.height,
            code: result.code,
            transaction_hash: result.transaction_hash,
            raw_log: result.raw_log,
            gas_used: result.gas_used,
            gas_wanted: result.gas_wanted,
        }
    }
}

/// Coin attached to a fee, kept as strings the way signers expect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StdCoin {
    pub amount: String,
    pub denom: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fee {
    pub amount: Vec<StdCoin>,
    pub gas: String,
}
