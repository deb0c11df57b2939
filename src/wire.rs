//! JSON shapes returned by the chain's REST gateway.

use serde::{Deserialize, Deserializer};

/// `pagination` block attached to every list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageInfo {
    #[serde(default, deserialize_with = "empty_key_as_none")]
    pub next_key: Option<String>,
    #[serde(default)]
    pub total: Option<String>,
}

// Gateways disagree on exhausted cursors: most emit null, some emit "".
fn empty_key_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let key: Option<String> = Option::deserialize(deserializer)?;
    Ok(key.filter(|key| !key.is_empty()))
}

/// List responses that carry a pagination cursor.
pub trait Paginated {
    fn next_key(&self) -> Option<&str>;
}

macro_rules! paginated {
    ($ty:ty) => {
        impl Paginated for $ty {
            fn next_key(&self) -> Option<&str> {
                self.pagination.next_key.as_deref()
            }
        }
    };
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireCoin {
    pub denom: String,
    pub amount: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountResponse {
    #[serde(default)]
    pub account: Option<AccountInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "@type")]
pub enum AccountInfo {
    #[serde(rename = "/cosmos.auth.v1beta1.BaseAccount")]
    Base(BaseAccount),
    #[serde(rename = "/cosmos.vesting.v1beta1.ContinuousVestingAccount")]
    ContinuousVesting(ContinuousVestingAccount),
}

#[derive(Debug, Clone, Deserialize)]
pub struct BaseAccount {
    pub address: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub sequence: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContinuousVestingAccount {
    pub base_vesting_account: BaseVestingAccount,
    /// Unix seconds, as a decimal string.
    pub start_time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BaseVestingAccount {
    pub base_account: BaseAccount,
    #[serde(default)]
    pub original_vesting: Vec<WireCoin>,
    /// Unix seconds, as a decimal string.
    pub end_time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BalanceResponse {
    #[serde(default)]
    pub balance: Option<WireCoin>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DelegationsResponse {
    #[serde(default)]
    pub delegation_responses: Vec<DelegationResponse>,
    #[serde(default)]
    pub pagination: PageInfo,
}
paginated!(DelegationsResponse);

#[derive(Debug, Clone, Deserialize)]
pub struct DelegationResponse {
    pub delegation: DelegationDetail,
    pub balance: WireCoin,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DelegationDetail {
    pub delegator_address: String,
    pub validator_address: String,
    #[serde(default)]
    pub shares: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnbondingDelegationsResponse {
    #[serde(default)]
    pub unbonding_responses: Vec<UnbondingResponse>,
    #[serde(default)]
    pub pagination: PageInfo,
}
paginated!(UnbondingDelegationsResponse);

#[derive(Debug, Clone, Deserialize)]
pub struct UnbondingResponse {
    pub delegator_address: String,
    pub validator_address: String,
    #[serde(default)]
    pub entries: Vec<UnbondingEntryWire>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnbondingEntryWire {
    #[serde(default)]
    pub creation_height: String,
    /// RFC 3339 timestamp.
    pub completion_time: String,
    #[serde(default)]
    pub initial_balance: String,
    pub balance: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RewardsResponse {
    #[serde(default)]
    pub rewards: Vec<ValidatorRewardWire>,
    #[serde(default)]
    pub total: Vec<WireCoin>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidatorRewardWire {
    pub validator_address: String,
    #[serde(default)]
    pub reward: Vec<WireCoin>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidatorsResponse {
    #[serde(default)]
    pub validators: Vec<ValidatorWire>,
    #[serde(default)]
    pub pagination: PageInfo,
}
paginated!(ValidatorsResponse);

#[derive(Debug, Clone, Deserialize)]
pub struct ValidatorWire {
    pub operator_address: String,
    #[serde(default)]
    pub jailed: bool,
    pub status: String,
    pub tokens: String,
    #[serde(default)]
    pub description: ValidatorDescriptionWire,
    #[serde(default)]
    pub commission: CommissionWire,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidatorDescriptionWire {
    #[serde(default)]
    pub moniker: String,
    #[serde(default)]
    pub identity: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub security_contact: String,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommissionWire {
    #[serde(default)]
    pub commission_rates: CommissionRatesWire,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommissionRatesWire {
    #[serde(default)]
    pub rate: String,
    #[serde(default)]
    pub max_rate: String,
    #[serde(default)]
    pub max_change_rate: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProposalsResponse {
    #[serde(default)]
    pub proposals: Vec<ProposalWire>,
    #[serde(default)]
    pub pagination: PageInfo,
}
paginated!(ProposalsResponse);

#[derive(Debug, Clone, Deserialize)]
pub struct ProposalResponse {
    #[serde(default)]
    pub proposal: Option<ProposalWire>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProposalWire {
    pub proposal_id: String,
    #[serde(default)]
    pub content: ProposalContentWire,
    pub status: String,
    #[serde(default)]
    pub final_tally_result: TallyWire,
    #[serde(default)]
    pub submit_time: Option<String>,
    #[serde(default)]
    pub deposit_end_time: Option<String>,
    #[serde(default)]
    pub voting_start_time: Option<String>,
    #[serde(default)]
    pub voting_end_time: Option<String>,
    #[serde(default)]
    pub total_deposit: Vec<WireCoin>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProposalContentWire {
    #[serde(default, rename = "@type")]
    pub type_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TallyWire {
    #[serde(default)]
    pub yes: String,
    #[serde(default)]
    pub abstain: String,
    #[serde(default)]
    pub no: String,
    #[serde(default)]
    pub no_with_veto: String,
}
