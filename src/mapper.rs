//! Pure mapping from REST wire shapes into domain objects, plus the
//! page-merge functions used while draining paginated endpoints.
//!
//! Mapping failures are plain `anyhow` errors; the call wrapper converts
//! them into the error envelope so they never escape as panics.

use anyhow::{anyhow, bail};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::model::{
    Account, AccountType, Coin, ContinuousVestingData, DecCoin, Delegation, Delegations, Proposal,
    ProposalStatus, Proposals, Rewards, TallyResult, UnbondingDelegation, UnbondingDelegations,
    UnbondingEntry, Validator, ValidatorDescription, ValidatorRewards, ValidatorStatus, Validators,
};
use crate::wire::{
    AccountInfo, DelegationResponse, ProposalWire, RewardsResponse, UnbondingResponse,
    ValidatorWire, WireCoin,
};
use crate::Result;

pub fn map_account(address: &str, account: Option<AccountInfo>) -> Result<Account> {
    match account {
        None => bail!("Account is undefined"),
        Some(AccountInfo::Base(_)) => Ok(Account {
            address: address.to_owned(),
            account_type: AccountType::BaseAccount,
            continuous_vesting: None,
        }),
        Some(AccountInfo::ContinuousVesting(vesting)) => {
            let base = vesting.base_vesting_account;
            Ok(Account {
                address: address.to_owned(),
                account_type: AccountType::ContinuousVestingAccount,
                continuous_vesting: Some(ContinuousVestingData {
                    start_time: unix_seconds(&vesting.start_time)?,
                    end_time: unix_seconds(&base.end_time)?,
                    original_vesting: base
                        .original_vesting
                        .into_iter()
                        .map(map_wire_coin)
                        .collect::<Result<_>>()?,
                }),
            })
        }
    }
}

/// Synthetic record for an address the chain has no account for yet.
pub fn nonexistent_account(address: &str) -> Account {
    Account {
        address: address.to_owned(),
        account_type: AccountType::Nonexistent,
        continuous_vesting: None,
    }
}

pub fn map_coin(balance: Option<WireCoin>, denom: &str) -> Result<Coin> {
    match balance {
        Some(coin) => map_wire_coin(coin),
        None => Ok(Coin::zero(denom)),
    }
}

fn map_wire_coin(coin: WireCoin) -> Result<Coin> {
    Ok(Coin {
        amount: parse_amount(&coin.amount)?,
        denom: coin.denom,
    })
}

pub fn map_delegations(responses: Vec<DelegationResponse>) -> Result<Delegations> {
    map_and_add_delegations(Delegations::default(), responses)
}

pub fn map_and_add_delegations(
    mut delegations: Delegations,
    responses: Vec<DelegationResponse>,
) -> Result<Delegations> {
    for response in responses {
        let amount = parse_amount(&response.balance.amount)?;
        let validator = response.delegation.validator_address;
        delegations.total_delegated += amount;
        delegations.delegations.insert(
            validator.clone(),
            Delegation {
                validator_address: validator,
                amount,
            },
        );
    }
    Ok(delegations)
}

pub fn map_unbonding_delegations(responses: Vec<UnbondingResponse>) -> Result<UnbondingDelegations> {
    map_and_add_unbonding_delegations(UnbondingDelegations::default(), responses)
}

pub fn map_and_add_unbonding_delegations(
    mut undelegations: UnbondingDelegations,
    responses: Vec<UnbondingResponse>,
) -> Result<UnbondingDelegations> {
    for response in responses {
        let mut entries = Vec::with_capacity(response.entries.len());
        for entry in response.entries {
            let amount = parse_amount(&entry.balance)?;
            undelegations.total_undelegating += amount;
            entries.push(UnbondingEntry {
                amount,
                completion_time: rfc3339(&entry.completion_time)?,
            });
        }
        let validator = response.validator_address;
        undelegations.undelegations.insert(
            validator.clone(),
            UnbondingDelegation {
                validator_address: validator,
                entries,
            },
        );
    }
    Ok(undelegations)
}

pub fn map_rewards(response: RewardsResponse, staking_denom: &str) -> Result<Rewards> {
    let mut rewards = Rewards::default();
    for validator_reward in response.rewards {
        let validator = validator_reward.validator_address;
        let coins = validator_reward
            .reward
            .into_iter()
            .map(|coin| {
                Ok(DecCoin {
                    amount: parse_decimal(&coin.amount)?,
                    denom: coin.denom,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        rewards.rewards.insert(
            validator.clone(),
            ValidatorRewards {
                validator_address: validator,
                rewards: coins,
            },
        );
    }
    rewards.total_rewards = response
        .total
        .iter()
        .find(|coin| coin.denom == staking_denom)
        .map(|coin| parse_decimal(&coin.amount))
        .transpose()?
        .unwrap_or_default();
    Ok(rewards)
}

pub fn map_validators(validators: Vec<ValidatorWire>) -> Result<Validators> {
    map_and_add_validators(Validators::default(), validators)
}

pub fn map_and_add_validators(
    mut accumulated: Validators,
    validators: Vec<ValidatorWire>,
) -> Result<Validators> {
    for wire in validators {
        let status = validator_status(&wire.status)?;
        if status == ValidatorStatus::Bonded {
            accumulated.number_of_active += 1;
        }
        accumulated.validators.push(Validator {
            operator_address: wire.operator_address,
            jailed: wire.jailed,
            status,
            tokens: parse_amount(&wire.tokens)?,
            commission_rate: parse_rate(&wire.commission.commission_rates.rate)?,
            description: ValidatorDescription {
                moniker: wire.description.moniker,
                identity: wire.description.identity,
                website: wire.description.website,
                security_contact: wire.description.security_contact,
                details: wire.description.details,
            },
        });
    }
    Ok(accumulated)
}

pub fn map_proposals(proposals: Vec<ProposalWire>) -> Result<Proposals> {
    let mut mapped = Proposals::default();
    for wire in proposals {
        let proposal = map_proposal_wire(wire)?;
        if proposal.status == ProposalStatus::VotingPeriod {
            mapped.number_of_active += 1;
        }
        mapped.proposals.push(proposal);
    }
    Ok(mapped)
}

pub fn map_proposal(proposal: Option<ProposalWire>) -> Result<Proposal> {
    map_proposal_wire(proposal.ok_or_else(|| anyhow!("Proposal is undefined"))?)
}

fn map_proposal_wire(wire: ProposalWire) -> Result<Proposal> {
    Ok(Proposal {
        proposal_id: wire.proposal_id.parse()?,
        title: wire.content.title,
        description: wire.content.description,
        status: proposal_status(&wire.status)?,
        final_tally_result: TallyResult {
            yes: parse_tally(&wire.final_tally_result.yes)?,
            abstain: parse_tally(&wire.final_tally_result.abstain)?,
            no: parse_tally(&wire.final_tally_result.no)?,
            no_with_veto: parse_tally(&wire.final_tally_result.no_with_veto)?,
        },
        submit_time: wire.submit_time.as_deref().map(rfc3339).transpose()?,
        deposit_end_time: wire.deposit_end_time.as_deref().map(rfc3339).transpose()?,
        voting_start_time: wire.voting_start_time.as_deref().map(rfc3339).transpose()?,
        voting_end_time: wire.voting_end_time.as_deref().map(rfc3339).transpose()?,
        total_deposit: wire
            .total_deposit
            .into_iter()
            .map(map_wire_coin)
            .collect::<Result<_>>()?,
    })
}

fn validator_status(status: &str) -> Result<ValidatorStatus> {
    Ok(match status {
        "BOND_STATUS_BONDED" => ValidatorStatus::Bonded,
        "BOND_STATUS_UNBONDING" => ValidatorStatus::Unbonding,
        "BOND_STATUS_UNBONDED" => ValidatorStatus::Unbonded,
        "BOND_STATUS_UNSPECIFIED" => ValidatorStatus::Unspecified,
        other => bail!("unknown validator status: {other}"),
    })
}

fn proposal_status(status: &str) -> Result<ProposalStatus> {
    Ok(match status {
        "PROPOSAL_STATUS_DEPOSIT_PERIOD" => ProposalStatus::DepositPeriod,
        "PROPOSAL_STATUS_VOTING_PERIOD" => ProposalStatus::VotingPeriod,
        "PROPOSAL_STATUS_PASSED" => ProposalStatus::Passed,
        "PROPOSAL_STATUS_REJECTED" => ProposalStatus::Rejected,
        "PROPOSAL_STATUS_FAILED" => ProposalStatus::Failed,
        "PROPOSAL_STATUS_UNSPECIFIED" => ProposalStatus::Unspecified,
        other => bail!("unknown proposal status: {other}"),
    })
}

fn parse_amount(amount: &str) -> Result<u128> {
    amount
        .parse()
        .map_err(|err| anyhow!("invalid amount {amount:?}: {err}"))
}

// Empty tallies show up on proposals still in deposit period.
fn parse_tally(amount: &str) -> Result<u128> {
    if amount.is_empty() {
        return Ok(0);
    }
    parse_amount(amount)
}

fn parse_decimal(amount: &str) -> Result<Decimal> {
    Decimal::from_str(amount).map_err(|err| anyhow!("invalid decimal {amount:?}: {err}"))
}

// Genesis validators can come back without a commission rate.
fn parse_rate(rate: &str) -> Result<Decimal> {
    if rate.is_empty() {
        return Ok(Decimal::ZERO);
    }
    parse_decimal(rate)
}

fn unix_seconds(seconds: &str) -> Result<DateTime<Utc>> {
    let seconds: i64 = seconds
        .parse()
        .map_err(|err| anyhow!("invalid timestamp {seconds:?}: {err}"))?;
    DateTime::from_timestamp(seconds, 0).ok_or_else(|| anyhow!("timestamp out of range: {seconds}"))
}

fn rfc3339(timestamp: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(timestamp)
        .map_err(|err| anyhow!("invalid timestamp {timestamp:?}: {err}"))?
        .with_timezone(&Utc))
}
