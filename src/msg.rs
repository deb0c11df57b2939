//! Protocol message construction for staking, governance and
//! distribution operations.
//!
//! Every operation builds the same logical message in one of two value
//! encodings depending on the signing backend: amino-style JSON objects
//! or protobuf bytes. Both share a single type URL per message kind.

use cosmos_sdk_proto::cosmos::base::v1beta1::Coin;
use cosmos_sdk_proto::cosmos::distribution::v1beta1::MsgWithdrawDelegatorReward;
use cosmos_sdk_proto::cosmos::gov::v1beta1::{MsgVote, VoteOption};
use cosmos_sdk_proto::cosmos::staking::v1beta1::{MsgBeginRedelegate, MsgDelegate, MsgUndelegate};
use prost::Message;
use serde_json::json;

use crate::wallet::MsgEncoding;

pub const MSG_DELEGATE_TYPE_URL: &str = "/cosmos.staking.v1beta1.MsgDelegate";
pub const MSG_UNDELEGATE_TYPE_URL: &str = "/cosmos.staking.v1beta1.MsgUndelegate";
pub const MSG_BEGIN_REDELEGATE_TYPE_URL: &str = "/cosmos.staking.v1beta1.MsgBeginRedelegate";
pub const MSG_VOTE_TYPE_URL: &str = "/cosmos.gov.v1beta1.MsgVote";
pub const MSG_WITHDRAW_DELEGATOR_REWARD_TYPE_URL: &str =
    "/cosmos.distribution.v1beta1.MsgWithdrawDelegatorReward";

/// Message value in the encoding the signing backend expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MsgValue {
    Amino(serde_json::Value),
    Proto(Vec<u8>),
}

/// Typed message addressed by its fully-qualified type URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedMsg {
    pub type_url: &'static str,
    pub value: MsgValue,
}

pub fn delegate(
    encoding: MsgEncoding,
    delegator: &str,
    validator: &str,
    amount: &str,
    denom: &str,
) -> EncodedMsg {
    let value = match encoding {
        MsgEncoding::Amino => MsgValue::Amino(json!({
            "delegatorAddress": delegator,
            "validatorAddress": validator,
            "amount": {
                "denom": denom,
                "amount": amount,
            },
        })),
        MsgEncoding::Direct => MsgValue::Proto(
            MsgDelegate {
                delegator_address: delegator.into(),
                validator_address: validator.into(),
                amount: Some(coin(amount, denom)),
            }
            .encode_to_vec(),
        ),
    };
    EncodedMsg {
        type_url: MSG_DELEGATE_TYPE_URL,
        value,
    }
}

pub fn undelegate(
    encoding: MsgEncoding,
    delegator: &str,
    validator: &str,
    amount: &str,
    denom: &str,
) -> EncodedMsg {
    let value = match encoding {
        MsgEncoding::Amino => MsgValue::Amino(json!({
            "delegatorAddress": delegator,
            "validatorAddress": validator,
            "amount": {
                "denom": denom,
                "amount": amount,
            },
        })),
        MsgEncoding::Direct => MsgValue::Proto(
            MsgUndelegate {
                delegator_address: delegator.into(),
                validator_address: validator.into(),
                amount: Some(coin(amount, denom)),
            }
            .encode_to_vec(),
        ),
    };
    EncodedMsg {
        type_url: MSG_UNDELEGATE_TYPE_URL,
        value,
    }
}

pub fn begin_redelegate(
    encoding: MsgEncoding,
    delegator: &str,
    validator_src: &str,
    validator_dst: &str,
    amount: &str,
    denom: &str,
) -> EncodedMsg {
    let value = match encoding {
        MsgEncoding::Amino => MsgValue::Amino(json!({
            "delegatorAddress": delegator,
            "validatorSrcAddress": validator_src,
            "validatorDstAddress": validator_dst,
            "amount": {
                "denom": denom,
                "amount": amount,
            },
        })),
        MsgEncoding::Direct => MsgValue::Proto(
            MsgBeginRedelegate {
                delegator_address: delegator.into(),
                validator_src_address: validator_src.into(),
                validator_dst_address: validator_dst.into(),
                amount: Some(coin(amount, denom)),
            }
            .encode_to_vec(),
        ),
    };
    EncodedMsg {
        type_url: MSG_BEGIN_REDELEGATE_TYPE_URL,
        value,
    }
}

pub fn vote(encoding: MsgEncoding, voter: &str, proposal_id: u64, option: VoteOption) -> EncodedMsg {
    let value = match encoding {
        MsgEncoding::Amino => MsgValue::Amino(json!({
            "option": option as i32,
            "proposalId": proposal_id,
            "voter": voter,
        })),
        MsgEncoding::Direct => MsgValue::Proto(
            MsgVote {
                proposal_id,
                voter: voter.into(),
                option: option as i32,
            }
            .encode_to_vec(),
        ),
    };
    EncodedMsg {
        type_url: MSG_VOTE_TYPE_URL,
        value,
    }
}

pub fn withdraw_delegator_reward(
    encoding: MsgEncoding,
    delegator: &str,
    validator: &str,
) -> EncodedMsg {
    let value = match encoding {
        MsgEncoding::Amino => MsgValue::Amino(json!({
            "delegatorAddress": delegator,
            "validatorAddress": validator,
        })),
        MsgEncoding::Direct => MsgValue::Proto(
            MsgWithdrawDelegatorReward {
                delegator_address: delegator.into(),
                validator_address: validator.into(),
            }
            .encode_to_vec(),
        ),
    };
    EncodedMsg {
        type_url: MSG_WITHDRAW_DELEGATOR_REWARD_TYPE_URL,
        value,
    }
}

fn coin(amount: &str, denom: &str) -> Coin {
    Coin {
        denom: denom.into(),
        amount: amount.into(),
    }
}
