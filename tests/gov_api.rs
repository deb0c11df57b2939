//! Proposal and validator read tests over a scripted transport.

mod common;

use std::sync::Arc;

use serde_json::{json, Value};

use skiff::factory::ApiFactory;
use skiff::model::{ProposalStatus, ValidatorStatus};

use common::{test_config, MockTransport, DENOM, SECOND_VALIDATOR, VALIDATOR};

fn proposal(id: u64, status: &str) -> Value {
    json!({
        "proposal_id": id.to_string(),
        "content": {
            "@type": "/cosmos.gov.v1beta1.TextProposal",
            "title": format!("Proposal {id}"),
            "description": "Lorem ipsum dolor sit amet",
        },
        "status": status,
        "final_tally_result": {
            "yes": "123450000000",
            "abstain": "110000000",
            "no": "54320000000",
            "no_with_veto": "43210000000",
        },
        "submit_time": "2022-07-18T11:12:03.922292885Z",
        "deposit_end_time": "2022-07-20T11:12:03.922292885Z",
        "voting_start_time": "2022-07-18T11:12:03.922292885Z",
        "voting_end_time": "2022-07-22T11:12:03.922292885Z",
        "total_deposit": [{"denom": DENOM, "amount": "10000000000"}],
    })
}

#[tokio::test]
async fn fetches_one_proposal_page_with_cursor() {
    let transport = Arc::new(MockTransport::new());
    let factory = ApiFactory::with_transport(test_config(), transport.clone());
    let api = factory.proposals_api();

    transport.push_ok(json!({
        "proposals": [
            proposal(3, "PROPOSAL_STATUS_VOTING_PERIOD"),
            proposal(2, "PROPOSAL_STATUS_PASSED"),
            proposal(1, "PROPOSAL_STATUS_REJECTED"),
        ],
        "pagination": {"next_key": "bmV4dA==", "total": "14"},
    }));

    let (result, next_key) = api.fetch_proposals(None, false).await;
    assert!(result.is_success());
    assert_eq!(next_key.as_deref(), Some("bmV4dA=="));
    let proposals = result.data().expect("proposals");
    assert_eq!(proposals.proposals.len(), 3);
    assert_eq!(proposals.number_of_active, 1);
    assert_eq!(proposals.proposals[0].proposal_id, 3);
    assert_eq!(proposals.proposals[0].status, ProposalStatus::VotingPeriod);
    assert_eq!(proposals.proposals[0].title, "Proposal 3");
    assert_eq!(
        proposals.proposals[0].final_tally_result.yes,
        123_450_000_000
    );

    // page requests list newest first with a fixed page size
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0]
        .query
        .contains(&("pagination.limit".to_owned(), "10".to_owned())));
    assert!(requests[0]
        .query
        .contains(&("pagination.reverse".to_owned(), "true".to_owned())));
    assert_eq!(factory.busy_tracker().active(), 0);
}

#[tokio::test]
async fn resumes_proposals_from_a_kept_cursor() {
    let transport = Arc::new(MockTransport::new());
    let factory = ApiFactory::with_transport(test_config(), transport.clone());
    let api = factory.proposals_api();

    transport.push_ok(json!({
        "proposals": [proposal(4, "PROPOSAL_STATUS_DEPOSIT_PERIOD")],
        "pagination": {"next_key": null},
    }));

    let (result, next_key) = api.fetch_proposals(Some("bmV4dA=="), false).await;
    assert!(result.is_success());
    assert_eq!(next_key, None);
    assert_eq!(result.data().expect("proposals").number_of_active, 0);

    let requests = transport.requests();
    assert!(requests[0]
        .query
        .contains(&("pagination.key".to_owned(), "bmV4dA==".to_owned())));
}

#[tokio::test]
async fn fetches_empty_proposal_list() {
    let transport = Arc::new(MockTransport::new());
    let factory = ApiFactory::with_transport(test_config(), transport.clone());
    let api = factory.proposals_api();

    transport.push_ok(json!({"proposals": [], "pagination": {"next_key": null}}));

    let (result, next_key) = api.fetch_proposals(None, false).await;
    assert!(result.is_success());
    assert_eq!(next_key, None);
    let proposals = result.data().expect("proposals");
    assert!(proposals.proposals.is_empty());
    assert_eq!(proposals.number_of_active, 0);
}

#[tokio::test]
async fn fetches_proposal_by_id() {
    let transport = Arc::new(MockTransport::new());
    let factory = ApiFactory::with_transport(test_config(), transport.clone());
    let api = factory.proposals_api();

    transport.push_ok(json!({"proposal": proposal(7, "PROPOSAL_STATUS_VOTING_PERIOD")}));

    let result = api.fetch_proposal_by_id(7, false).await;
    assert!(result.is_success());
    let fetched = result.data().expect("proposal");
    assert_eq!(fetched.proposal_id, 7);
    assert_eq!(fetched.total_deposit[0].amount, 10_000_000_000);

    let requests = transport.requests();
    assert!(requests[0].url.ends_with("/cosmos/gov/v1beta1/proposals/7"));
}

#[tokio::test]
async fn proposal_fetch_error_is_reported() {
    let transport = Arc::new(MockTransport::new());
    let factory = ApiFactory::with_transport(test_config(), transport.clone());
    let api = factory.proposals_api();

    transport.push_network_error("connection reset by peer");

    let (result, next_key) = api.fetch_proposals(None, false).await;
    assert!(result.is_error());
    assert_eq!(next_key, None);
    let err = result.error().expect("error");
    assert_eq!(err.name, "RequestError");
    assert_eq!(err.message, "connection reset by peer");
    assert!(err.status.is_none());
    assert_eq!(factory.busy_tracker().active(), 0);
}

fn validator(address: &str, status: &str, tokens: &str, moniker: &str) -> Value {
    json!({
        "operator_address": address,
        "jailed": false,
        "status": status,
        "tokens": tokens,
        "delegator_shares": format!("{tokens}.000000000000000000"),
        "description": {
            "moniker": moniker,
            "identity": "",
            "website": "",
            "security_contact": "",
            "details": "",
        },
        "commission": {
            "commission_rates": {
                "rate": "0.050000000000000000",
                "max_rate": "0.200000000000000000",
                "max_change_rate": "0.010000000000000000",
            },
            "update_time": "2022-06-21T11:12:03.922292885Z",
        },
        "min_self_delegation": "1",
    })
}

#[tokio::test]
async fn drains_all_validator_pages_and_counts_bonded() {
    let transport = Arc::new(MockTransport::new());
    let factory = ApiFactory::with_transport(test_config(), transport.clone());
    let api = factory.validators_api();

    transport.push_ok(json!({
        "validators": [
            validator(VALIDATOR, "BOND_STATUS_BONDED", "100011000000", "validator one"),
            validator(SECOND_VALIDATOR, "BOND_STATUS_UNBONDED", "98012949002", "validator two"),
        ],
        "pagination": {"next_key": "cGFnZTI=", "total": "3"},
    }));
    transport.push_ok(json!({
        "validators": [
            validator(
                "c4evaloper1r2ennr6ywv567lks3q5gujt4def726fep2hpa8",
                "BOND_STATUS_BONDED",
                "100013000000",
                "validator three",
            ),
        ],
        "pagination": {"next_key": null, "total": "3"},
    }));

    let result = api.fetch_all_validators(true).await;
    assert!(result.is_success());
    let validators = result.data().expect("validators");
    assert_eq!(validators.validators.len(), 3);
    assert_eq!(validators.number_of_active, 2);
    assert_eq!(validators.validators[0].status, ValidatorStatus::Bonded);
    assert_eq!(validators.validators[0].tokens, 100_011_000_000);
    assert_eq!(validators.validators[0].description.moniker, "validator one");
    assert_eq!(validators.validators[1].status, ValidatorStatus::Unbonded);

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].query.is_empty());
    assert_eq!(
        requests[1].query,
        vec![("pagination.key".to_owned(), "cGFnZTI=".to_owned())]
    );
    assert_eq!(factory.busy_tracker().active(), 0);
}

#[tokio::test]
async fn validator_page_error_aborts_the_drain() {
    let transport = Arc::new(MockTransport::new());
    let factory = ApiFactory::with_transport(test_config(), transport.clone());
    let api = factory.validators_api();

    transport.push_ok(json!({
        "validators": [validator(VALIDATOR, "BOND_STATUS_BONDED", "1000", "validator one")],
        "pagination": {"next_key": "cGFnZTI="},
    }));
    transport.push_status_error(500, 2, "internal error");

    let result = api.fetch_all_validators(true).await;
    assert!(result.is_error());
    let err = result.error().expect("error");
    assert_eq!(err.status, Some(500));
    assert_eq!(transport.request_count(), 2);
    assert_eq!(factory.busy_tracker().active(), 0);
}
