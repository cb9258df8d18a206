// Path: crates/client/src/execute/tests.rs
use super::*;
use crate::mock::{ScriptedTransport, SubmitReply};
use hgsdk_types::app::Timestamp;
use hgsdk_types::config::{ClientConfig, NodeAddress};
use std::sync::Arc;
use std::time::Duration;

fn id(num: u64) -> AccountId {
    AccountId::new(0, 0, num)
}

fn client_with(
    transport: &Arc<ScriptedTransport>,
    nodes: &[u64],
    tweak: impl FnOnce(&mut ClientConfig),
) -> Client {
    let mut config = ClientConfig::for_nodes(
        nodes
            .iter()
            .map(|n| NodeAddress::new(id(*n), format!("10.0.0.{}:50211", n)))
            .collect(),
    );
    tweak(&mut config);
    Client::builder(config)
        .transport(transport.clone())
        .build()
        .unwrap()
}

fn envelopes(nodes: &[u64]) -> Vec<(AccountId, proto::Transaction)> {
    nodes
        .iter()
        .map(|n| {
            (
                id(*n),
                proto::Transaction {
                    signed_transaction_bytes: vec![*n as u8],
                },
            )
        })
        .collect()
}

fn tx_id() -> TransactionId {
    TransactionId::new(id(1001), Timestamp::new(1_700_000_000, 0))
}

fn submission(envelopes: &[(AccountId, proto::Transaction)]) -> Submission<'_> {
    Submission {
        method: ServiceMethod::CRYPTO_TRANSFER,
        transaction_id: tx_id(),
        envelopes,
    }
}

#[tokio::test(start_paused = true)]
async fn test_failover_after_two_transient_failures() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.script_submits(id(3), [SubmitReply::Unavailable, SubmitReply::Unavailable]);
    let client = client_with(&transport, &[3, 4], |c| c.node_failure_threshold = 2);
    let envs = envelopes(&[3, 4]);

    let before = client.network().failure_count(&id(3));
    let submitted = client
        .submit(submission(&envs), &client.deadline())
        .await
        .unwrap();

    assert_eq!(submitted.attempts, 3);
    assert_eq!(submitted.node, id(4));
    assert_eq!(submitted.index, 1);
    assert_eq!(client.network().failure_count(&id(3)) - before, 2);
    assert_eq!(transport.submits_to(id(3)), 2);
    assert_eq!(transport.submits_to(id(4)), 1);
    // Each node received its own envelope.
    assert_eq!(
        transport.submissions().last().unwrap().1.signed_transaction_bytes,
        vec![4]
    );
}

#[tokio::test(start_paused = true)]
async fn test_busy_precheck_is_retried_on_same_node() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.script_submits(id(3), [SubmitReply::Precheck(Status::BUSY)]);
    let client = client_with(&transport, &[3, 4], |c| c.node_failure_threshold = 2);
    let envs = envelopes(&[3, 4]);

    let submitted = client
        .submit(submission(&envs), &client.deadline())
        .await
        .unwrap();
    assert_eq!(submitted.node, id(3));
    assert_eq!(submitted.attempts, 2);
    // The success reset the streak.
    assert_eq!(client.network().node(&id(3)).unwrap().health().consecutive_failures(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_precheck_rejection_is_terminal() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.script_submits(id(3), [SubmitReply::Precheck(Status::INVALID_SIGNATURE)]);
    let client = client_with(&transport, &[3, 4], |_| {});
    let envs = envelopes(&[3, 4]);

    let err = client
        .submit(submission(&envs), &client.deadline())
        .await
        .unwrap_err();
    match err {
        Error::PrecheckRejected {
            transaction_id,
            node,
            status,
        } => {
            assert_eq!(transaction_id, tx_id());
            assert_eq!(node, id(3));
            assert_eq!(status, Status::INVALID_SIGNATURE);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(transport.call_count(), 1);
    assert_eq!(client.network().failure_count(&id(3)), 0);
}

#[tokio::test(start_paused = true)]
async fn test_invalid_request_is_not_retried() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.script_submits(id(3), [SubmitReply::InvalidRequest]);
    let client = client_with(&transport, &[3, 4], |_| {});
    let envs = envelopes(&[3, 4]);

    let err = client
        .submit(submission(&envs), &client.deadline())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Transport(TransportError::InvalidRequest { .. })
    ));
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_budget_exhaustion_reports_last_failure() {
    let transport = Arc::new(ScriptedTransport::new());
    for n in [3, 4] {
        transport.script_submits(id(n), std::iter::repeat(SubmitReply::Unavailable).take(5));
    }
    let client = client_with(&transport, &[3, 4], |c| c.max_attempts = 3);
    let envs = envelopes(&[3, 4]);

    let err = client
        .submit(submission(&envs), &client.deadline())
        .await
        .unwrap_err();
    match err {
        Error::SubmissionFailed { attempts, last } => {
            assert_eq!(attempts, 3);
            assert!(matches!(last, Some(TransportError::Unavailable { .. })));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(transport.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_hung_node_times_out_and_is_retried() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.script_submits(id(3), [SubmitReply::Hang]);
    let client = client_with(&transport, &[3], |c| c.request_timeout_ms = 1_000);
    let envs = envelopes(&[3]);

    let submitted = client
        .submit(submission(&envs), &client.deadline())
        .await
        .unwrap();
    assert_eq!(submitted.attempts, 2);
    assert_eq!(client.network().failure_count(&id(3)), 1);
}

#[tokio::test(start_paused = true)]
async fn test_expired_deadline_makes_no_calls() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client_with(&transport, &[3], |_| {});
    let envs = envelopes(&[3]);

    let deadline = Deadline::after(Duration::ZERO);
    let err = client.submit(submission(&envs), &deadline).await.unwrap_err();
    assert!(matches!(
        err,
        Error::SubmissionFailed {
            attempts: 0,
            last: None
        }
    ));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_deadline_bounds_retries() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.script_submits(id(3), std::iter::repeat(SubmitReply::Hang).take(100));
    let client = client_with(&transport, &[3], |c| {
        c.request_timeout_ms = 2_000;
        c.max_attempts = 100;
    });
    let envs = envelopes(&[3]);

    let deadline = Deadline::after(Duration::from_secs(5));
    let err = client.submit(submission(&envs), &deadline).await.unwrap_err();
    match err {
        Error::SubmissionFailed { attempts, .. } => assert!(attempts < 5, "attempts = {}", attempts),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(deadline.is_expired());
}

#[tokio::test]
async fn test_no_envelopes_is_a_validation_error() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client_with(&transport, &[3], |_| {});
    let err = client
        .submit(submission(&[]), &client.deadline())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::NoNodeAccountIds)
    ));
}

#[tokio::test]
async fn test_unknown_node_is_a_validation_error() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client_with(&transport, &[3], |_| {});
    let envs = envelopes(&[9]);
    let err = client
        .submit(submission(&envs), &client.deadline())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::UnknownNode(n)) if n == id(9)
    ));
}

#[tokio::test(start_paused = true)]
async fn test_network_swap_does_not_disturb_submission_in_flight() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.script_submits(id(3), [SubmitReply::Unavailable]);
    let client = client_with(&transport, &[3, 4], |c| c.node_failure_threshold = 3);

    let task = tokio::spawn({
        let client = client.clone();
        async move {
            let envs = envelopes(&[3, 4]);
            client.submit(submission(&envs), &client.deadline()).await
        }
    });
    // The first attempt fails and the submission parks in its backoff.
    while transport.call_count() == 0 {
        tokio::task::yield_now().await;
    }
    client.set_network(vec![NodeAddress::new(id(5), "10.0.0.5:50211")]);

    let submitted = task.await.unwrap().unwrap();
    assert_eq!(submitted.node, id(3));
    assert_eq!(submitted.attempts, 2);
    assert_eq!(transport.submits_to(id(3)), 2);
    assert_eq!(transport.submits_to(id(5)), 0);
    // New submissions see the new list.
    let envs = envelopes(&[3]);
    let err = client
        .submit(submission(&envs), &client.deadline())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::UnknownNode(n)) if n == id(3)
    ));
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_submissions_share_node_health() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.script_submits(id(3), [SubmitReply::Unavailable, SubmitReply::Unavailable]);
    let client = client_with(&transport, &[3, 4], |c| c.node_failure_threshold = 5);

    let spawn = |client: Client| {
        tokio::spawn(async move {
            let envs = envelopes(&[3, 4]);
            client.submit(submission(&envs), &client.deadline()).await
        })
    };
    let (a, b) = tokio::join!(spawn(client.clone()), spawn(client.clone()));

    let (a, b) = (a.unwrap().unwrap(), b.unwrap().unwrap());
    assert_eq!((a.node, b.node), (id(3), id(3)));
    assert_eq!(a.attempts + b.attempts, 4);
    assert_eq!(client.network().failure_count(&id(3)), 2);
    assert_eq!(transport.submits_to(id(3)), 4);
}
