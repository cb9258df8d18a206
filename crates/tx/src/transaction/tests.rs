// Path: crates/tx/src/transaction/tests.rs
use super::*;
use crate::operations::{FileCreateTransaction, TransferData, TransferTransaction};
use hgsdk_client::mock::{ReceiptReply, ScriptedTransport, SubmitReply};
use hgsdk_crypto::{Ed25519PrivateKey, Ed25519Verifier, KeyRing};
use hgsdk_types::app::{Status, Timestamp};
use hgsdk_types::config::{ClientConfig, NodeAddress};
use std::sync::Arc;

const PAYER: AccountId = AccountId::new(0, 0, 1001);

fn node(num: u64) -> AccountId {
    AccountId::new(0, 0, num)
}

fn tx_id() -> TransactionId {
    TransactionId::new(PAYER, Timestamp::new(1_700_000_000, 0))
}

fn client_with(
    transport: &Arc<ScriptedTransport>,
    operator: &Ed25519PrivateKey,
    tweak: impl FnOnce(&mut ClientConfig),
) -> Client {
    let mut config = ClientConfig::for_nodes(
        [3, 4, 5, 6]
            .iter()
            .map(|n| NodeAddress::new(node(*n), format!("10.0.0.{}:50211", n)))
            .collect(),
    );
    tweak(&mut config);
    Client::builder(config)
        .transport(transport.clone())
        .operator(PAYER, operator.clone())
        .build()
        .unwrap()
}

fn transfer() -> TransferTransaction {
    let mut tx = TransferTransaction::new();
    tx.add_hbar_transfer(PAYER, -100)
        .unwrap()
        .add_hbar_transfer(node(1002), 100)
        .unwrap();
    tx
}

fn frozen_transfer() -> TransferTransaction {
    let mut tx = transfer();
    tx.set_node_account_ids([node(3), node(4)])
        .unwrap()
        .set_transaction_id(tx_id())
        .unwrap()
        .freeze()
        .unwrap();
    tx
}

#[test]
fn test_frozen_bytes_never_change() {
    let key = Ed25519PrivateKey::generate();
    let mut tx = frozen_transfer();
    let before: Vec<Bytes> = tx.envelopes().iter().map(|e| e.body_bytes().clone()).collect();

    let err = tx.set_transaction_memo("late").unwrap_err();
    assert!(matches!(err, Error::FrozenOperation { state: "frozen" }));
    assert!(tx.add_hbar_transfer(node(7), 0).is_err());
    assert!(tx.set_max_transaction_fee(1).is_err());

    tx.sign(&key).unwrap();
    assert!(tx.set_transaction_memo("later").is_err());
    let after: Vec<Bytes> = tx.envelopes().iter().map(|e| e.body_bytes().clone()).collect();
    assert_eq!(before, after);
    assert_eq!(tx.memo(), "");
    assert!(tx.verify(&Key::Single(key.to_public_key()), &Ed25519Verifier));
}

#[test]
fn test_one_body_per_node_differing_only_in_node() {
    let tx = frozen_transfer();
    let envelopes = tx.envelopes();
    assert_eq!(envelopes.len(), 2);
    assert_ne!(envelopes[0].body_bytes(), envelopes[1].body_bytes());

    let (_, body3) = NodeEnvelope::from_wire(&envelopes[0].to_wire()).unwrap();
    let (_, body4) = NodeEnvelope::from_wire(&envelopes[1].to_wire()).unwrap();
    assert_eq!(body3.node_account_id, Some(node(3).into()));
    assert_eq!(body4.node_account_id, Some(node(4).into()));
    assert_eq!(body3.transaction_id, body4.transaction_id);
    assert_eq!(body3.transaction_fee, DEFAULT_MAX_TRANSACTION_FEE);
    assert_eq!(body3.transaction_valid_duration, Some(proto::Duration { seconds: 120 }));
    assert_eq!(body3.data, body4.data);
}

#[test]
fn test_freeze_without_client_needs_ids() {
    let mut tx = transfer();
    tx.set_transaction_id(tx_id()).unwrap();
    assert!(matches!(
        tx.freeze(),
        Err(Error::Validation(ValidationError::NoNodeAccountIds))
    ));

    let mut tx = transfer();
    tx.set_node_account_ids([node(3)]).unwrap();
    assert!(matches!(
        tx.freeze(),
        Err(Error::Validation(ValidationError::MissingPayer))
    ));
    assert_eq!(tx.state(), LifecycleState::Draft);
}

#[test]
fn test_freeze_validates_locally() {
    let mut tx = transfer();
    tx.set_node_account_ids([node(3)])
        .unwrap()
        .set_transaction_id(tx_id())
        .unwrap()
        .set_transaction_memo("x".repeat(101))
        .unwrap();
    assert!(matches!(
        tx.freeze(),
        Err(Error::Validation(ValidationError::MemoTooLong { len: 101, max: 100 }))
    ));

    tx.set_transaction_memo("x".repeat(100))
        .unwrap()
        .set_transaction_valid_duration(Duration::from_secs(181))
        .unwrap();
    assert!(matches!(
        tx.freeze(),
        Err(Error::Validation(ValidationError::ValidDurationOutOfRange { secs: 181, .. }))
    ));

    tx.set_transaction_valid_duration(Duration::from_secs(180)).unwrap();
    tx.data_mut().unwrap().add(PAYER, 1);
    assert!(matches!(
        tx.freeze(),
        Err(Error::Validation(ValidationError::UnbalancedTransfer { sum: 1 }))
    ));
    assert_eq!(tx.state(), LifecycleState::Draft);
    assert!(tx.envelopes().is_empty());
}

#[test]
fn test_oversized_body_is_refused() {
    let mut tx = FileCreateTransaction::new();
    tx.set_contents(vec![0u8; MAX_TRANSACTION_BYTES])
        .unwrap()
        .set_node_account_ids([node(3)])
        .unwrap()
        .set_transaction_id(tx_id())
        .unwrap();
    assert!(matches!(
        tx.freeze(),
        Err(Error::Validation(ValidationError::TransactionTooLarge { max: 6144, .. }))
    ));
}

#[tokio::test]
async fn test_freeze_with_client_fills_defaults() {
    let transport = Arc::new(ScriptedTransport::new());
    let operator = Ed25519PrivateKey::generate();
    let client = client_with(&transport, &operator, |c| {
        c.max_nodes_per_transaction = 2;
        c.max_transaction_fee = 5;
    });

    let mut tx = transfer();
    tx.freeze_with(&client).unwrap();
    assert_eq!(tx.node_account_ids(), vec![node(3), node(4)]);
    let id = tx.transaction_id().unwrap();
    assert_eq!(id.payer, PAYER);

    let (_, body) = NodeEnvelope::from_wire(&tx.envelopes()[0].to_wire()).unwrap();
    assert_eq!(body.transaction_fee, 5);

    // A second draft gets a later valid start.
    let mut other = transfer();
    other.freeze_with(&client).unwrap();
    assert!(other.transaction_id().unwrap().valid_start > id.valid_start);
}

#[tokio::test]
async fn test_unknown_explicit_node_is_refused() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client_with(&transport, &Ed25519PrivateKey::generate(), |_| {});
    let mut tx = transfer();
    tx.set_node_account_ids([node(3), node(99)]).unwrap();
    assert!(matches!(
        tx.freeze_with(&client),
        Err(Error::Validation(ValidationError::UnknownNode(n))) if n == node(99)
    ));
}

#[test]
fn test_two_of_three_threshold_on_every_envelope() {
    let keys: Vec<_> = (0..3).map(|_| Ed25519PrivateKey::generate()).collect();
    let threshold = Key::threshold(
        2,
        keys.iter().map(|k| Key::Single(k.to_public_key())).collect(),
    )
    .unwrap();

    let mut tx = frozen_transfer();
    tx.sign_with(&threshold, &keys[1]).unwrap();
    assert!(!tx.verify(&threshold, &Ed25519Verifier));

    let mut tx = frozen_transfer();
    let ring = KeyRing::new().with(keys[0].clone()).with(keys[2].clone());
    tx.sign_with(&threshold, &ring).unwrap();
    assert_eq!(tx.state(), LifecycleState::Signed);
    for envelope in tx.envelopes() {
        assert_eq!(envelope.signatures().len(), 2);
    }
    assert!(tx.verify(&threshold, &Ed25519Verifier));
}

#[test]
fn test_signing_twice_with_same_key_is_idempotent() {
    let key = Ed25519PrivateKey::generate();
    let mut tx = frozen_transfer();
    tx.sign(&key).unwrap().sign(&key).unwrap();
    for envelope in tx.envelopes() {
        assert_eq!(envelope.signatures().len(), 1);
    }
}

#[test]
fn test_signing_nothing_leaves_transaction_frozen() {
    let mut tx = frozen_transfer();
    assert!(matches!(
        tx.sign(&KeyRing::new()),
        Err(Error::Validation(ValidationError::NoSignatures { .. }))
    ));
    assert_eq!(tx.state(), LifecycleState::Frozen);

    let holder = Ed25519PrivateKey::generate();
    let other = Key::Single(Ed25519PrivateKey::generate().to_public_key());
    assert!(matches!(
        tx.sign_with(&other, &holder),
        Err(Error::Validation(ValidationError::NoSignatures { node: n })) if n == node(3)
    ));
    assert_eq!(tx.state(), LifecycleState::Frozen);
    assert!(tx.envelopes().iter().all(|e| e.signatures().is_empty()));

    // A later signer that does hold a key still moves it on.
    tx.sign(&holder).unwrap();
    assert_eq!(tx.state(), LifecycleState::Signed);
}

#[test]
fn test_sign_before_freeze_is_an_invalid_transition() {
    let mut tx = transfer();
    assert!(matches!(
        tx.sign(&Ed25519PrivateKey::generate()),
        Err(Error::InvalidStateTransition {
            from: "draft",
            to: "signed"
        })
    ));
}

#[tokio::test]
async fn test_unsigned_submission_never_reaches_network() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client_with(&transport, &Ed25519PrivateKey::generate(), |_| {});
    let mut tx = frozen_transfer();

    let err = tx.submit(&client, &client.deadline()).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::NoSignatures { node: n }) if n == node(3)
    ));
    assert_eq!(transport.call_count(), 0);
    assert_eq!(tx.state(), LifecycleState::Frozen);
}

#[tokio::test(start_paused = true)]
async fn test_execute_and_resolve_reaches_accepted() {
    let transport = Arc::new(ScriptedTransport::new());
    let operator = Ed25519PrivateKey::generate();
    let client = client_with(&transport, &operator, |_| {});

    let mut tx = transfer();
    let response = tx.execute(&client).await.unwrap();
    assert_eq!(tx.state(), LifecycleState::Submitted);
    assert_eq!(Some(response.transaction_id), tx.transaction_id());

    let (accepted_by, wire) = transport.submissions().pop().unwrap();
    assert_eq!(response.node_account_id, accepted_by);
    assert_eq!(response.transaction_hash, transaction_hash(&wire.signed_transaction_bytes));
    assert_eq!(response.transaction_hash.len(), 48);
    assert!(tx.verify(&Key::Single(operator.to_public_key()), &Ed25519Verifier));

    let receipt = tx.resolve(&client, &client.deadline()).await.unwrap();
    assert_eq!(receipt.status, Status::SUCCESS);
    assert_eq!(tx.state(), LifecycleState::Accepted);
}

#[tokio::test(start_paused = true)]
async fn test_precheck_rejection_is_terminal() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.script_submits(node(3), [SubmitReply::Precheck(Status::INSUFFICIENT_TX_FEE)]);
    let client = client_with(&transport, &Ed25519PrivateKey::generate(), |_| {});

    let mut tx = transfer();
    tx.set_node_account_ids([node(3)]).unwrap();
    let err = tx.execute(&client).await.unwrap_err();
    assert!(err.is_rejection());
    assert_eq!(err.status(), Some(Status::INSUFFICIENT_TX_FEE));
    assert_eq!(tx.state(), LifecycleState::Rejected);
    assert!(tx.execute(&client).await.is_err());
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_failed_receipt_status_rejects() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.script_receipts([ReceiptReply::Status(Status::INVALID_ACCOUNT_AMOUNTS)]);
    let client = client_with(&transport, &Ed25519PrivateKey::generate(), |_| {});

    let mut tx = transfer();
    let err = tx.execute_and_resolve(&client).await.unwrap_err();
    match err {
        Error::Rejected {
            transaction_id,
            status,
        } => {
            assert_eq!(Some(transaction_id), tx.transaction_id());
            assert_eq!(status, Status::INVALID_ACCOUNT_AMOUNTS);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(tx.state(), LifecycleState::Rejected);
}

#[tokio::test(start_paused = true)]
async fn test_receipt_timeout_leaves_outcome_unknown() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.script_receipts(std::iter::repeat(ReceiptReply::Status(Status::UNKNOWN)).take(10));
    let client = client_with(&transport, &Ed25519PrivateKey::generate(), |c| {
        c.receipt.max_attempts = 3
    });

    let mut tx = transfer();
    let err = tx.execute_and_resolve(&client).await.unwrap_err();
    assert!(matches!(err, Error::ReceiptTimeout { attempts: 3, .. }));
    assert!(!err.is_rejection());
    assert_eq!(tx.state(), LifecycleState::Submitted);
}

#[tokio::test]
async fn test_foreign_payer_needs_explicit_signature() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client_with(&transport, &Ed25519PrivateKey::generate(), |_| {});

    let mut tx = Transaction::with_data(TransferData::default());
    tx.add_hbar_transfer(node(2000), -1)
        .unwrap()
        .add_hbar_transfer(node(2001), 1)
        .unwrap()
        .set_transaction_id(TransactionId::new(node(2000), Timestamp::new(1_700_000_000, 0)))
        .unwrap();
    let err = tx.execute(&client).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::NoSignatures { .. })
    ));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_resolve_before_submit_is_an_invalid_transition() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client_with(&transport, &Ed25519PrivateKey::generate(), |_| {});
    let mut tx = frozen_transfer();
    assert!(matches!(
        tx.resolve(&client, &client.deadline()).await,
        Err(Error::InvalidStateTransition {
            from: "frozen",
            to: "accepted"
        })
    ));
}
