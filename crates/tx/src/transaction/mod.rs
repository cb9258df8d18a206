// Path: crates/tx/src/transaction/mod.rs
//! The generic transaction pipeline: build, freeze, sign, submit, resolve.
//!
//! [`Transaction`] owns everything common to every operation and delegates
//! the operation body to its [`TransactionData`]. Freezing serializes one body
//! per target node; those bytes never change afterwards, and every signature
//! is made over them.

use crate::lifecycle::LifecycleState;
use crate::response::TransactionResponse;
use bytes::Bytes;
use hgsdk_api::crypto::{SignatureVerifier, SigningProvider};
use hgsdk_api::transaction::TransactionData;
use hgsdk_client::{Client, Deadline, Submission};
use hgsdk_crypto::algorithms::hash::transaction_hash;
use hgsdk_crypto::sign::key_tree;
use hgsdk_telemetry::submission_metrics;
use hgsdk_telemetry::time::Timer;
use hgsdk_types::app::{AccountId, Key, Receipt, SignatureMap, TransactionId};
use hgsdk_types::codec::{from_bytes_canonical, to_bytes_canonical};
use hgsdk_types::config::{MAX_VALID_DURATION_SECS, MIN_VALID_DURATION_SECS};
use hgsdk_types::error::{CodecError, Error, ValidationError};
use hgsdk_types::{proto, MAX_MEMO_BYTES, MAX_TRANSACTION_BYTES};
use std::time::Duration;

/// Fee ceiling used by [`Transaction::freeze`] when none was set: 2 hbar.
pub const DEFAULT_MAX_TRANSACTION_FEE: u64 = 200_000_000;
/// Valid duration used by [`Transaction::freeze`] when none was set.
pub const DEFAULT_VALID_DURATION: Duration = Duration::from_secs(120);

/// The serialized body for one target node and the signatures over it.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeEnvelope {
    node: AccountId,
    body_bytes: Bytes,
    signatures: SignatureMap,
}

impl NodeEnvelope {
    pub fn node(&self) -> AccountId {
        self.node
    }

    /// The exact bytes every signature covers.
    pub fn body_bytes(&self) -> &Bytes {
        &self.body_bytes
    }

    pub fn signatures(&self) -> &SignatureMap {
        &self.signatures
    }

    /// The message submitted to the node.
    pub fn to_wire(&self) -> proto::Transaction {
        let signed = proto::SignedTransaction {
            body_bytes: self.body_bytes.to_vec(),
            sig_map: Some((&self.signatures).into()),
        };
        proto::Transaction {
            signed_transaction_bytes: to_bytes_canonical(&signed),
        }
    }

    /// Decodes a submitted message back into its envelope and body.
    pub fn from_wire(transaction: &proto::Transaction) -> Result<(Self, proto::TransactionBody), Error> {
        let signed: proto::SignedTransaction =
            from_bytes_canonical(&transaction.signed_transaction_bytes)?;
        let body: proto::TransactionBody = from_bytes_canonical(&signed.body_bytes)?;
        let node = body
            .node_account_id
            .ok_or(CodecError::MissingField("node_account_id"))?
            .try_into()?;
        let signatures = match &signed.sig_map {
            Some(map) => SignatureMap::try_from(map)?,
            None => SignatureMap::new(),
        };
        Ok((
            Self {
                node,
                body_bytes: Bytes::from(signed.body_bytes),
                signatures,
            },
            body,
        ))
    }
}

#[derive(Debug, Clone)]
struct Draft<D> {
    data: D,
    node_account_ids: Option<Vec<AccountId>>,
    transaction_id: Option<TransactionId>,
    max_transaction_fee: Option<u64>,
    valid_duration: Option<Duration>,
    memo: String,
}

#[derive(Debug, Clone)]
struct Frozen {
    transaction_id: TransactionId,
    envelopes: Vec<NodeEnvelope>,
}

/// A transaction of operation kind `D`.
#[derive(Debug, Clone)]
pub struct Transaction<D> {
    draft: Draft<D>,
    state: LifecycleState,
    frozen: Option<Frozen>,
    accepted_by: Option<AccountId>,
}

impl<D: TransactionData + Default> Default for Transaction<D> {
    fn default() -> Self {
        Self::with_data(D::default())
    }
}

impl<D: TransactionData + Default> Transaction<D> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: TransactionData> Transaction<D> {
    pub fn with_data(data: D) -> Self {
        Self {
            draft: Draft {
                data,
                node_account_ids: None,
                transaction_id: None,
                max_transaction_fee: None,
                valid_duration: None,
                memo: String::new(),
            },
            state: LifecycleState::Draft,
            frozen: None,
            accepted_by: None,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn data(&self) -> &D {
        &self.draft.data
    }

    /// The transaction id, once set or derived at freeze.
    pub fn transaction_id(&self) -> Option<TransactionId> {
        self.frozen
            .as_ref()
            .map(|f| f.transaction_id)
            .or(self.draft.transaction_id)
    }

    /// Target nodes: the frozen set once frozen, else whatever was set.
    pub fn node_account_ids(&self) -> Vec<AccountId> {
        match &self.frozen {
            Some(f) => f.envelopes.iter().map(|e| e.node).collect(),
            None => self.draft.node_account_ids.clone().unwrap_or_default(),
        }
    }

    pub fn memo(&self) -> &str {
        &self.draft.memo
    }

    /// Per-node envelopes; empty until frozen.
    pub fn envelopes(&self) -> &[NodeEnvelope] {
        self.frozen
            .as_ref()
            .map(|f| f.envelopes.as_slice())
            .unwrap_or(&[])
    }

    /// The single guard every setter goes through.
    fn draft_mut(&mut self) -> Result<&mut Draft<D>, Error> {
        if self.state != LifecycleState::Draft {
            return Err(Error::FrozenOperation {
                state: self.state.as_str(),
            });
        }
        Ok(&mut self.draft)
    }

    /// A draft sharing every setting of this one, carrying `data` under
    /// `transaction_id`. Used to derive the drafts of a chunked payload.
    pub(crate) fn derive_draft(&self, data: D, transaction_id: TransactionId) -> Result<Self, Error> {
        if self.state != LifecycleState::Draft {
            return Err(Error::FrozenOperation {
                state: self.state.as_str(),
            });
        }
        let mut draft = self.draft.clone();
        draft.data = data;
        draft.transaction_id = Some(transaction_id);
        Ok(Self {
            draft,
            state: LifecycleState::Draft,
            frozen: None,
            accepted_by: None,
        })
    }

    /// Mutable access to the operation body while in draft.
    pub fn data_mut(&mut self) -> Result<&mut D, Error> {
        Ok(&mut self.draft_mut()?.data)
    }

    pub fn set_node_account_ids(
        &mut self,
        nodes: impl IntoIterator<Item = AccountId>,
    ) -> Result<&mut Self, Error> {
        self.draft_mut()?.node_account_ids = Some(nodes.into_iter().collect());
        Ok(self)
    }

    pub fn set_transaction_id(&mut self, transaction_id: TransactionId) -> Result<&mut Self, Error> {
        self.draft_mut()?.transaction_id = Some(transaction_id);
        Ok(self)
    }

    pub fn set_max_transaction_fee(&mut self, tinybars: u64) -> Result<&mut Self, Error> {
        self.draft_mut()?.max_transaction_fee = Some(tinybars);
        Ok(self)
    }

    pub fn set_transaction_valid_duration(&mut self, duration: Duration) -> Result<&mut Self, Error> {
        self.draft_mut()?.valid_duration = Some(duration);
        Ok(self)
    }

    pub fn set_transaction_memo(&mut self, memo: impl Into<String>) -> Result<&mut Self, Error> {
        self.draft_mut()?.memo = memo.into();
        Ok(self)
    }

    /// Freezes using the client for anything not set explicitly: target
    /// nodes (healthy first, capped at `max_nodes_per_transaction`), the
    /// transaction id (operator plus clock), fee and valid duration.
    pub fn freeze_with(&mut self, client: &Client) -> Result<&mut Self, Error> {
        let config = client.config();
        let nodes = match &self.draft.node_account_ids {
            Some(nodes) => {
                if let Some(unknown) = nodes.iter().find(|n| !client.network().contains(n)) {
                    return Err(ValidationError::UnknownNode(*unknown).into());
                }
                nodes.clone()
            }
            None => client
                .network()
                .healthy_first(config.max_nodes_per_transaction),
        };
        let transaction_id = match self.draft.transaction_id {
            Some(id) => id,
            None => {
                let operator = client.operator().ok_or(ValidationError::MissingPayer)?;
                TransactionId::new(operator.account_id(), client.clock().valid_start())
            }
        };
        let fee = self
            .draft
            .max_transaction_fee
            .unwrap_or(config.max_transaction_fee);
        let duration = self
            .draft
            .valid_duration
            .unwrap_or_else(|| config.transaction_valid_duration());
        self.freeze_parts(nodes, transaction_id, fee, duration)
    }

    /// Freezes without a client. Target nodes and the transaction id must
    /// have been set.
    pub fn freeze(&mut self) -> Result<&mut Self, Error> {
        let nodes = self
            .draft
            .node_account_ids
            .clone()
            .ok_or(ValidationError::NoNodeAccountIds)?;
        let transaction_id = self
            .draft
            .transaction_id
            .ok_or(ValidationError::MissingPayer)?;
        let fee = self
            .draft
            .max_transaction_fee
            .unwrap_or(DEFAULT_MAX_TRANSACTION_FEE);
        let duration = self.draft.valid_duration.unwrap_or(DEFAULT_VALID_DURATION);
        self.freeze_parts(nodes, transaction_id, fee, duration)
    }

    fn freeze_parts(
        &mut self,
        nodes: Vec<AccountId>,
        transaction_id: TransactionId,
        fee: u64,
        duration: Duration,
    ) -> Result<&mut Self, Error> {
        if !self.state.can_transition(LifecycleState::Frozen) {
            return Err(Error::FrozenOperation {
                state: self.state.as_str(),
            });
        }
        if nodes.is_empty() {
            return Err(ValidationError::NoNodeAccountIds.into());
        }
        if self.draft.memo.len() > MAX_MEMO_BYTES {
            return Err(ValidationError::MemoTooLong {
                len: self.draft.memo.len(),
                max: MAX_MEMO_BYTES,
            }
            .into());
        }
        let secs = duration.as_secs();
        if !(MIN_VALID_DURATION_SECS..=MAX_VALID_DURATION_SECS).contains(&secs) {
            return Err(ValidationError::ValidDurationOutOfRange {
                secs,
                min: MIN_VALID_DURATION_SECS,
                max: MAX_VALID_DURATION_SECS,
            }
            .into());
        }
        self.draft.data.validate()?;

        let data = self.draft.data.to_body_data();
        let mut envelopes = Vec::with_capacity(nodes.len());
        for node in nodes {
            let body = proto::TransactionBody {
                transaction_id: Some(transaction_id.into()),
                node_account_id: Some(node.into()),
                transaction_fee: fee,
                transaction_valid_duration: Some(proto::Duration {
                    seconds: i64::try_from(secs).unwrap_or(i64::MAX),
                }),
                memo: self.draft.memo.clone(),
                data: Some(data.clone()),
            };
            let body_bytes = Bytes::from(to_bytes_canonical(&body));
            if body_bytes.len() > MAX_TRANSACTION_BYTES {
                return Err(ValidationError::TransactionTooLarge {
                    size: body_bytes.len(),
                    max: MAX_TRANSACTION_BYTES,
                }
                .into());
            }
            envelopes.push(NodeEnvelope {
                node,
                body_bytes,
                signatures: SignatureMap::new(),
            });
        }

        self.state.transition(LifecycleState::Frozen)?;
        tracing::debug!(
            target: "lifecycle",
            tx = %transaction_id,
            method = %self.draft.data.method(),
            nodes = envelopes.len(),
            "frozen"
        );
        self.frozen = Some(Frozen {
            transaction_id,
            envelopes,
        });
        Ok(self)
    }

    /// Signs every envelope with each key the provider holds.
    pub fn sign(&mut self, signer: &dyn SigningProvider) -> Result<&mut Self, Error> {
        let keys = signer.public_keys();
        let key = match keys.as_slice() {
            [single] => Key::Single(*single),
            _ => Key::KeyList(keys.into_iter().map(Key::Single).collect()),
        };
        self.sign_with(&key, signer)
    }

    /// Signs every envelope for the leaves of `key` the provider can sign.
    ///
    /// May be repeated; a public key that already signed is skipped. Fails
    /// with [`ValidationError::NoSignatures`] and stays frozen when the
    /// envelopes end up unsigned.
    pub fn sign_with(&mut self, key: &Key, signer: &dyn SigningProvider) -> Result<&mut Self, Error> {
        if !self.state.can_transition(LifecycleState::Signed) {
            return Err(Error::InvalidStateTransition {
                from: self.state.as_str(),
                to: LifecycleState::Signed.as_str(),
            });
        }
        let Some(frozen) = self.frozen.as_mut() else {
            return Err(Error::InvalidStateTransition {
                from: self.state.as_str(),
                to: LifecycleState::Signed.as_str(),
            });
        };
        let mut added = 0usize;
        for envelope in &mut frozen.envelopes {
            for pair in key_tree::sign(key, &envelope.body_bytes, signer)? {
                if envelope.signatures.insert(pair) {
                    added += 1;
                }
            }
        }
        if let Some(unsigned) = frozen.envelopes.iter().find(|e| e.signatures.is_empty()) {
            return Err(ValidationError::NoSignatures {
                node: unsigned.node,
            }
            .into());
        }
        tracing::debug!(target: "lifecycle", added, "signed");
        self.state.transition(LifecycleState::Signed)?;
        Ok(self)
    }

    /// Signs with the client's operator key.
    pub fn sign_with_operator(&mut self, client: &Client) -> Result<&mut Self, Error> {
        let operator = client.operator().ok_or(ValidationError::MissingPayer)?;
        self.sign(&*operator)
    }

    /// Whether every envelope's signatures satisfy `key`.
    pub fn verify(&self, key: &Key, verifier: &dyn SignatureVerifier) -> bool {
        let envelopes = self.envelopes();
        !envelopes.is_empty()
            && envelopes
                .iter()
                .all(|e| key_tree::verify(key, &e.body_bytes, &e.signatures, verifier))
    }

    /// Freezes and signs as needed, then submits within the client's
    /// operation timeout.
    pub async fn execute(&mut self, client: &Client) -> Result<TransactionResponse, Error> {
        let deadline = client.deadline();
        self.execute_within(client, &deadline).await
    }

    /// [`Transaction::execute`] bounded by a caller-supplied deadline.
    ///
    /// A draft is frozen with the client. When the payer is the client's
    /// operator, the operator signs.
    pub async fn execute_within(
        &mut self,
        client: &Client,
        deadline: &Deadline,
    ) -> Result<TransactionResponse, Error> {
        if self.state == LifecycleState::Draft {
            self.freeze_with(client)?;
        }
        if let (Some(operator), Some(id)) = (client.operator(), self.transaction_id()) {
            if operator.account_id() == id.payer && self.state.can_transition(LifecycleState::Signed) {
                self.sign(&*operator)?;
            }
        }
        self.submit(client, deadline).await
    }

    /// Submits a signed transaction.
    ///
    /// Every envelope must carry at least one signature; whether those are
    /// sufficient is for the ledger to decide. A precheck rejection moves the
    /// transaction to `Rejected`. Transport failures leave it `Signed`, so it
    /// may be submitted again.
    pub async fn submit(
        &mut self,
        client: &Client,
        deadline: &Deadline,
    ) -> Result<TransactionResponse, Error> {
        let method = self.draft.data.method();
        let method_name = method.to_string();
        let _timer = Timer::new(submission_metrics(), &method_name);

        if self.state == LifecycleState::Frozen {
            if let Some(first) = self.envelopes().first() {
                return Err(ValidationError::NoSignatures { node: first.node }.into());
            }
        }
        if !self.state.can_transition(LifecycleState::Submitted) {
            return Err(Error::InvalidStateTransition {
                from: self.state.as_str(),
                to: LifecycleState::Submitted.as_str(),
            });
        }
        let Some(frozen) = self.frozen.as_ref() else {
            return Err(Error::InvalidStateTransition {
                from: self.state.as_str(),
                to: LifecycleState::Submitted.as_str(),
            });
        };

        let mut wire = Vec::with_capacity(frozen.envelopes.len());
        for envelope in &frozen.envelopes {
            if envelope.signatures.is_empty() {
                return Err(ValidationError::NoSignatures {
                    node: envelope.node,
                }
                .into());
            }
            let transaction = envelope.to_wire();
            let size = prost::Message::encoded_len(&transaction);
            if size > MAX_TRANSACTION_BYTES {
                return Err(ValidationError::TransactionTooLarge {
                    size,
                    max: MAX_TRANSACTION_BYTES,
                }
                .into());
            }
            wire.push((envelope.node, transaction));
        }

        let transaction_id = frozen.transaction_id;
        let submission = Submission {
            method,
            transaction_id,
            envelopes: &wire,
        };
        match client.submit(submission, deadline).await {
            Ok(submitted) => {
                self.state.transition(LifecycleState::Submitted)?;
                self.accepted_by = Some(submitted.node);
                let transaction_hash = wire
                    .get(submitted.index)
                    .map(|(_, t)| transaction_hash(&t.signed_transaction_bytes))
                    .unwrap_or_default();
                Ok(TransactionResponse {
                    transaction_id,
                    node_account_id: submitted.node,
                    transaction_hash,
                })
            }
            Err(e) => {
                if matches!(e, Error::PrecheckRejected { .. }) {
                    self.state.transition(LifecycleState::Rejected)?;
                }
                Err(e)
            }
        }
    }

    /// Waits for the receipt of a submitted transaction.
    ///
    /// `SUCCESS` moves the transaction to `Accepted`; any other final status
    /// moves it to `Rejected` and is returned as [`Error::Rejected`]. A
    /// receipt timeout leaves it `Submitted`: the outcome is unknown.
    pub async fn resolve(&mut self, client: &Client, deadline: &Deadline) -> Result<Receipt, Error> {
        let transaction_id = match (&self.frozen, self.state) {
            (Some(f), LifecycleState::Submitted) => f.transaction_id,
            _ => {
                return Err(Error::InvalidStateTransition {
                    from: self.state.as_str(),
                    to: LifecycleState::Accepted.as_str(),
                })
            }
        };
        let receipt = client
            .get_receipt(transaction_id, self.accepted_by, deadline)
            .await?;
        match receipt.validate_status(transaction_id) {
            Ok(receipt) => {
                self.state.transition(LifecycleState::Accepted)?;
                Ok(receipt)
            }
            Err(e) => {
                self.state.transition(LifecycleState::Rejected)?;
                Err(e)
            }
        }
    }

    /// The whole pipeline under one deadline.
    pub async fn execute_and_resolve(&mut self, client: &Client) -> Result<Receipt, Error> {
        let deadline = client.deadline();
        self.execute_within(client, &deadline).await?;
        self.resolve(client, &deadline).await
    }
}

#[cfg(test)]
mod tests;
