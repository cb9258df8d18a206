// Path: crates/client/src/mock.rs
//! An in-memory [`NodeTransport`] driven by scripted replies.
//!
//! Replies are consumed in order. Submissions are scripted per node and fall
//! back to `OK` once a node's script is empty; receipt queries share one
//! script and fall back to a `SUCCESS` receipt. Every call is recorded so
//! tests can assert on ordering.

use async_trait::async_trait;
use hgsdk_api::transport::{NodeTransport, ServiceMethod};
use hgsdk_types::app::{AccountId, Receipt, Status, TransactionId};
use hgsdk_types::config::NodeAddress;
use hgsdk_types::error::TransportError;
use hgsdk_types::proto;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// A scripted answer to one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitReply {
    /// The node answers with this precheck code.
    Precheck(Status),
    /// The node cannot be reached.
    Unavailable,
    /// The node considers the request malformed.
    InvalidRequest,
    /// The node never answers; the caller's timeout fires.
    Hang,
}

/// A scripted answer to one receipt query.
#[derive(Debug, Clone, PartialEq)]
pub enum ReceiptReply {
    /// The response header carries this status and there is no receipt.
    Header(Status),
    /// A receipt carrying only this status.
    Status(Status),
    /// A full receipt.
    Receipt(Receipt),
    /// The node cannot be reached.
    Unavailable,
}

/// A call observed by the transport.
#[derive(Debug, Clone)]
pub enum Recorded {
    Submit {
        node: AccountId,
        method: ServiceMethod,
        transaction: proto::Transaction,
    },
    Query {
        node: AccountId,
        transaction_id: Option<TransactionId>,
    },
}

#[derive(Debug, Default)]
pub struct ScriptedTransport {
    submits: Mutex<HashMap<AccountId, VecDeque<SubmitReply>>>,
    receipts: Mutex<VecDeque<ReceiptReply>>,
    calls: Mutex<Vec<Recorded>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues replies for submissions to `node`.
    pub fn script_submits(&self, node: AccountId, replies: impl IntoIterator<Item = SubmitReply>) {
        lock(&self.submits).entry(node).or_default().extend(replies);
    }

    /// Queues replies for receipt queries.
    pub fn script_receipts(&self, replies: impl IntoIterator<Item = ReceiptReply>) {
        lock(&self.receipts).extend(replies);
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> Vec<Recorded> {
        lock(&self.calls).clone()
    }

    /// The submitted envelopes so far, in order.
    pub fn submissions(&self) -> Vec<(AccountId, proto::Transaction)> {
        lock(&self.calls)
            .iter()
            .filter_map(|c| match c {
                Recorded::Submit {
                    node, transaction, ..
                } => Some((*node, transaction.clone())),
                Recorded::Query { .. } => None,
            })
            .collect()
    }

    /// Number of submissions sent to `node`.
    pub fn submits_to(&self, node: AccountId) -> usize {
        self.submissions().iter().filter(|(n, _)| *n == node).count()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

#[async_trait]
impl NodeTransport for ScriptedTransport {
    async fn submit(
        &self,
        node: &NodeAddress,
        method: ServiceMethod,
        transaction: proto::Transaction,
        _timeout: Duration,
    ) -> Result<proto::TransactionResponse, TransportError> {
        let id = node.account_id;
        lock(&self.calls).push(Recorded::Submit {
            node: id,
            method,
            transaction,
        });
        let reply = lock(&self.submits)
            .get_mut(&id)
            .and_then(VecDeque::pop_front)
            .unwrap_or(SubmitReply::Precheck(Status::OK));
        match reply {
            SubmitReply::Precheck(status) => Ok(proto::TransactionResponse {
                node_transaction_precheck_code: status.0,
                cost: 0,
            }),
            SubmitReply::Unavailable => Err(TransportError::Unavailable {
                node: id,
                reason: "connection refused".into(),
            }),
            SubmitReply::InvalidRequest => Err(TransportError::InvalidRequest {
                node: id,
                reason: "malformed".into(),
            }),
            SubmitReply::Hang => {
                std::future::pending::<()>().await;
                Err(TransportError::Timeout { node: id })
            }
        }
    }

    async fn query(
        &self,
        node: &NodeAddress,
        _method: ServiceMethod,
        query: proto::Query,
        _timeout: Duration,
    ) -> Result<proto::Response, TransportError> {
        let id = node.account_id;
        let proto::Query {
            query: Some(proto::query::Query::TransactionGetReceipt(q)),
        } = query
        else {
            return Err(TransportError::InvalidRequest {
                node: id,
                reason: "unsupported query".into(),
            });
        };
        let transaction_id = q.transaction_id.and_then(|t| TransactionId::try_from(t).ok());
        lock(&self.calls).push(Recorded::Query {
            node: id,
            transaction_id,
        });

        let reply = lock(&self.receipts)
            .pop_front()
            .unwrap_or(ReceiptReply::Status(Status::SUCCESS));
        let (header_status, receipt) = match reply {
            ReceiptReply::Header(status) => (status, None),
            ReceiptReply::Status(status) => (Status::OK, Some(Receipt::from_status(status))),
            ReceiptReply::Receipt(receipt) => (Status::OK, Some(receipt)),
            ReceiptReply::Unavailable => {
                return Err(TransportError::Unavailable {
                    node: id,
                    reason: "connection refused".into(),
                })
            }
        };
        Ok(proto::Response {
            response: Some(proto::response::Response::TransactionGetReceipt(
                proto::TransactionGetReceiptResponse {
                    header: Some(proto::ResponseHeader {
                        node_transaction_precheck_code: header_status.0,
                        response_type: 0,
                        cost: 0,
                    }),
                    receipt: receipt.as_ref().map(Into::into),
                },
            )),
        })
    }
}
