// Path: crates/client/src/receipt.rs
//! Polling for the consensus outcome of a submitted transaction.

use crate::client::Client;
use crate::clock::Deadline;
use crate::network::{find, Node};
use crate::retry::RetryPolicy;
use hgsdk_api::transport::ServiceMethod;
use hgsdk_telemetry::receipt_metrics;
use hgsdk_types::app::{AccountId, Receipt, Status, TransactionId};
use hgsdk_types::error::{Error, TransportError};
use hgsdk_types::proto;

/// Polls receipt queries with its own attempt budget.
///
/// A receipt still pending (`UNKNOWN`, `RECEIPT_NOT_FOUND`, `BUSY`) is asked
/// for again after a backoff. Any other receipt status is final and returned
/// unchanged, whether or not it is `SUCCESS`. Running out of attempts or of
/// time yields [`Error::ReceiptTimeout`]: the outcome is unknown, not failed.
#[derive(Debug, Clone)]
pub struct ReceiptResolver {
    client: Client,
    policy: RetryPolicy,
}

fn receipt_query(transaction_id: TransactionId) -> proto::Query {
    proto::Query {
        query: Some(proto::query::Query::TransactionGetReceipt(
            proto::TransactionGetReceiptQuery {
                header: Some(proto::QueryHeader::default()),
                transaction_id: Some(transaction_id.into()),
                include_duplicates: false,
            },
        )),
    }
}

enum Poll {
    Final(Receipt),
    Pending(Status),
}

impl ReceiptResolver {
    pub fn new(client: Client) -> Self {
        let policy = RetryPolicy::receipt(client.config());
        Self { client, policy }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolves the receipt of `transaction_id`, asking `preferred` first
    /// (normally the node that accepted the submission).
    pub async fn resolve(
        &self,
        transaction_id: TransactionId,
        preferred: Option<AccountId>,
        deadline: &Deadline,
    ) -> Result<Receipt, Error> {
        let network = self.client.network();
        let nodes = network.snapshot();
        let mut candidates = network.healthy_first_in(&nodes, nodes.len());
        if let Some(node) = preferred.filter(|n| find(&nodes, n).is_some()) {
            candidates.retain(|n| *n != node);
            candidates.insert(0, node);
        }

        let metrics = receipt_metrics();
        let mut attempts = 0u32;
        while attempts < self.policy.max_attempts && !deadline.is_expired() {
            let Some(node) = network
                .select_in(&nodes, &candidates)
                .and_then(|i| candidates.get(i))
                .and_then(|id| find(&nodes, id))
            else {
                break;
            };
            attempts += 1;
            metrics.inc_receipt_polls();

            match self.poll(transaction_id, node, deadline).await {
                Ok(Poll::Final(receipt)) => {
                    network.mark_success(node);
                    metrics.inc_receipts_resolved(&receipt.status.to_string());
                    tracing::info!(
                        target: "receipt",
                        tx = %transaction_id,
                        status = %receipt.status,
                        attempts,
                        "receipt resolved"
                    );
                    return Ok(receipt);
                }
                Ok(Poll::Pending(status)) => {
                    tracing::debug!(
                        target: "receipt",
                        tx = %transaction_id,
                        node = %node.account_id(),
                        %status,
                        "receipt pending"
                    );
                }
                Err(Error::Transport(e)) if e.is_transient() => {
                    network.mark_failure(node);
                    tracing::warn!(
                        target: "receipt",
                        tx = %transaction_id,
                        node = %node.account_id(),
                        error = %e,
                        "receipt query failed"
                    );
                }
                Err(e) => return Err(e),
            }

            if attempts < self.policy.max_attempts {
                let delay = deadline.clamp(self.policy.backoff(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        metrics.inc_receipt_timeouts();
        tracing::warn!(
            target: "receipt",
            tx = %transaction_id,
            attempts,
            "gave up waiting for receipt"
        );
        Err(Error::ReceiptTimeout {
            transaction_id,
            attempts,
        })
    }

    async fn poll(
        &self,
        transaction_id: TransactionId,
        node: &Node,
        deadline: &Deadline,
    ) -> Result<Poll, Error> {
        let node_id = node.account_id();
        let timeout = deadline.clamp(self.client.config().request_timeout());
        let call = self.client.transport().query(
            node.address(),
            ServiceMethod::GET_TRANSACTION_RECEIPTS,
            receipt_query(transaction_id),
            timeout,
        );
        let response = match tokio::time::timeout(timeout, call).await {
            Ok(result) => result?,
            Err(_) => return Err(TransportError::Timeout { node: node_id }.into()),
        };

        let Some(proto::response::Response::TransactionGetReceipt(response)) = response.response
        else {
            return Err(TransportError::BadResponse {
                node: node_id,
                reason: "expected a receipt response".into(),
            }
            .into());
        };

        let header_status = response
            .header
            .map(|h| Status(h.node_transaction_precheck_code))
            .unwrap_or(Status::OK);
        if header_status.is_receipt_pending() || header_status.is_transient_precheck() {
            return Ok(Poll::Pending(header_status));
        }
        if header_status != Status::OK {
            return Err(Error::PrecheckRejected {
                transaction_id,
                node: node_id,
                status: header_status,
            });
        }

        let receipt = match response.receipt {
            Some(r) => Receipt::try_from(r)?,
            None => return Ok(Poll::Pending(Status::UNKNOWN)),
        };
        if receipt.status.is_receipt_pending() {
            Ok(Poll::Pending(receipt.status))
        } else {
            Ok(Poll::Final(receipt))
        }
    }
}

impl Client {
    /// A resolver using this client's receipt policy.
    pub fn receipt_resolver(&self) -> ReceiptResolver {
        ReceiptResolver::new(self.clone())
    }

    /// Resolves the receipt of `transaction_id` within `deadline`.
    pub async fn get_receipt(
        &self,
        transaction_id: TransactionId,
        preferred: Option<AccountId>,
        deadline: &Deadline,
    ) -> Result<Receipt, Error> {
        self.receipt_resolver()
            .resolve(transaction_id, preferred, deadline)
            .await
    }
}
