// Path: crates/client/src/execute.rs
//! Submission with failover.
//!
//! Each attempt goes to the first envelope whose node is not cooling down, so
//! a node is retried until its consecutive failures reach the threshold and
//! then the next node takes over. Transient failures back off exponentially;
//! anything else ends the loop at once. The node list is read once per
//! submission; a concurrent swap does not affect attempts already planned.

use crate::client::Client;
use crate::clock::Deadline;
use crate::network::find;
use crate::retry::RetryPolicy;
use hgsdk_api::transport::ServiceMethod;
use hgsdk_telemetry::{error_metrics, submission_metrics};
use hgsdk_types::app::{AccountId, Status, TransactionId};
use hgsdk_types::error::{Error, ErrorCode, TransportError, ValidationError};
use hgsdk_types::proto;

/// One signed transaction, encoded once per target node.
#[derive(Debug, Clone, Copy)]
pub struct Submission<'a> {
    pub method: ServiceMethod,
    pub transaction_id: TransactionId,
    /// `(node, envelope)` pairs in preference order.
    pub envelopes: &'a [(AccountId, proto::Transaction)],
}

/// Where and after how many attempts a submission was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submitted {
    pub node: AccountId,
    /// Index of the accepted envelope within [`Submission::envelopes`].
    pub index: usize,
    pub attempts: u32,
}

impl Client {
    /// Sends `submission` until one node accepts it at precheck.
    ///
    /// Returns [`Error::PrecheckRejected`] when a node refuses the transaction
    /// with a non-transient status, [`Error::Transport`] for a non-transient
    /// transport failure, and [`Error::SubmissionFailed`] when the attempt
    /// budget or the deadline runs out first.
    pub async fn submit(
        &self,
        submission: Submission<'_>,
        deadline: &Deadline,
    ) -> Result<Submitted, Error> {
        let policy = RetryPolicy::submission(self.config());
        let method = submission.method.to_string();
        let metrics = submission_metrics();
        let candidates: Vec<AccountId> = submission.envelopes.iter().map(|(n, _)| *n).collect();
        let Some(first) = candidates.first().copied() else {
            return Err(ValidationError::NoNodeAccountIds.into());
        };
        let network = self.network();
        let nodes = network.snapshot();
        if network.select_in(&nodes, &candidates).is_none() {
            return Err(ValidationError::UnknownNode(first).into());
        }

        let mut attempts = 0u32;
        let mut last: Option<TransportError> = None;

        while attempts < policy.max_attempts && !deadline.is_expired() {
            let Some(index) = network.select_in(&nodes, &candidates) else {
                break;
            };
            let Some((node_id, transaction)) = submission.envelopes.get(index) else {
                break;
            };
            let Some(node) = find(&nodes, node_id) else {
                break;
            };

            attempts += 1;
            metrics.inc_submission_attempts(&method);
            tracing::debug!(
                target: "execute",
                tx = %submission.transaction_id,
                node = %node_id,
                attempt = attempts,
                "submitting"
            );

            let timeout = deadline.clamp(self.config().request_timeout());
            let call = self.transport().submit(
                node.address(),
                submission.method,
                transaction.clone(),
                timeout,
            );
            let result = match tokio::time::timeout(timeout, call).await {
                Ok(result) => result,
                Err(_) => Err(TransportError::Timeout { node: *node_id }),
            };

            let failure = match result {
                Ok(response) => {
                    let status = Status(response.node_transaction_precheck_code);
                    if status == Status::OK {
                        network.mark_success(node);
                        tracing::info!(
                            target: "execute",
                            tx = %submission.transaction_id,
                            node = %node_id,
                            attempts,
                            "accepted at precheck"
                        );
                        return Ok(Submitted {
                            node: *node_id,
                            index,
                            attempts,
                        });
                    }
                    if !status.is_transient_precheck() {
                        // The node is healthy; it answered and refused.
                        network.mark_success(node);
                        metrics.inc_precheck_rejections(&status.to_string());
                        tracing::warn!(
                            target: "execute",
                            tx = %submission.transaction_id,
                            node = %node_id,
                            %status,
                            "rejected at precheck"
                        );
                        return Err(Error::PrecheckRejected {
                            transaction_id: submission.transaction_id,
                            node: *node_id,
                            status,
                        });
                    }
                    TransportError::NodeBusy {
                        node: *node_id,
                        status,
                    }
                }
                Err(e) => e,
            };

            if !failure.is_transient() {
                error_metrics().inc_error("transport", failure.code());
                tracing::error!(
                    target: "execute",
                    tx = %submission.transaction_id,
                    node = %node_id,
                    error = %failure,
                    "non-transient transport failure"
                );
                return Err(Error::Transport(failure));
            }

            network.mark_failure(node);
            metrics.inc_node_failures(&node_id.to_string(), failure.code());
            tracing::warn!(
                target: "execute",
                tx = %submission.transaction_id,
                node = %node_id,
                attempt = attempts,
                error = %failure,
                "transient failure"
            );
            last = Some(failure);

            if attempts < policy.max_attempts {
                let delay = deadline.clamp(policy.backoff(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        error_metrics().inc_error("execute", "SUBMISSION_FAILED");
        tracing::error!(
            target: "execute",
            tx = %submission.transaction_id,
            attempts,
            "submission budget exhausted"
        );
        Err(Error::SubmissionFailed { attempts, last })
    }
}

#[cfg(test)]
mod tests;
