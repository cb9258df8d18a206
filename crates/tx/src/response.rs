// Path: crates/tx/src/response.rs
use hgsdk_client::{Client, Deadline};
use hgsdk_types::app::{AccountId, Receipt, TransactionId};
use hgsdk_types::error::Error;

/// What a node returned when it accepted a transaction at precheck.
///
/// Acceptance only means the node will forward it. The outcome comes from
/// the receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionResponse {
    pub transaction_id: TransactionId,
    /// The node that accepted the transaction.
    pub node_account_id: AccountId,
    /// SHA-384 of the submitted `signed_transaction_bytes`.
    pub transaction_hash: Vec<u8>,
}

impl TransactionResponse {
    pub fn transaction_hash_hex(&self) -> String {
        hex::encode(&self.transaction_hash)
    }

    /// Resolves the receipt, asking the accepting node first. Any status
    /// other than `SUCCESS` is an [`Error::Rejected`].
    pub async fn get_receipt(&self, client: &Client) -> Result<Receipt, Error> {
        self.get_receipt_within(client, &client.deadline()).await
    }

    pub async fn get_receipt_within(&self, client: &Client, deadline: &Deadline) -> Result<Receipt, Error> {
        client
            .get_receipt(self.transaction_id, Some(self.node_account_id), deadline)
            .await?
            .validate_status(self.transaction_id)
    }
}
