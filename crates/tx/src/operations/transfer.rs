// Path: crates/tx/src/operations/transfer.rs
use crate::transaction::Transaction;
use hgsdk_api::transaction::TransactionData;
use hgsdk_api::transport::ServiceMethod;
use hgsdk_types::app::AccountId;
use hgsdk_types::error::{Error, ValidationError};
use hgsdk_types::proto;

/// Moves hbar between accounts. Amounts are in tinybars; debits are negative.
pub type TransferTransaction = Transaction<TransferData>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferData {
    transfers: Vec<(AccountId, i64)>,
}

impl TransferData {
    /// Adds `amount` to the account's entry, creating it on first use.
    ///
    /// Fails and leaves the entry unchanged if the merged amount overflows.
    pub fn add(&mut self, account_id: AccountId, amount: i64) -> Result<(), ValidationError> {
        match self.transfers.iter_mut().find(|(id, _)| *id == account_id) {
            Some((_, total)) => {
                *total = total
                    .checked_add(amount)
                    .ok_or(ValidationError::AmountOverflow(account_id))?;
            }
            None => self.transfers.push((account_id, amount)),
        }
        Ok(())
    }

    /// One entry per account, in the order accounts were first added.
    pub fn transfers(&self) -> &[(AccountId, i64)] {
        &self.transfers
    }
}

impl TransactionData for TransferData {
    fn method(&self) -> ServiceMethod {
        ServiceMethod::CRYPTO_TRANSFER
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.transfers.is_empty() {
            return Err(ValidationError::MissingField("transfers"));
        }
        let sum: i128 = self.transfers.iter().map(|(_, a)| i128::from(*a)).sum();
        if sum != 0 {
            return Err(ValidationError::UnbalancedTransfer {
                sum: i64::try_from(sum).unwrap_or(if sum > 0 { i64::MAX } else { i64::MIN }),
            });
        }
        Ok(())
    }

    fn to_body_data(&self) -> proto::transaction_body::Data {
        let account_amounts = self
            .transfers
            .iter()
            .map(|(id, amount)| proto::AccountAmount {
                account_id: Some((*id).into()),
                amount: *amount,
                is_approval: false,
            })
            .collect();
        proto::transaction_body::Data::CryptoTransfer(proto::CryptoTransferTransactionBody {
            transfers: Some(proto::TransferList { account_amounts }),
        })
    }
}

impl Transaction<TransferData> {
    pub fn add_hbar_transfer(&mut self, account_id: AccountId, tinybars: i64) -> Result<&mut Self, Error> {
        self.data_mut()?.add(account_id, tinybars)?;
        Ok(self)
    }
}
