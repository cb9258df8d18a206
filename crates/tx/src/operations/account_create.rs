// Path: crates/tx/src/operations/account_create.rs
use crate::transaction::Transaction;
use hgsdk_api::transaction::TransactionData;
use hgsdk_api::transport::ServiceMethod;
use hgsdk_types::app::Key;
use hgsdk_types::error::{Error, ValidationError};
use hgsdk_types::{proto, MAX_MEMO_BYTES};
use std::time::Duration;

/// Auto-renew period the network applies by default, about 91 days.
pub const DEFAULT_AUTO_RENEW_PERIOD: Duration = Duration::from_secs(7_890_000);

pub type AccountCreateTransaction = Transaction<AccountCreateData>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountCreateData {
    pub key: Option<Key>,
    /// Tinybars moved from the payer into the new account.
    pub initial_balance: u64,
    pub receiver_signature_required: bool,
    pub auto_renew_period: Duration,
    pub account_memo: String,
}

impl Default for AccountCreateData {
    fn default() -> Self {
        Self {
            key: None,
            initial_balance: 0,
            receiver_signature_required: false,
            auto_renew_period: DEFAULT_AUTO_RENEW_PERIOD,
            account_memo: String::new(),
        }
    }
}

impl TransactionData for AccountCreateData {
    fn method(&self) -> ServiceMethod {
        ServiceMethod::CREATE_ACCOUNT
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.key.is_none() {
            return Err(ValidationError::MissingField("key"));
        }
        if self.account_memo.len() > MAX_MEMO_BYTES {
            return Err(ValidationError::MemoTooLong {
                len: self.account_memo.len(),
                max: MAX_MEMO_BYTES,
            });
        }
        Ok(())
    }

    fn to_body_data(&self) -> proto::transaction_body::Data {
        proto::transaction_body::Data::CryptoCreateAccount(proto::CryptoCreateTransactionBody {
            key: self.key.as_ref().map(Into::into),
            initial_balance: self.initial_balance,
            receiver_sig_required: self.receiver_signature_required,
            auto_renew_period: Some(proto::Duration {
                seconds: i64::try_from(self.auto_renew_period.as_secs()).unwrap_or(i64::MAX),
            }),
            memo: self.account_memo.clone(),
        })
    }
}

impl Transaction<AccountCreateData> {
    pub fn set_key(&mut self, key: impl Into<Key>) -> Result<&mut Self, Error> {
        self.data_mut()?.key = Some(key.into());
        Ok(self)
    }

    pub fn set_initial_balance(&mut self, tinybars: u64) -> Result<&mut Self, Error> {
        self.data_mut()?.initial_balance = tinybars;
        Ok(self)
    }

    pub fn set_receiver_signature_required(&mut self, required: bool) -> Result<&mut Self, Error> {
        self.data_mut()?.receiver_signature_required = required;
        Ok(self)
    }

    pub fn set_auto_renew_period(&mut self, period: Duration) -> Result<&mut Self, Error> {
        self.data_mut()?.auto_renew_period = period;
        Ok(self)
    }

    pub fn set_account_memo(&mut self, memo: impl Into<String>) -> Result<&mut Self, Error> {
        self.data_mut()?.account_memo = memo.into();
        Ok(self)
    }
}
