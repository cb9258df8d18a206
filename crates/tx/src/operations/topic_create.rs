// Path: crates/tx/src/operations/topic_create.rs
use super::account_create::DEFAULT_AUTO_RENEW_PERIOD;
use crate::transaction::Transaction;
use hgsdk_api::transaction::TransactionData;
use hgsdk_api::transport::ServiceMethod;
use hgsdk_types::app::{AccountId, Key};
use hgsdk_types::error::{Error, ValidationError};
use hgsdk_types::{proto, MAX_MEMO_BYTES};
use std::time::Duration;

pub type TopicCreateTransaction = Transaction<TopicCreateData>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicCreateData {
    pub topic_memo: String,
    /// Without an admin key the topic can never be updated or deleted.
    pub admin_key: Option<Key>,
    /// Without a submit key anyone may submit messages.
    pub submit_key: Option<Key>,
    pub auto_renew_period: Duration,
    pub auto_renew_account_id: Option<AccountId>,
}

impl Default for TopicCreateData {
    fn default() -> Self {
        Self {
            topic_memo: String::new(),
            admin_key: None,
            submit_key: None,
            auto_renew_period: DEFAULT_AUTO_RENEW_PERIOD,
            auto_renew_account_id: None,
        }
    }
}

impl TransactionData for TopicCreateData {
    fn method(&self) -> ServiceMethod {
        ServiceMethod::CREATE_TOPIC
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.topic_memo.len() > MAX_MEMO_BYTES {
            return Err(ValidationError::MemoTooLong {
                len: self.topic_memo.len(),
                max: MAX_MEMO_BYTES,
            });
        }
        Ok(())
    }

    fn to_body_data(&self) -> proto::transaction_body::Data {
        proto::transaction_body::Data::ConsensusCreateTopic(proto::ConsensusCreateTopicTransactionBody {
            memo: self.topic_memo.clone(),
            admin_key: self.admin_key.as_ref().map(Into::into),
            submit_key: self.submit_key.as_ref().map(Into::into),
            auto_renew_period: Some(proto::Duration {
                seconds: i64::try_from(self.auto_renew_period.as_secs()).unwrap_or(i64::MAX),
            }),
            auto_renew_account: self.auto_renew_account_id.map(Into::into),
        })
    }
}

impl Transaction<TopicCreateData> {
    pub fn set_topic_memo(&mut self, memo: impl Into<String>) -> Result<&mut Self, Error> {
        self.data_mut()?.topic_memo = memo.into();
        Ok(self)
    }

    pub fn set_admin_key(&mut self, key: impl Into<Key>) -> Result<&mut Self, Error> {
        self.data_mut()?.admin_key = Some(key.into());
        Ok(self)
    }

    pub fn set_submit_key(&mut self, key: impl Into<Key>) -> Result<&mut Self, Error> {
        self.data_mut()?.submit_key = Some(key.into());
        Ok(self)
    }

    pub fn set_auto_renew_account_id(&mut self, account_id: AccountId) -> Result<&mut Self, Error> {
        self.data_mut()?.auto_renew_account_id = Some(account_id);
        Ok(self)
    }
}
