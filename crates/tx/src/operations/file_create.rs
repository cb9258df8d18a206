// Path: crates/tx/src/operations/file_create.rs
use crate::transaction::Transaction;
use bytes::Bytes;
use hgsdk_api::transaction::TransactionData;
use hgsdk_api::transport::ServiceMethod;
use hgsdk_types::app::key::key_list_to_proto;
use hgsdk_types::app::{Key, Timestamp};
use hgsdk_types::error::{Error, ValidationError};
use hgsdk_types::{proto, MAX_MEMO_BYTES};

/// Creates a file. Contents larger than one transaction are added afterwards
/// with a file append.
pub type FileCreateTransaction = Transaction<FileCreateData>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileCreateData {
    /// Every key must sign updates to the file.
    pub keys: Vec<Key>,
    pub contents: Bytes,
    pub expiration_time: Option<Timestamp>,
    pub file_memo: String,
}

impl TransactionData for FileCreateData {
    fn method(&self) -> ServiceMethod {
        ServiceMethod::CREATE_FILE
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.file_memo.len() > MAX_MEMO_BYTES {
            return Err(ValidationError::MemoTooLong {
                len: self.file_memo.len(),
                max: MAX_MEMO_BYTES,
            });
        }
        Ok(())
    }

    fn to_body_data(&self) -> proto::transaction_body::Data {
        proto::transaction_body::Data::FileCreate(proto::FileCreateTransactionBody {
            expiration_time: self.expiration_time.map(Into::into),
            keys: (!self.keys.is_empty()).then(|| key_list_to_proto(&self.keys)),
            contents: self.contents.to_vec(),
            memo: self.file_memo.clone(),
        })
    }
}

impl Transaction<FileCreateData> {
    pub fn set_keys(&mut self, keys: impl IntoIterator<Item = Key>) -> Result<&mut Self, Error> {
        self.data_mut()?.keys = keys.into_iter().collect();
        Ok(self)
    }

    pub fn set_contents(&mut self, contents: impl Into<Bytes>) -> Result<&mut Self, Error> {
        self.data_mut()?.contents = contents.into();
        Ok(self)
    }

    pub fn set_expiration_time(&mut self, at: Timestamp) -> Result<&mut Self, Error> {
        self.data_mut()?.expiration_time = Some(at);
        Ok(self)
    }

    pub fn set_file_memo(&mut self, memo: impl Into<String>) -> Result<&mut Self, Error> {
        self.data_mut()?.file_memo = memo.into();
        Ok(self)
    }
}
