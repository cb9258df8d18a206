// Path: crates/tx/src/operations/file_append.rs
use crate::chunked::{ChunkedData, ChunkedTransaction};
use crate::transaction::Transaction;
use bytes::Bytes;
use hgsdk_api::transaction::TransactionData;
use hgsdk_api::transport::ServiceMethod;
use hgsdk_types::app::{ChunkInfo, FileId};
use hgsdk_types::error::{Error, ValidationError};
use hgsdk_types::proto;

/// Appends to a file. Large contents are split into sequential appends,
/// which the ledger concatenates in order; no chunk linkage is sent.
pub type FileAppendTransaction = ChunkedTransaction<FileAppendData>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileAppendData {
    pub file_id: Option<FileId>,
    pub contents: Bytes,
}

impl TransactionData for FileAppendData {
    fn method(&self) -> ServiceMethod {
        ServiceMethod::APPEND_CONTENT
    }

    fn validate(&self) -> Result<(), ValidationError> {
        match self.file_id {
            Some(_) => Ok(()),
            None => Err(ValidationError::MissingField("file_id")),
        }
    }

    fn to_body_data(&self) -> proto::transaction_body::Data {
        proto::transaction_body::Data::FileAppend(proto::FileAppendTransactionBody {
            file_id: self.file_id.map(Into::into),
            contents: self.contents.to_vec(),
        })
    }
}

impl ChunkedData for FileAppendData {
    const DEFAULT_CHUNK_SIZE: usize = 4096;

    fn payload(&self) -> &Bytes {
        &self.contents
    }

    fn with_chunk(&self, chunk: Bytes, _info: Option<ChunkInfo>) -> Self {
        Self {
            file_id: self.file_id,
            contents: chunk,
        }
    }
}

impl Transaction<FileAppendData> {
    pub fn set_file_id(&mut self, file_id: FileId) -> Result<&mut Self, Error> {
        self.data_mut()?.file_id = Some(file_id);
        Ok(self)
    }

    pub fn set_contents(&mut self, contents: impl Into<Bytes>) -> Result<&mut Self, Error> {
        self.data_mut()?.contents = contents.into();
        Ok(self)
    }
}
