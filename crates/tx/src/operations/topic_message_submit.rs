// Path: crates/tx/src/operations/topic_message_submit.rs
use crate::chunked::{ChunkedData, ChunkedTransaction};
use crate::transaction::Transaction;
use bytes::Bytes;
use hgsdk_api::transaction::TransactionData;
use hgsdk_api::transport::ServiceMethod;
use hgsdk_types::app::{ChunkInfo, TopicId};
use hgsdk_types::error::{Error, ValidationError};
use hgsdk_types::proto;

/// Submits a message to a topic, split into linked chunks when it exceeds
/// one chunk.
pub type TopicMessageSubmitTransaction = ChunkedTransaction<TopicMessageSubmitData>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicMessageSubmitData {
    pub topic_id: Option<TopicId>,
    pub message: Bytes,
    /// Set on the chunks of a multi-chunk message only.
    pub chunk_info: Option<ChunkInfo>,
}

impl TransactionData for TopicMessageSubmitData {
    fn method(&self) -> ServiceMethod {
        ServiceMethod::SUBMIT_MESSAGE
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.topic_id.is_none() {
            return Err(ValidationError::MissingField("topic_id"));
        }
        if self.message.is_empty() {
            return Err(ValidationError::EmptyPayload);
        }
        Ok(())
    }

    fn to_body_data(&self) -> proto::transaction_body::Data {
        proto::transaction_body::Data::ConsensusSubmitMessage(proto::ConsensusSubmitMessageTransactionBody {
            topic_id: self.topic_id.map(Into::into),
            message: self.message.to_vec(),
            chunk_info: self.chunk_info.map(Into::into),
        })
    }
}

impl ChunkedData for TopicMessageSubmitData {
    const DEFAULT_CHUNK_SIZE: usize = 1024;

    fn payload(&self) -> &Bytes {
        &self.message
    }

    fn with_chunk(&self, chunk: Bytes, info: Option<ChunkInfo>) -> Self {
        Self {
            topic_id: self.topic_id,
            message: chunk,
            chunk_info: info,
        }
    }

    fn links_chunks(&self) -> bool {
        true
    }

    fn requires_payload(&self) -> bool {
        true
    }
}

impl Transaction<TopicMessageSubmitData> {
    pub fn set_topic_id(&mut self, topic_id: TopicId) -> Result<&mut Self, Error> {
        self.data_mut()?.topic_id = Some(topic_id);
        Ok(self)
    }

    pub fn set_message(&mut self, message: impl Into<Bytes>) -> Result<&mut Self, Error> {
        self.data_mut()?.message = message.into();
        Ok(self)
    }
}
