// Path: crates/types/src/error/mod.rs
//! Core error types for the hgsdk client.
//!
//! Errors fall into a small number of families that callers must treat
//! differently:
//!
//! * [`ValidationError`]: structural problems detected locally. Never retried,
//!   never contacts the network.
//! * [`TransportError`]: the node could not be reached or asked us to come back
//!   later. Retried according to the client's backoff policy; an exhausted budget
//!   surfaces as [`Error::SubmissionFailed`].
//! * Rejections ([`Error::PrecheckRejected`], [`Error::Rejected`]): the network
//!   processed the request and refused it. Terminal, carries the status verbatim.
//! * [`Error::ReceiptTimeout`]: the outcome is unknown, which is not the same as
//!   failed.

use crate::app::{AccountId, Status, TransactionId};
use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors produced while encoding or decoding wire messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The input was truncated or carried an inconsistent length prefix.
    #[error("Malformed message: {0}")]
    MalformedMessage(String),
    /// A field number of zero or beyond the protocol maximum was used.
    #[error("Invalid field number: {0}")]
    InvalidFieldNumber(u32),
    /// A field required by this client was absent from a decoded message.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    /// A decoded field carried a value outside its domain.
    #[error("Invalid value for field '{field}': {reason}")]
    InvalidValue {
        /// The name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ErrorCode for CodecError {
    fn code(&self) -> &'static str {
        match self {
            Self::MalformedMessage(_) => "CODEC_MALFORMED_MESSAGE",
            Self::InvalidFieldNumber(_) => "CODEC_INVALID_FIELD_NUMBER",
            Self::MissingField(_) => "CODEC_MISSING_FIELD",
            Self::InvalidValue { .. } => "CODEC_INVALID_VALUE",
        }
    }
}

/// Local, pre-network validation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No target node was set explicitly and none could be taken from the client.
    #[error("No node account ids are available to target")]
    NoNodeAccountIds,
    /// An explicitly requested node is not part of the client's network.
    #[error("Node {0} is not part of the configured network")]
    UnknownNode(AccountId),
    /// No transaction id was set and the client has no operator to pay for it.
    #[error("No transaction id set and no operator configured to derive one")]
    MissingPayer,
    /// A required operation field was never set.
    #[error("Required field '{0}' was not set")]
    MissingField(&'static str),
    /// The memo exceeds the protocol limit.
    #[error("Memo is {len} bytes, the maximum is {max}")]
    MemoTooLong {
        /// Length of the supplied memo in bytes.
        len: usize,
        /// Maximum permitted length in bytes.
        max: usize,
    },
    /// The requested valid duration is outside the protocol range.
    #[error("Valid duration of {secs}s is outside the permitted range of {min}..={max}s")]
    ValidDurationOutOfRange {
        /// The requested duration in seconds.
        secs: u64,
        /// Smallest permitted duration in seconds.
        min: u64,
        /// Largest permitted duration in seconds.
        max: u64,
    },
    /// A submission was attempted on an envelope without any signature.
    #[error("Envelope for node {node} carries no signatures")]
    NoSignatures {
        /// The node whose envelope was unsigned.
        node: AccountId,
    },
    /// A threshold key was built with an unsatisfiable threshold.
    #[error("Threshold {threshold} is invalid for a key with {keys} sub-keys")]
    InvalidThreshold {
        /// The requested threshold.
        threshold: u32,
        /// The number of sub-keys available.
        keys: usize,
    },
    /// Splitting the payload would need more chunks than allowed.
    #[error("Payload needs {chunks} chunks but at most {max_chunks} are allowed")]
    PayloadTooLarge {
        /// Number of chunks required for the payload.
        chunks: usize,
        /// Configured chunk ceiling.
        max_chunks: usize,
    },
    /// The chunk size is zero or beyond the protocol maximum.
    #[error("Chunk size {chunk_size} must be within 1..={max}")]
    InvalidChunkSize {
        /// The configured chunk size.
        chunk_size: usize,
        /// Largest permitted chunk size.
        max: usize,
    },
    /// The chunk ceiling was configured as zero.
    #[error("The maximum chunk count must be at least 1")]
    InvalidMaxChunks,
    /// The payload of an operation that requires content was empty.
    #[error("Payload must not be empty")]
    EmptyPayload,
    /// The serialized transaction exceeds the protocol size limit.
    #[error("Serialized transaction is {size} bytes, the maximum is {max}")]
    TransactionTooLarge {
        /// Serialized size in bytes.
        size: usize,
        /// Protocol limit in bytes.
        max: usize,
    },
    /// The amounts in a transfer do not sum to zero.
    #[error("Transfer amounts sum to {sum} instead of zero")]
    UnbalancedTransfer {
        /// The non-zero sum of all transfer amounts.
        sum: i64,
    },
    /// Merging amounts for one account overflowed.
    #[error("Merged transfer amount for account {0} overflows")]
    AmountOverflow(AccountId),
    /// An entity id string could not be parsed.
    #[error("Invalid entity id '{0}': expected '<shard>.<realm>.<num>'")]
    InvalidEntityId(String),
}

impl ErrorCode for ValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::NoNodeAccountIds => "VALIDATION_NO_NODE_ACCOUNT_IDS",
            Self::UnknownNode(_) => "VALIDATION_UNKNOWN_NODE",
            Self::MissingPayer => "VALIDATION_MISSING_PAYER",
            Self::MissingField(_) => "VALIDATION_MISSING_FIELD",
            Self::MemoTooLong { .. } => "VALIDATION_MEMO_TOO_LONG",
            Self::ValidDurationOutOfRange { .. } => "VALIDATION_VALID_DURATION_OUT_OF_RANGE",
            Self::NoSignatures { .. } => "VALIDATION_NO_SIGNATURES",
            Self::InvalidThreshold { .. } => "VALIDATION_INVALID_THRESHOLD",
            Self::PayloadTooLarge { .. } => "VALIDATION_PAYLOAD_TOO_LARGE",
            Self::InvalidChunkSize { .. } => "VALIDATION_INVALID_CHUNK_SIZE",
            Self::InvalidMaxChunks => "VALIDATION_INVALID_MAX_CHUNKS",
            Self::EmptyPayload => "VALIDATION_EMPTY_PAYLOAD",
            Self::TransactionTooLarge { .. } => "VALIDATION_TRANSACTION_TOO_LARGE",
            Self::UnbalancedTransfer { .. } => "VALIDATION_UNBALANCED_TRANSFER",
            Self::AmountOverflow(_) => "VALIDATION_AMOUNT_OVERFLOW",
            Self::InvalidEntityId(_) => "VALIDATION_INVALID_ENTITY_ID",
        }
    }
}

/// Failures talking to a single node.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The node refused the connection or is not reachable.
    #[error("Node {node} unavailable: {reason}")]
    Unavailable {
        /// The node that could not be reached.
        node: AccountId,
        /// Transport-level detail.
        reason: String,
    },
    /// The request did not complete within the per-request timeout.
    #[error("Request to node {node} timed out")]
    Timeout {
        /// The node that timed out.
        node: AccountId,
    },
    /// The node answered but reported a temporary condition.
    #[error("Node {node} is temporarily unable to accept requests ({status})")]
    NodeBusy {
        /// The node that reported the condition.
        node: AccountId,
        /// The precheck status it returned.
        status: Status,
    },
    /// The node considered the request malformed. Resending it cannot help.
    #[error("Node {node} rejected the request as invalid: {reason}")]
    InvalidRequest {
        /// The node that rejected the request.
        node: AccountId,
        /// Transport-level detail.
        reason: String,
    },
    /// The response could not be decoded.
    #[error("Node {node} returned an undecodable response: {reason}")]
    BadResponse {
        /// The node that sent the response.
        node: AccountId,
        /// Decoder detail.
        reason: String,
    },
}

impl TransportError {
    /// Whether the failure may succeed if retried, against this or another node.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Unavailable { .. } | Self::Timeout { .. } | Self::NodeBusy { .. }
        )
    }

    /// The node the failure was observed on.
    pub fn node(&self) -> AccountId {
        match self {
            Self::Unavailable { node, .. }
            | Self::Timeout { node }
            | Self::NodeBusy { node, .. }
            | Self::InvalidRequest { node, .. }
            | Self::BadResponse { node, .. } => *node,
        }
    }
}

impl ErrorCode for TransportError {
    fn code(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => "TRANSPORT_UNAVAILABLE",
            Self::Timeout { .. } => "TRANSPORT_TIMEOUT",
            Self::NodeBusy { .. } => "TRANSPORT_NODE_BUSY",
            Self::InvalidRequest { .. } => "TRANSPORT_INVALID_REQUEST",
            Self::BadResponse { .. } => "TRANSPORT_BAD_RESPONSE",
        }
    }
}

/// Errors from key handling, signing and signature parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Key material could not be parsed.
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    /// Signature bytes could not be parsed.
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
    /// The signing provider failed to produce a signature.
    #[error("Signing failed: {0}")]
    Signing(String),
}

impl ErrorCode for CryptoError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidKey(_) => "CRYPTO_INVALID_KEY",
            Self::InvalidSignature(_) => "CRYPTO_INVALID_SIGNATURE",
            Self::Signing(_) => "CRYPTO_SIGNING_FAILED",
        }
    }
}

/// Errors loading or validating client configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration text could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
    /// The configuration file could not be read.
    #[error("Failed to read configuration file: {0}")]
    Io(String),
    /// A named network is not known to this client.
    #[error("Unknown network '{0}'")]
    UnknownNetwork(String),
    /// A value violates a configuration constraint.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "CONFIG_PARSE_FAILED",
            Self::Io(_) => "CONFIG_IO_FAILED",
            Self::UnknownNetwork(_) => "CONFIG_UNKNOWN_NETWORK",
            Self::Invalid(_) => "CONFIG_INVALID",
        }
    }
}

/// The unified error returned by every pipeline operation.
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// A local validation check failed; nothing was sent.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    /// A field setter was called after the operation was frozen.
    #[error("Operation is {state} and can no longer be modified")]
    FrozenOperation {
        /// The lifecycle state the operation was in.
        state: &'static str,
    },
    /// A lifecycle step was invoked out of order.
    #[error("Invalid lifecycle transition from {from} to {to}")]
    InvalidStateTransition {
        /// The state the operation was in.
        from: &'static str,
        /// The state the step tried to move to.
        to: &'static str,
    },
    /// Encoding or decoding a wire message failed.
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
    /// A single transport failure that was not retried.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
    /// Every retry was spent without a node accepting the request.
    #[error("Submission failed after {attempts} attempts{}", .last.as_ref().map(|e| format!(": {}", e)).unwrap_or_default())]
    SubmissionFailed {
        /// Number of attempts made.
        attempts: u32,
        /// The last transport failure observed, if any attempt was made.
        last: Option<TransportError>,
    },
    /// A node refused the transaction during precheck.
    #[error("Transaction {transaction_id} failed precheck on node {node} with status {status}")]
    PrecheckRejected {
        /// The rejected transaction.
        transaction_id: TransactionId,
        /// The node that rejected it.
        node: AccountId,
        /// The status returned by the node, verbatim.
        status: Status,
    },
    /// The ledger reached consensus on the transaction and rejected it.
    #[error("Transaction {transaction_id} was rejected with status {status}")]
    Rejected {
        /// The rejected transaction.
        transaction_id: TransactionId,
        /// The receipt status, verbatim.
        status: Status,
    },
    /// The receipt polling budget was exhausted; the outcome is unknown.
    #[error("Timed out after {attempts} attempts waiting for the receipt of {transaction_id}")]
    ReceiptTimeout {
        /// The transaction whose receipt is outstanding.
        transaction_id: TransactionId,
        /// Number of receipt queries made.
        attempts: u32,
    },
    /// A chunk failed after earlier chunks of the same payload were accepted.
    #[error("Chunk {failed_chunk} of {total} failed after chunks {succeeded:?} succeeded: {source}")]
    PartialChunkFailure {
        /// 1-based indices of the chunks that were accepted.
        succeeded: Vec<u32>,
        /// 1-based index of the chunk that failed.
        failed_chunk: u32,
        /// Total number of chunks in the payload.
        total: u32,
        /// The failure of `failed_chunk`.
        source: Box<Error>,
    },
    /// Key handling or signing failed.
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),
    /// The client configuration is invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Whether the network refused the operation, as opposed to the client
    /// failing to deliver it or to learn its outcome.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::PrecheckRejected { .. } | Self::Rejected { .. })
    }

    /// The ledger status code carried by a rejection.
    pub fn status(&self) -> Option<Status> {
        match self {
            Self::PrecheckRejected { status, .. } | Self::Rejected { status, .. } => Some(*status),
            Self::PartialChunkFailure { source, .. } => source.status(),
            _ => None,
        }
    }
}

impl ErrorCode for Error {
    fn code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.code(),
            Self::FrozenOperation { .. } => "FROZEN_OPERATION",
            Self::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            Self::Codec(e) => e.code(),
            Self::Transport(e) => e.code(),
            Self::SubmissionFailed { .. } => "SUBMISSION_FAILED",
            Self::PrecheckRejected { .. } => "REJECTED_AT_PRECHECK",
            Self::Rejected { .. } => "REJECTED",
            Self::ReceiptTimeout { .. } => "RECEIPT_TIMEOUT",
            Self::PartialChunkFailure { .. } => "PARTIAL_CHUNK_FAILURE",
            Self::Crypto(e) => e.code(),
            Self::Config(e) => e.code(),
        }
    }
}
