// Path: crates/types/src/app/receipt.rs

//! Ledger status codes and transaction receipts.

use crate::app::{AccountId, FileId, TopicId, TransactionId};
use crate::error::{CodecError, Error};
use crate::proto;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A ledger response code.
///
/// Wraps the raw protocol value so codes this client does not know are carried
/// through verbatim.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Status(pub i32);

impl Status {
    /// The request passed precheck.
    pub const OK: Self = Self(0);
    /// The transaction is malformed.
    pub const INVALID_TRANSACTION: Self = Self(1);
    /// The payer account does not exist.
    pub const PAYER_ACCOUNT_NOT_FOUND: Self = Self(2);
    /// The targeted node does not match the body's node account id.
    pub const INVALID_NODE_ACCOUNT: Self = Self(3);
    /// The valid-start window has passed.
    pub const TRANSACTION_EXPIRED: Self = Self(4);
    /// The valid start lies in the future.
    pub const INVALID_TRANSACTION_START: Self = Self(5);
    /// The valid duration is outside the permitted range.
    pub const INVALID_TRANSACTION_DURATION: Self = Self(6);
    /// A signature failed verification.
    pub const INVALID_SIGNATURE: Self = Self(7);
    /// The memo is too long.
    pub const MEMO_TOO_LONG: Self = Self(8);
    /// The fee offered does not cover the cost.
    pub const INSUFFICIENT_TX_FEE: Self = Self(9);
    /// The payer cannot cover the fee.
    pub const INSUFFICIENT_PAYER_BALANCE: Self = Self(10);
    /// The same transaction id was already submitted.
    pub const DUPLICATE_TRANSACTION: Self = Self(11);
    /// The node is overloaded; try again later.
    pub const BUSY: Self = Self(12);
    /// The operation is not supported.
    pub const NOT_SUPPORTED: Self = Self(13);
    /// The file does not exist.
    pub const INVALID_FILE_ID: Self = Self(14);
    /// The account does not exist.
    pub const INVALID_ACCOUNT_ID: Self = Self(15);
    /// No receipt is known for the transaction id.
    pub const RECEIPT_NOT_FOUND: Self = Self(18);
    /// The transaction has not reached consensus yet.
    pub const UNKNOWN: Self = Self(21);
    /// The transaction reached consensus and succeeded.
    pub const SUCCESS: Self = Self(22);
    /// The transaction failed for an unspecified reason.
    pub const FAIL_INVALID: Self = Self(23);
    /// The transfer list does not sum to zero.
    pub const INVALID_ACCOUNT_AMOUNTS: Self = Self(46);
    /// The node is not yet active.
    pub const PLATFORM_NOT_ACTIVE: Self = Self(67);
    /// The node could not hand the transaction to consensus.
    pub const PLATFORM_TRANSACTION_NOT_CREATED: Self = Self(69);
    /// The serialized transaction exceeds the size limit.
    pub const TRANSACTION_OVERSIZE: Self = Self(64);
    /// The topic does not exist.
    pub const INVALID_TOPIC_ID: Self = Self(150);
    /// The chunk number or total is inconsistent.
    pub const INVALID_CHUNK_NUMBER: Self = Self(164);
    /// The chunk's initial transaction id does not match.
    pub const INVALID_CHUNK_TRANSACTION_ID: Self = Self(165);

    /// Whether the status means the node is temporarily unable to accept the
    /// request and a retry may succeed.
    pub fn is_transient_precheck(&self) -> bool {
        matches!(
            *self,
            Self::BUSY | Self::PLATFORM_NOT_ACTIVE | Self::PLATFORM_TRANSACTION_NOT_CREATED
        )
    }

    /// Whether a receipt query with this status should be asked again.
    pub fn is_receipt_pending(&self) -> bool {
        matches!(*self, Self::UNKNOWN | Self::RECEIPT_NOT_FOUND | Self::BUSY)
    }

    /// The protocol name of this code, when known.
    pub fn name(&self) -> Option<&'static str> {
        Some(match *self {
            Self::OK => "OK",
            Self::INVALID_TRANSACTION => "INVALID_TRANSACTION",
            Self::PAYER_ACCOUNT_NOT_FOUND => "PAYER_ACCOUNT_NOT_FOUND",
            Self::INVALID_NODE_ACCOUNT => "INVALID_NODE_ACCOUNT",
            Self::TRANSACTION_EXPIRED => "TRANSACTION_EXPIRED",
            Self::INVALID_TRANSACTION_START => "INVALID_TRANSACTION_START",
            Self::INVALID_TRANSACTION_DURATION => "INVALID_TRANSACTION_DURATION",
            Self::INVALID_SIGNATURE => "INVALID_SIGNATURE",
            Self::MEMO_TOO_LONG => "MEMO_TOO_LONG",
            Self::INSUFFICIENT_TX_FEE => "INSUFFICIENT_TX_FEE",
            Self::INSUFFICIENT_PAYER_BALANCE => "INSUFFICIENT_PAYER_BALANCE",
            Self::DUPLICATE_TRANSACTION => "DUPLICATE_TRANSACTION",
            Self::BUSY => "BUSY",
            Self::NOT_SUPPORTED => "NOT_SUPPORTED",
            Self::INVALID_FILE_ID => "INVALID_FILE_ID",
            Self::INVALID_ACCOUNT_ID => "INVALID_ACCOUNT_ID",
            Self::RECEIPT_NOT_FOUND => "RECEIPT_NOT_FOUND",
            Self::UNKNOWN => "UNKNOWN",
            Self::SUCCESS => "SUCCESS",
            Self::FAIL_INVALID => "FAIL_INVALID",
            Self::INVALID_ACCOUNT_AMOUNTS => "INVALID_ACCOUNT_AMOUNTS",
            Self::TRANSACTION_OVERSIZE => "TRANSACTION_OVERSIZE",
            Self::PLATFORM_NOT_ACTIVE => "PLATFORM_NOT_ACTIVE",
            Self::PLATFORM_TRANSACTION_NOT_CREATED => "PLATFORM_TRANSACTION_NOT_CREATED",
            Self::INVALID_TOPIC_ID => "INVALID_TOPIC_ID",
            Self::INVALID_CHUNK_NUMBER => "INVALID_CHUNK_NUMBER",
            Self::INVALID_CHUNK_TRANSACTION_ID => "INVALID_CHUNK_TRANSACTION_ID",
            _ => return None,
        })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "STATUS_{}", self.0),
        }
    }
}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self, self.0)
    }
}

/// The outcome of a transaction as reported by the ledger.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Receipt {
    /// The consensus status.
    pub status: Status,
    /// The account created by the transaction, if any.
    pub account_id: Option<AccountId>,
    /// The file created by the transaction, if any.
    pub file_id: Option<FileId>,
    /// The topic created by the transaction, if any.
    pub topic_id: Option<TopicId>,
    /// Sequence number of a submitted topic message.
    pub topic_sequence_number: Option<u64>,
    /// Running hash of the topic after a submitted message.
    pub topic_running_hash: Option<Vec<u8>>,
    /// Version of the running hash algorithm.
    pub topic_running_hash_version: Option<u64>,
}

impl Receipt {
    /// A receipt carrying only a status.
    pub fn from_status(status: Status) -> Self {
        Self {
            status,
            account_id: None,
            file_id: None,
            topic_id: None,
            topic_sequence_number: None,
            topic_running_hash: None,
            topic_running_hash_version: None,
        }
    }

    /// Returns the receipt if it reports `SUCCESS`, else [`Error::Rejected`].
    pub fn validate_status(self, transaction_id: TransactionId) -> Result<Self, Error> {
        if self.status == Status::SUCCESS {
            Ok(self)
        } else {
            Err(Error::Rejected {
                transaction_id,
                status: self.status,
            })
        }
    }
}

impl TryFrom<proto::TransactionReceipt> for Receipt {
    type Error = CodecError;

    fn try_from(p: proto::TransactionReceipt) -> Result<Self, Self::Error> {
        Ok(Self {
            status: Status(p.status),
            account_id: p.account_id.map(TryInto::try_into).transpose()?,
            file_id: p.file_id.map(TryInto::try_into).transpose()?,
            topic_id: p.topic_id.map(TryInto::try_into).transpose()?,
            topic_sequence_number: (p.topic_sequence_number != 0)
                .then_some(p.topic_sequence_number),
            topic_running_hash: (!p.topic_running_hash.is_empty()).then_some(p.topic_running_hash),
            topic_running_hash_version: (p.topic_running_hash_version != 0)
                .then_some(p.topic_running_hash_version),
        })
    }
}

impl From<&Receipt> for proto::TransactionReceipt {
    fn from(r: &Receipt) -> Self {
        proto::TransactionReceipt {
            status: r.status.0,
            account_id: r.account_id.map(Into::into),
            file_id: r.file_id.map(Into::into),
            topic_id: r.topic_id.map(Into::into),
            topic_sequence_number: r.topic_sequence_number.unwrap_or_default(),
            topic_running_hash: r.topic_running_hash.clone().unwrap_or_default(),
            topic_running_hash_version: r.topic_running_hash_version.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Timestamp;

    #[test]
    fn test_unknown_status_is_carried_verbatim() {
        let s = Status(9999);
        assert_eq!(s.name(), None);
        assert_eq!(s.to_string(), "STATUS_9999");
        assert_eq!(Status::SUCCESS.to_string(), "SUCCESS");
    }

    #[test]
    fn test_status_classification() {
        assert!(Status::BUSY.is_transient_precheck());
        assert!(Status::PLATFORM_NOT_ACTIVE.is_transient_precheck());
        assert!(!Status::INVALID_SIGNATURE.is_transient_precheck());
        assert!(Status::UNKNOWN.is_receipt_pending());
        assert!(Status::RECEIPT_NOT_FOUND.is_receipt_pending());
        assert!(!Status::SUCCESS.is_receipt_pending());
    }

    #[test]
    fn test_validate_status() {
        let tx_id = TransactionId::new(AccountId::from_num(2), Timestamp::new(1, 0));
        assert!(Receipt::from_status(Status::SUCCESS)
            .validate_status(tx_id)
            .is_ok());
        let err = Receipt::from_status(Status::INVALID_TOPIC_ID)
            .validate_status(tx_id)
            .unwrap_err();
        assert_eq!(err.status(), Some(Status::INVALID_TOPIC_ID));
    }

    #[test]
    fn test_receipt_from_proto() {
        let p = proto::TransactionReceipt {
            status: 22,
            topic_id: Some(TopicId::from_num(42).into()),
            topic_sequence_number: 7,
            ..Default::default()
        };
        let r = Receipt::try_from(p).unwrap();
        assert_eq!(r.status, Status::SUCCESS);
        assert_eq!(r.topic_id, Some(TopicId::from_num(42)));
        assert_eq!(r.topic_sequence_number, Some(7));
        assert_eq!(r.account_id, None);
    }
}
