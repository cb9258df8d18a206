// Path: crates/types/src/app/timing.rs

//! Timestamps, transaction ids and chunk linkage.

use crate::app::AccountId;
use crate::error::CodecError;
use crate::proto;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A point in time with nanosecond precision, as used for valid-start times.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Timestamp {
    /// Whole seconds since the Unix epoch.
    pub seconds: i64,
    /// Nanoseconds past `seconds`, always below one billion.
    pub nanos: u32,
}

const NANOS_PER_SEC: u64 = 1_000_000_000;

impl Timestamp {
    /// Creates a timestamp, normalizing `nanos` overflow into seconds.
    pub const fn new(seconds: i64, nanos: u32) -> Self {
        Self {
            seconds: seconds + (nanos as u64 / NANOS_PER_SEC) as i64,
            nanos: (nanos as u64 % NANOS_PER_SEC) as u32,
        }
    }

    /// Builds a timestamp from nanoseconds since the Unix epoch.
    pub const fn from_unix_nanos(nanos: u128) -> Self {
        Self {
            seconds: (nanos / NANOS_PER_SEC as u128) as i64,
            nanos: (nanos % NANOS_PER_SEC as u128) as u32,
        }
    }

    /// Nanoseconds since the Unix epoch. Saturates at zero for pre-epoch values.
    pub fn as_unix_nanos(&self) -> u128 {
        if self.seconds < 0 {
            return 0;
        }
        self.seconds as u128 * NANOS_PER_SEC as u128 + self.nanos as u128
    }

    /// Returns this timestamp moved backwards by `d`.
    pub fn saturating_sub(&self, d: Duration) -> Self {
        Self::from_unix_nanos(self.as_unix_nanos().saturating_sub(d.as_nanos()))
    }
}

impl From<SystemTime> for Timestamp {
    fn from(t: SystemTime) -> Self {
        let since = t.duration_since(UNIX_EPOCH).unwrap_or_default();
        Self::from_unix_nanos(since.as_nanos())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.seconds, self.nanos)
    }
}

impl From<Timestamp> for proto::Timestamp {
    fn from(t: Timestamp) -> Self {
        proto::Timestamp {
            seconds: t.seconds,
            nanos: t.nanos as i32,
        }
    }
}

impl TryFrom<proto::Timestamp> for Timestamp {
    type Error = CodecError;

    fn try_from(p: proto::Timestamp) -> Result<Self, Self::Error> {
        let nanos = u32::try_from(p.nanos)
            .ok()
            .filter(|n| u64::from(*n) < NANOS_PER_SEC)
            .ok_or_else(|| CodecError::InvalidValue {
                field: "nanos",
                reason: format!("{} is outside 0..1e9", p.nanos),
            })?;
        Ok(Self::new(p.seconds, nanos))
    }
}

/// Identifies one transaction: who pays for it and when it becomes valid.
///
/// A transaction id never changes once created. Chunks of a single logical
/// submission share payer and valid start and are told apart by `nonce`.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TransactionId {
    /// The account paying the transaction fee.
    pub payer: AccountId,
    /// The earliest consensus time at which the transaction is valid.
    pub valid_start: Timestamp,
    /// Distinguishes transactions sharing payer and valid start.
    pub nonce: Option<i32>,
    /// Whether this id refers to a scheduled transaction.
    pub scheduled: bool,
}

impl TransactionId {
    /// Creates a transaction id without nonce.
    pub const fn new(payer: AccountId, valid_start: Timestamp) -> Self {
        Self {
            payer,
            valid_start,
            nonce: None,
            scheduled: false,
        }
    }

    /// A sibling id sharing payer and valid start, distinguished by `nonce`.
    pub const fn with_nonce(&self, nonce: i32) -> Self {
        Self {
            payer: self.payer,
            valid_start: self.valid_start,
            nonce: Some(nonce),
            scheduled: self.scheduled,
        }
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.payer, self.valid_start)?;
        if self.scheduled {
            write!(f, "?scheduled")?;
        }
        if let Some(nonce) = self.nonce {
            write!(f, "/{}", nonce)?;
        }
        Ok(())
    }
}

impl From<TransactionId> for proto::TransactionId {
    fn from(id: TransactionId) -> Self {
        proto::TransactionId {
            transaction_valid_start: Some(id.valid_start.into()),
            account_id: Some(id.payer.into()),
            scheduled: id.scheduled,
            nonce: id.nonce.unwrap_or_default(),
        }
    }
}

impl TryFrom<proto::TransactionId> for TransactionId {
    type Error = CodecError;

    fn try_from(p: proto::TransactionId) -> Result<Self, Self::Error> {
        let payer = p
            .account_id
            .ok_or(CodecError::MissingField("transaction_id.account_id"))?
            .try_into()?;
        let valid_start = p
            .transaction_valid_start
            .ok_or(CodecError::MissingField("transaction_id.transaction_valid_start"))?
            .try_into()?;
        Ok(Self {
            payer,
            valid_start,
            nonce: (p.nonce != 0).then_some(p.nonce),
            scheduled: p.scheduled,
        })
    }
}

/// Links one chunk of a split payload to the logical submission it belongs to.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct ChunkInfo {
    /// The id of chunk 1, shared by every chunk.
    pub initial_transaction_id: TransactionId,
    /// Total number of chunks.
    pub total: u32,
    /// This chunk's 1-based position.
    pub number: u32,
}

impl From<ChunkInfo> for proto::ConsensusMessageChunkInfo {
    fn from(c: ChunkInfo) -> Self {
        proto::ConsensusMessageChunkInfo {
            initial_transaction_id: Some(c.initial_transaction_id.into()),
            total: c.total as i32,
            number: c.number as i32,
        }
    }
}
