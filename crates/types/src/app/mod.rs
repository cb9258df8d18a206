// Path: crates/types/src/app/mod.rs
//! Core ledger data structures: entity ids, transaction ids, keys and receipts.

/// Ledger entity identifiers such as `AccountId`.
pub mod identity;
/// Key trees, public keys and signature maps.
pub mod key;
/// Status codes and transaction receipts.
pub mod receipt;
/// Timestamps, transaction ids and chunk linkage.
pub mod timing;

pub use identity::{AccountId, FileId, NodeAccountId, TopicId};
pub use key::{Key, PublicKey, SignatureMap, SignaturePair};
pub use receipt::{Receipt, Status};
pub use timing::{ChunkInfo, Timestamp, TransactionId};
