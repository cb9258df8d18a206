// Path: crates/tx/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # hgsdk Transactions
//!
//! The transaction lifecycle on top of `hgsdk-client`: drafts are frozen into
//! per-node envelopes, signed with key trees, submitted with failover and
//! resolved to receipts. Payloads too large for one transaction are executed
//! as ordered chunks.

pub mod chunked;
pub mod lifecycle;
pub mod operations;
pub mod response;
pub mod system;
pub mod transaction;

pub use chunked::{ChunkOutcome, ChunkPlan, ChunkedData, ChunkedTransaction};
pub use lifecycle::LifecycleState;
pub use operations::*;
pub use response::TransactionResponse;
pub use transaction::{NodeEnvelope, Transaction};
