// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]
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

//! # hgsdk Types
//!
//! The foundational library of the hgsdk ledger client: entity and transaction
//! identifiers, key trees, receipts, the wire codec, client configuration and
//! the error types shared by every other crate.
//!
//! ## Architectural Role
//!
//! As the base crate, `hgsdk-types` has minimal dependencies and is itself a
//! dependency for every other crate in the workspace. Nothing in it performs
//! I/O except [`config::ClientConfig::load`].

/// Largest serialized transaction the network accepts, in bytes.
pub const MAX_TRANSACTION_BYTES: usize = 6 * 1024;
/// Longest memo a transaction may carry, in bytes.
pub const MAX_MEMO_BYTES: usize = 100;

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::Error> = std::result::Result<T, E>;

/// Ledger data structures such as `AccountId`, `TransactionId`, `Key` and `Receipt`.
pub mod app;
/// The tag/length/value wire codec.
pub mod codec;
/// Client configuration loaded from TOML.
pub mod config;
/// A unified set of all error types used across the SDK.
pub mod error;
/// A prelude containing useful extension traits like `OptionExt`.
pub mod prelude;
/// Typed wire messages.
pub mod proto;
