// Path: crates/api/src/lib.rs

//! # hgsdk API Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
//! # hgsdk API
//!
//! Core traits for the hgsdk client. This crate defines the seams between the
//! execution engine and everything it treats as pluggable: signing, time and
//! the transport that reaches nodes.

/// The clock that produces valid-start timestamps.
pub mod clock;
/// Defines unified traits for cryptographic keys and signing providers.
pub mod crypto;
/// Re-exports all core error types from the central `hgsdk-types` crate.
pub mod error;
/// Defines the `TransactionData` trait for operation bodies.
pub mod transaction;
/// Defines the `NodeTransport` trait and RPC method descriptors.
pub mod transport;

/// A curated set of the most commonly used traits and types.
pub mod prelude {
    pub use crate::clock::Clock;
    pub use crate::crypto::{SignatureVerifier, SigningProvider};
    pub use crate::error::{Error, ErrorCode, TransportError, ValidationError};
    pub use crate::transaction::TransactionData;
    pub use crate::transport::{NodeTransport, ServiceMethod};
}
