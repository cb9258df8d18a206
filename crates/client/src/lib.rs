// Path: crates/client/src/lib.rs
//! # hgsdk Client Crate Lints
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
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # hgsdk Client
//!
//! Everything between a signed transaction and its outcome: the node list and
//! its health, retrying submission with failover, receipt polling, and the
//! gRPC transport that reaches nodes.

pub mod client;
pub mod clock;
pub mod execute;
pub mod grpc;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod network;
pub mod receipt;
pub mod retry;

// Re-export for convenience
pub use client::{Client, ClientBuilder, Operator};
pub use clock::{Deadline, SystemClock};
pub use execute::{Submission, Submitted};
pub use grpc::GrpcTransport;
pub use network::Network;
pub use receipt::ReceiptResolver;
pub use retry::RetryPolicy;
