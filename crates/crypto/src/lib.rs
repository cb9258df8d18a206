// Path: crates/crypto/src/lib.rs
//! # hgsdk Crypto Crate Lints
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
        clippy::indexing_slicing
    )
)]
//! # hgsdk Cryptography
//!
//! Ed25519 keys and signing providers, the key-tree signing and verification
//! walks, and the hash used to identify submitted transactions.

pub mod algorithms;
pub mod error;
pub mod sign;

pub use sign::eddsa::{Ed25519PrivateKey, Ed25519PublicKey, Ed25519Verifier, KeyRing};
