// Path: crates/crypto/src/error.rs
//! Local error types for the `hgsdk-crypto` crate.

// Re-export the canonical error type from the API crate.
pub use hgsdk_api::error::CryptoError;
