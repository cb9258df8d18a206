// Path: crates/api/src/error/mod.rs
// Re-export all core error types from the central types crate.
pub use hgsdk_types::error::{
    CodecError, ConfigError, CryptoError, Error, ErrorCode, TransportError, ValidationError,
};
pub use hgsdk_types::Result;
