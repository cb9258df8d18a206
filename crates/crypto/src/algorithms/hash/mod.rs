// Path: crates/crypto/src/algorithms/hash/mod.rs
//! Cryptographic hash functions using the RustCrypto `sha2` crate.

use sha2::Digest;

/// Hash function trait
pub trait HashFunction {
    /// Hash a message and return the digest
    fn hash(&self, message: &[u8]) -> Vec<u8>;

    /// Get the digest size in bytes
    fn digest_size(&self) -> usize;

    /// Get the name of the hash function
    fn name(&self) -> &str;
}

/// SHA-256 hash function implementation
#[derive(Default, Clone, Copy, Debug)]
pub struct Sha256Hash;

impl HashFunction for Sha256Hash {
    fn hash(&self, message: &[u8]) -> Vec<u8> {
        sha2::Sha256::digest(message).to_vec()
    }

    fn digest_size(&self) -> usize {
        32
    }

    fn name(&self) -> &str {
        "SHA-256"
    }
}

/// SHA-384 hash function implementation. The ledger identifies transactions by
/// this digest of their signed bytes.
#[derive(Default, Clone, Copy, Debug)]
pub struct Sha384Hash;

impl HashFunction for Sha384Hash {
    fn hash(&self, message: &[u8]) -> Vec<u8> {
        sha2::Sha384::digest(message).to_vec()
    }

    fn digest_size(&self) -> usize {
        48
    }

    fn name(&self) -> &str {
        "SHA-384"
    }
}

/// The SHA-384 digest of a signed transaction.
pub fn transaction_hash(signed_transaction_bytes: &[u8]) -> Vec<u8> {
    Sha384Hash.hash(signed_transaction_bytes)
}

#[cfg(test)]
mod tests;
