// Path: crates/api/src/crypto/mod.rs
//! Defines unified traits for signing keys and the signing seam of the pipeline.

use crate::error::CryptoError;
use hgsdk_types::app::PublicKey;

/// A trait for any key that can be serialized to and from bytes.
pub trait SerializableKey {
    /// Converts the key to a byte vector.
    fn to_bytes(&self) -> Vec<u8>;

    /// Creates a key from a byte slice.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError>
    where
        Self: Sized;
}

/// A trait for a public key used for signature verification.
pub trait VerifyingKey: SerializableKey {
    /// The signature type that this key can verify.
    type Signature: Signature;
    /// Verifies a signature against a message.
    fn verify(&self, message: &[u8], signature: &Self::Signature) -> Result<(), CryptoError>;
    /// The ledger representation of this key.
    fn to_public_key(&self) -> PublicKey;
}

/// A trait for a private key used for signing operations.
pub trait SigningKey: SerializableKey {
    /// The signature type that this key produces.
    type Signature: Signature;
    /// Signs a message.
    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError>;
}

/// A marker trait for a cryptographic signature.
pub trait Signature: SerializableKey {}

/// Produces signatures on behalf of the keys it holds.
///
/// The pipeline asks the provider once per leaf of a key tree. A provider that
/// holds no handle for the requested key answers `Ok(None)` and that leaf is
/// skipped. Errors abort the signing step.
pub trait SigningProvider: Send + Sync {
    /// Signs `message` with the private key behind `public_key`, if held.
    fn sign(&self, public_key: &PublicKey, message: &[u8]) -> Result<Option<Vec<u8>>, CryptoError>;

    /// The public keys this provider can sign for.
    fn public_keys(&self) -> Vec<PublicKey>;
}

/// Checks one signature against one public key.
pub trait SignatureVerifier: Send + Sync {
    /// Whether `signature` is a valid signature of `message` by `public_key`.
    fn verify(&self, public_key: &PublicKey, message: &[u8], signature: &[u8]) -> bool;
}

impl<P: SigningProvider + ?Sized> SigningProvider for std::sync::Arc<P> {
    fn sign(&self, public_key: &PublicKey, message: &[u8]) -> Result<Option<Vec<u8>>, CryptoError> {
        (**self).sign(public_key, message)
    }

    fn public_keys(&self) -> Vec<PublicKey> {
        (**self).public_keys()
    }
}
