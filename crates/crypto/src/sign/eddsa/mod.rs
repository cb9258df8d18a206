// Path: crates/crypto/src/sign/eddsa/mod.rs
//! Ed25519 keys and signatures using `ed25519-dalek`.
//!
//! Keys parse from raw hex or from the DER-prefixed hex form the ledger's
//! tooling exports. [`Ed25519PrivateKey`] and [`KeyRing`] plug into the
//! pipeline as [`SigningProvider`]s; [`Ed25519Verifier`] is the default
//! [`SignatureVerifier`].

use crate::error::CryptoError;
use ed25519_dalek::{Signer, Verifier};
use hgsdk_api::crypto::{
    SerializableKey, Signature, SignatureVerifier, SigningKey, SigningProvider, VerifyingKey,
};
use hgsdk_types::app::PublicKey;
use rand::rngs::OsRng;
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

/// DER prefix of a PKCS#8 Ed25519 private key, followed by the 32-byte seed.
pub const DER_PRIVATE_KEY_PREFIX: [u8; 16] = [
    0x30, 0x2e, 0x02, 0x01, 0x00, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x04, 0x22, 0x04, 0x20,
];
/// DER prefix of an SPKI Ed25519 public key, followed by the 32 key bytes.
pub const DER_PUBLIC_KEY_PREFIX: [u8; 12] = [
    0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x21, 0x00,
];

/// Ed25519 signature implementation
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Ed25519Signature(ed25519_dalek::Signature);

/// Ed25519 public key implementation
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ed25519PublicKey(ed25519_dalek::VerifyingKey);

/// Ed25519 private key implementation. The seed is wiped on drop.
#[derive(Clone)]
pub struct Ed25519PrivateKey(ed25519_dalek::SigningKey);

impl VerifyingKey for Ed25519PublicKey {
    type Signature = Ed25519Signature;

    fn verify(&self, message: &[u8], signature: &Self::Signature) -> Result<(), CryptoError> {
        self.0
            .verify(message, &signature.0)
            .map_err(|e| CryptoError::InvalidSignature(e.to_string()))
    }

    fn to_public_key(&self) -> PublicKey {
        PublicKey::Ed25519(self.0.to_bytes())
    }
}

impl SerializableKey for Ed25519PublicKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let raw: [u8; 32] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidKey(format!(
                "Invalid public key length: expected 32 bytes, got {}",
                bytes.len()
            ))
        })?;
        ed25519_dalek::VerifyingKey::from_bytes(&raw)
            .map(Ed25519PublicKey)
            .map_err(|e| CryptoError::InvalidKey(format!("Failed to parse public key: {}", e)))
    }
}

impl SigningKey for Ed25519PrivateKey {
    type Signature = Ed25519Signature;

    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError> {
        Ok(Ed25519Signature(self.0.sign(message)))
    }
}

impl SerializableKey for Ed25519PrivateKey {
    fn to_bytes(&self) -> Vec<u8> {
        // Export just the seed (32 bytes)
        self.0.to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let seed: Zeroizing<[u8; 32]> = Zeroizing::new(bytes.try_into().map_err(|_| {
            CryptoError::InvalidKey(format!(
                "Invalid private key length: expected 32 bytes, got {}",
                bytes.len()
            ))
        })?);
        Ok(Ed25519PrivateKey(ed25519_dalek::SigningKey::from_bytes(&seed)))
    }
}

impl SerializableKey for Ed25519Signature {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        ed25519_dalek::Signature::from_slice(bytes)
            .map(Ed25519Signature)
            .map_err(|e| CryptoError::InvalidSignature(format!("Failed to parse signature: {}", e)))
    }
}

impl Signature for Ed25519Signature {}

impl Ed25519PublicKey {
    /// Get the raw public key bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// The DER-encoded form, as hex.
    pub fn to_der_hex(&self) -> String {
        let mut der = DER_PUBLIC_KEY_PREFIX.to_vec();
        der.extend_from_slice(self.as_bytes());
        hex::encode(der)
    }
}

impl TryFrom<&PublicKey> for Ed25519PublicKey {
    type Error = CryptoError;

    fn try_from(pk: &PublicKey) -> Result<Self, Self::Error> {
        match pk {
            PublicKey::Ed25519(bytes) => Self::from_bytes(bytes),
        }
    }
}

impl FromStr for Ed25519PublicKey {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_key_hex(s, &DER_PUBLIC_KEY_PREFIX)?;
        Self::from_bytes(&bytes)
    }
}

impl fmt::Display for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.as_bytes()))
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519PublicKey({})", self)
    }
}

impl Ed25519PrivateKey {
    /// Generates a fresh random key.
    pub fn generate() -> Self {
        Ed25519PrivateKey(ed25519_dalek::SigningKey::generate(&mut OsRng))
    }

    /// Get the public key corresponding to this private key
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.0.verifying_key())
    }

    /// The ledger representation of the corresponding public key.
    pub fn to_public_key(&self) -> PublicKey {
        self.public_key().to_public_key()
    }

    /// The DER-encoded form, as hex.
    pub fn to_der_hex(&self) -> Zeroizing<String> {
        let mut der = Zeroizing::new(DER_PRIVATE_KEY_PREFIX.to_vec());
        der.extend_from_slice(&self.0.to_bytes());
        Zeroizing::new(hex::encode(&*der))
    }
}

impl FromStr for Ed25519PrivateKey {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_key_hex(s, &DER_PRIVATE_KEY_PREFIX)?;
        Self::from_bytes(&bytes)
    }
}

impl fmt::Debug for Ed25519PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519PrivateKey(public: {})", self.public_key())
    }
}

impl SigningProvider for Ed25519PrivateKey {
    fn sign(&self, public_key: &PublicKey, message: &[u8]) -> Result<Option<Vec<u8>>, CryptoError> {
        if *public_key != self.to_public_key() {
            return Ok(None);
        }
        SigningKey::sign(self, message).map(|sig| Some(sig.to_bytes()))
    }

    fn public_keys(&self) -> Vec<PublicKey> {
        vec![self.to_public_key()]
    }
}

/// Decodes raw or DER-prefixed hex key material, with an optional `0x` prefix.
fn decode_key_hex(s: &str, der_prefix: &[u8]) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = Zeroizing::new(
        hex::decode(trimmed).map_err(|e| CryptoError::InvalidKey(format!("Invalid hex: {}", e)))?,
    );
    match bytes.strip_prefix(der_prefix) {
        Some(rest) => Ok(Zeroizing::new(rest.to_vec())),
        None => Ok(bytes),
    }
}

/// Verifies Ed25519 signatures for the key tree walk.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, public_key: &PublicKey, message: &[u8], signature: &[u8]) -> bool {
        let Ok(pk) = Ed25519PublicKey::try_from(public_key) else {
            return false;
        };
        let Ok(sig) = Ed25519Signature::from_bytes(signature) else {
            return false;
        };
        pk.verify(message, &sig).is_ok()
    }
}

/// A set of private keys acting as one signing provider.
#[derive(Debug, Default, Clone)]
pub struct KeyRing {
    keys: Vec<Ed25519PrivateKey>,
}

impl KeyRing {
    /// Creates an empty key ring.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a key. Adding a key that is already held is a no-op.
    pub fn add(&mut self, key: Ed25519PrivateKey) {
        if !self.contains(&key.to_public_key()) {
            self.keys.push(key);
        }
    }

    /// Builder form of [`KeyRing::add`].
    pub fn with(mut self, key: Ed25519PrivateKey) -> Self {
        self.add(key);
        self
    }

    /// Whether the ring holds the private key for `public_key`.
    pub fn contains(&self, public_key: &PublicKey) -> bool {
        self.keys.iter().any(|k| k.to_public_key() == *public_key)
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no key is held.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl SigningProvider for KeyRing {
    fn sign(&self, public_key: &PublicKey, message: &[u8]) -> Result<Option<Vec<u8>>, CryptoError> {
        match self.keys.iter().find(|k| k.to_public_key() == *public_key) {
            Some(key) => SigningProvider::sign(key, public_key, message),
            None => Ok(None),
        }
    }

    fn public_keys(&self) -> Vec<PublicKey> {
        self.keys.iter().map(Ed25519PrivateKey::to_public_key).collect()
    }
}

#[cfg(test)]
mod tests;
