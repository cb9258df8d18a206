// Path: crates/types/src/app/key.rs

//! Key structures and the signatures attached to an envelope.
//!
//! A [`Key`] is a tree: leaves are single public keys, inner nodes are either a
//! list (every child must sign) or a threshold (at least `threshold` children
//! must sign). The signing and verification walks live in the crypto crate; this
//! module only owns the data and its wire form.

use crate::error::{CodecError, CryptoError, ValidationError};
use crate::proto;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length in bytes of an Ed25519 public key.
pub const ED25519_PUBLIC_KEY_LEN: usize = 32;
/// Length in bytes of an Ed25519 signature.
pub const ED25519_SIGNATURE_LEN: usize = 64;
/// Deepest key nesting accepted when decoding from the wire.
pub const MAX_KEY_DEPTH: usize = 32;

/// A public key that can appear as a leaf of a [`Key`].
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PublicKey {
    /// A 32-byte Ed25519 public key.
    Ed25519([u8; ED25519_PUBLIC_KEY_LEN]),
}

impl PublicKey {
    /// Parses raw Ed25519 public key bytes.
    pub fn ed25519_from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let raw: [u8; ED25519_PUBLIC_KEY_LEN] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidKey(format!(
                "expected {} bytes for an Ed25519 public key, got {}",
                ED25519_PUBLIC_KEY_LEN,
                bytes.len()
            ))
        })?;
        Ok(PublicKey::Ed25519(raw))
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            PublicKey::Ed25519(b) => b,
        }
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.as_bytes()))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey::Ed25519({})", self)
    }
}

/// An authorization requirement.
///
/// Deserialized keys go through the same threshold check as
/// [`Key::threshold`]. Constructing the variant by hand skips it, which is why
/// verification also treats an out-of-range threshold as unsatisfiable.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(try_from = "KeyRepr")]
pub enum Key {
    /// Satisfied by one signature from this public key.
    Single(PublicKey),
    /// Satisfied when every child is satisfied. An empty list is trivially
    /// satisfied.
    KeyList(Vec<Key>),
    /// Satisfied when at least `threshold` children are satisfied.
    Threshold {
        /// Number of children that must be satisfied.
        threshold: u32,
        /// The candidate children.
        keys: Vec<Key>,
    },
}

/// Serde shape of [`Key`]; children deserialize as validated keys.
#[derive(Deserialize)]
enum KeyRepr {
    Single(PublicKey),
    KeyList(Vec<Key>),
    Threshold { threshold: u32, keys: Vec<Key> },
}

impl TryFrom<KeyRepr> for Key {
    type Error = ValidationError;

    fn try_from(repr: KeyRepr) -> Result<Self, Self::Error> {
        match repr {
            KeyRepr::Single(pk) => Ok(Key::Single(pk)),
            KeyRepr::KeyList(keys) => Ok(Key::KeyList(keys)),
            KeyRepr::Threshold { threshold, keys } => Key::threshold(threshold, keys),
        }
    }
}

impl Key {
    /// Builds a threshold key, rejecting thresholds outside `1..=keys.len()`.
    pub fn threshold(threshold: u32, keys: Vec<Key>) -> Result<Self, ValidationError> {
        if threshold == 0 || threshold as usize > keys.len() {
            return Err(ValidationError::InvalidThreshold {
                threshold,
                keys: keys.len(),
            });
        }
        Ok(Key::Threshold { threshold, keys })
    }

    /// Whether every threshold in the tree is within `1..=keys.len()`.
    pub fn is_well_formed(&self) -> bool {
        let mut stack = vec![self];
        while let Some(key) = stack.pop() {
            match key {
                Key::Single(_) => {}
                Key::KeyList(keys) => stack.extend(keys),
                Key::Threshold { threshold, keys } => {
                    if *threshold == 0 || *threshold as usize > keys.len() {
                        return false;
                    }
                    stack.extend(keys);
                }
            }
        }
        true
    }

    /// Every leaf public key in declaration order, duplicates included.
    pub fn public_keys(&self) -> Vec<PublicKey> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(key) = stack.pop() {
            match key {
                Key::Single(pk) => out.push(*pk),
                Key::KeyList(keys) | Key::Threshold { keys, .. } => {
                    stack.extend(keys.iter().rev());
                }
            }
        }
        out
    }
}

impl From<PublicKey> for Key {
    fn from(pk: PublicKey) -> Self {
        Key::Single(pk)
    }
}

impl From<&Key> for proto::Key {
    fn from(key: &Key) -> Self {
        let inner = match key {
            Key::Single(PublicKey::Ed25519(b)) => proto::key::Key::Ed25519(b.to_vec()),
            Key::KeyList(keys) => proto::key::Key::KeyList(key_list_to_proto(keys)),
            Key::Threshold { threshold, keys } => {
                proto::key::Key::ThresholdKey(proto::ThresholdKey {
                    threshold: *threshold,
                    keys: Some(key_list_to_proto(keys)),
                })
            }
        };
        proto::Key { key: Some(inner) }
    }
}

/// Encodes a list of keys as a wire `KeyList`.
pub fn key_list_to_proto(keys: &[Key]) -> proto::KeyList {
    proto::KeyList {
        keys: keys.iter().map(proto::Key::from).collect(),
    }
}

impl TryFrom<&proto::Key> for Key {
    type Error = CodecError;

    fn try_from(p: &proto::Key) -> Result<Self, Self::Error> {
        key_from_proto(p, 0)
    }
}

/// Decodes a wire `KeyList` into its child keys.
pub fn key_list_from_proto(list: &proto::KeyList) -> Result<Vec<Key>, CodecError> {
    list.keys.iter().map(|k| key_from_proto(k, 1)).collect()
}

fn key_from_proto(p: &proto::Key, depth: usize) -> Result<Key, CodecError> {
    if depth > MAX_KEY_DEPTH {
        return Err(CodecError::InvalidValue {
            field: "key",
            reason: format!("nesting deeper than {}", MAX_KEY_DEPTH),
        });
    }
    let children = |list: Option<&proto::KeyList>| -> Result<Vec<Key>, CodecError> {
        list.map(|l| l.keys.iter().map(|k| key_from_proto(k, depth + 1)).collect())
            .unwrap_or_else(|| Ok(Vec::new()))
    };
    match p.key.as_ref().ok_or(CodecError::MissingField("key"))? {
        proto::key::Key::Ed25519(bytes) => PublicKey::ed25519_from_bytes(bytes)
            .map(Key::Single)
            .map_err(|e| CodecError::InvalidValue {
                field: "key.ed25519",
                reason: e.to_string(),
            }),
        proto::key::Key::KeyList(list) => Ok(Key::KeyList(children(Some(list))?)),
        proto::key::Key::ThresholdKey(t) => {
            Key::threshold(t.threshold, children(t.keys.as_ref())?).map_err(|e| {
                CodecError::InvalidValue {
                    field: "key.threshold_key",
                    reason: e.to_string(),
                }
            })
        }
    }
}

/// One signature, keyed by the public key that produced it.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct SignaturePair {
    /// The signer.
    pub public_key: PublicKey,
    /// Raw signature bytes.
    pub signature: Vec<u8>,
}

/// The signatures attached to one envelope, at most one per public key.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Default)]
pub struct SignatureMap {
    pairs: Vec<SignaturePair>,
}

impl SignatureMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pair. Returns `false` and keeps the existing entry if the public
    /// key already signed.
    pub fn insert(&mut self, pair: SignaturePair) -> bool {
        if self.contains(&pair.public_key) {
            return false;
        }
        self.pairs.push(pair);
        true
    }

    /// Whether `public_key` has already signed.
    pub fn contains(&self, public_key: &PublicKey) -> bool {
        self.get(public_key).is_some()
    }

    /// The signature from `public_key`, if any.
    pub fn get(&self, public_key: &PublicKey) -> Option<&[u8]> {
        self.pairs
            .iter()
            .find(|p| &p.public_key == public_key)
            .map(|p| p.signature.as_slice())
    }

    /// Number of signatures.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no signature has been added.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &SignaturePair> {
        self.pairs.iter()
    }
}

impl From<&SignatureMap> for proto::SignatureMap {
    fn from(map: &SignatureMap) -> Self {
        proto::SignatureMap {
            sig_pair: map
                .iter()
                .map(|p| proto::SignaturePair {
                    pub_key_prefix: p.public_key.as_bytes().to_vec(),
                    signature: Some(proto::signature_pair::Signature::Ed25519(
                        p.signature.clone(),
                    )),
                })
                .collect(),
        }
    }
}

impl TryFrom<&proto::SignatureMap> for SignatureMap {
    type Error = CodecError;

    fn try_from(p: &proto::SignatureMap) -> Result<Self, Self::Error> {
        let mut map = SignatureMap::new();
        for pair in &p.sig_pair {
            let public_key = PublicKey::ed25519_from_bytes(&pair.pub_key_prefix).map_err(|e| {
                CodecError::InvalidValue {
                    field: "sig_pair.pub_key_prefix",
                    reason: e.to_string(),
                }
            })?;
            let signature = match &pair.signature {
                Some(proto::signature_pair::Signature::Ed25519(sig)) => sig.clone(),
                None => return Err(CodecError::MissingField("sig_pair.signature")),
            };
            map.insert(SignaturePair {
                public_key,
                signature,
            });
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pk(b: u8) -> PublicKey {
        PublicKey::Ed25519([b; 32])
    }

    #[test]
    fn test_threshold_bounds() {
        let keys = vec![Key::Single(pk(1)), Key::Single(pk(2))];
        assert!(Key::threshold(1, keys.clone()).is_ok());
        assert!(Key::threshold(2, keys.clone()).is_ok());
        assert_eq!(
            Key::threshold(0, keys.clone()),
            Err(ValidationError::InvalidThreshold {
                threshold: 0,
                keys: 2
            })
        );
        assert!(Key::threshold(3, keys).is_err());
    }

    #[test]
    fn test_deserialized_threshold_is_validated() {
        let zero = r#"{"Threshold":{"threshold":0,"keys":[]}}"#;
        assert!(serde_json::from_str::<Key>(zero).is_err());

        let nested = Key::KeyList(vec![Key::Threshold {
            threshold: 3,
            keys: vec![Key::Single(pk(1)), Key::Single(pk(2))],
        }]);
        let json = serde_json::to_string(&nested).unwrap();
        assert!(serde_json::from_str::<Key>(&json).is_err());

        let good = Key::threshold(1, vec![Key::Single(pk(1)), Key::Single(pk(2))]).unwrap();
        let json = serde_json::to_string(&good).unwrap();
        assert_eq!(serde_json::from_str::<Key>(&json).unwrap(), good);
    }

    #[test]
    fn test_well_formed_checks_every_level() {
        let ok = Key::threshold(1, vec![Key::Single(pk(1))]).unwrap();
        assert!(ok.is_well_formed());
        let bad = Key::KeyList(vec![
            Key::Single(pk(1)),
            Key::Threshold {
                threshold: 0,
                keys: vec![],
            },
        ]);
        assert!(!bad.is_well_formed());
    }

    #[test]
    fn test_key_proto_roundtrip_nested() {
        let key = Key::KeyList(vec![
            Key::Single(pk(1)),
            Key::threshold(1, vec![Key::Single(pk(2)), Key::Single(pk(3))]).unwrap(),
        ]);
        let wire = proto::Key::from(&key);
        assert_eq!(Key::try_from(&wire).unwrap(), key);
        assert_eq!(key.public_keys(), vec![pk(1), pk(2), pk(3)]);
    }

    #[test]
    fn test_wire_threshold_is_validated() {
        let wire = proto::Key {
            key: Some(proto::key::Key::ThresholdKey(proto::ThresholdKey {
                threshold: 2,
                keys: Some(proto::KeyList {
                    keys: vec![proto::Key::from(&Key::Single(pk(1)))],
                }),
            })),
        };
        assert!(Key::try_from(&wire).is_err());
    }

    #[test]
    fn test_wire_depth_is_bounded() {
        let mut wire = proto::Key::from(&Key::Single(pk(9)));
        for _ in 0..=MAX_KEY_DEPTH {
            wire = proto::Key {
                key: Some(proto::key::Key::KeyList(proto::KeyList { keys: vec![wire] })),
            };
        }
        assert!(Key::try_from(&wire).is_err());
    }

    #[test]
    fn test_signature_map_one_entry_per_key() {
        let mut map = SignatureMap::new();
        assert!(map.insert(SignaturePair {
            public_key: pk(1),
            signature: vec![1; 64],
        }));
        assert!(!map.insert(SignaturePair {
            public_key: pk(1),
            signature: vec![2; 64],
        }));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&pk(1)), Some(&[1u8; 64][..]));

        let wire = proto::SignatureMap::from(&map);
        assert_eq!(SignatureMap::try_from(&wire).unwrap(), map);
    }
}
