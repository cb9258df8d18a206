// Path: crates/crypto/src/sign/key_tree/mod.rs
//! Signing and verification over [`Key`] trees.
//!
//! Both walks use an explicit stack, so adversarially deep keys cannot exhaust
//! the call stack.

use crate::error::CryptoError;
use hgsdk_api::crypto::{SignatureVerifier, SigningProvider};
use hgsdk_types::app::{Key, PublicKey, SignatureMap, SignaturePair};
use std::collections::{HashMap, HashSet};

/// Collects signatures over `message` for every leaf of `key` the provider
/// can sign for.
///
/// Leaves the provider holds no handle for are skipped. Pairs are returned in
/// declaration order with at most one pair per public key.
pub fn sign(
    key: &Key,
    message: &[u8],
    provider: &dyn SigningProvider,
) -> Result<Vec<SignaturePair>, CryptoError> {
    let mut pairs = Vec::new();
    let mut seen = HashSet::new();
    let mut stack = vec![key];

    while let Some(node) = stack.pop() {
        match node {
            Key::Single(public_key) => {
                if !seen.insert(*public_key) {
                    continue;
                }
                if let Some(signature) = provider.sign(public_key, message)? {
                    pairs.push(SignaturePair {
                        public_key: *public_key,
                        signature,
                    });
                }
            }
            Key::KeyList(keys) | Key::Threshold { keys, .. } => {
                stack.extend(keys.iter().rev());
            }
        }
    }
    Ok(pairs)
}

enum Frame<'a> {
    Enter(&'a Key),
    Exit(&'a Key),
}

/// Whether `signatures` satisfy `key` for `message`.
///
/// A single key needs a cryptographically valid signature from that key. A
/// key list needs every child. A threshold key needs at least `threshold`
/// children; a threshold outside `1..=children` is never satisfied.
pub fn verify(
    key: &Key,
    message: &[u8],
    signatures: &SignatureMap,
    verifier: &dyn SignatureVerifier,
) -> bool {
    let mut checked: HashMap<PublicKey, bool> = HashMap::new();
    let mut results: Vec<bool> = Vec::new();
    let mut stack = vec![Frame::Enter(key)];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(node) => match node {
                Key::Single(public_key) => {
                    let ok = *checked.entry(*public_key).or_insert_with(|| {
                        signatures
                            .get(public_key)
                            .map(|sig| verifier.verify(public_key, message, sig))
                            .unwrap_or(false)
                    });
                    results.push(ok);
                }
                Key::KeyList(keys) | Key::Threshold { keys, .. } => {
                    stack.push(Frame::Exit(node));
                    stack.extend(keys.iter().rev().map(Frame::Enter));
                }
            },
            Frame::Exit(node) => {
                let (children, required) = match node {
                    Key::KeyList(keys) => (keys.len(), keys.len()),
                    Key::Threshold { threshold, keys } => (keys.len(), *threshold as usize),
                    Key::Single(_) => (0, 0),
                };
                let start = results.len().saturating_sub(children);
                let satisfied = results.drain(start..).filter(|ok| *ok).count();
                let in_range = match node {
                    Key::Threshold { .. } => (1..=children).contains(&required),
                    _ => true,
                };
                results.push(in_range && satisfied >= required);
            }
        }
    }
    results.pop().unwrap_or(false)
}

#[cfg(test)]
mod tests;
