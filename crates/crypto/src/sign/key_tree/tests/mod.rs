// Path: crates/crypto/src/sign/key_tree/tests/mod.rs
use super::*;
use crate::sign::eddsa::{Ed25519PrivateKey, Ed25519Verifier, KeyRing};

fn keys(n: usize) -> Vec<Ed25519PrivateKey> {
    (0..n).map(|_| Ed25519PrivateKey::generate()).collect()
}

fn leaf(k: &Ed25519PrivateKey) -> Key {
    Key::Single(k.to_public_key())
}

fn map_of(pairs: Vec<SignaturePair>) -> SignatureMap {
    let mut map = SignatureMap::new();
    for pair in pairs {
        map.insert(pair);
    }
    map
}

#[test]
fn test_two_of_three_threshold() {
    let ks = keys(3);
    let key = Key::threshold(2, ks.iter().map(leaf).collect()).unwrap();
    let message = b"frozen body";

    // Signatures from A and C satisfy 2-of-3.
    let ring = KeyRing::new().with(ks[0].clone()).with(ks[2].clone());
    let sigs = map_of(sign(&key, message, &ring).unwrap());
    assert_eq!(sigs.len(), 2);
    assert!(verify(&key, message, &sigs, &Ed25519Verifier));

    // Only B is not enough.
    let sigs = map_of(sign(&key, message, &ks[1]).unwrap());
    assert_eq!(sigs.len(), 1);
    assert!(!verify(&key, message, &sigs, &Ed25519Verifier));
}

#[test]
fn test_key_list_needs_every_child() {
    let ks = keys(2);
    let key = Key::KeyList(ks.iter().map(leaf).collect());
    let message = b"m";

    let partial = map_of(sign(&key, message, &ks[0]).unwrap());
    assert!(!verify(&key, message, &partial, &Ed25519Verifier));

    let ring = KeyRing::new().with(ks[0].clone()).with(ks[1].clone());
    let full = map_of(sign(&key, message, &ring).unwrap());
    assert!(verify(&key, message, &full, &Ed25519Verifier));
}

#[test]
fn test_signature_over_other_bytes_does_not_verify() {
    let ks = keys(1);
    let key = leaf(&ks[0]);
    let sigs = map_of(sign(&key, b"original", &ks[0]).unwrap());
    assert!(verify(&key, b"original", &sigs, &Ed25519Verifier));
    assert!(!verify(&key, b"modified", &sigs, &Ed25519Verifier));
}

#[test]
fn test_nested_threshold_inside_list() {
    let ks = keys(4);
    // all of [A, 1-of-[B, C, D]]
    let key = Key::KeyList(vec![
        leaf(&ks[0]),
        Key::threshold(1, vec![leaf(&ks[1]), leaf(&ks[2]), leaf(&ks[3])]).unwrap(),
    ]);
    let message = b"nested";

    let ring = KeyRing::new().with(ks[0].clone()).with(ks[3].clone());
    let sigs = map_of(sign(&key, message, &ring).unwrap());
    assert!(verify(&key, message, &sigs, &Ed25519Verifier));

    let ring = KeyRing::new().with(ks[1].clone()).with(ks[2].clone());
    let sigs = map_of(sign(&key, message, &ring).unwrap());
    assert!(!verify(&key, message, &sigs, &Ed25519Verifier));
}

#[test]
fn test_sign_declaration_order_and_dedupe() {
    let ks = keys(3);
    let key = Key::KeyList(vec![
        leaf(&ks[2]),
        Key::KeyList(vec![leaf(&ks[0]), leaf(&ks[2])]),
        leaf(&ks[1]),
    ]);
    let ring = KeyRing::new()
        .with(ks[0].clone())
        .with(ks[1].clone())
        .with(ks[2].clone());
    let pairs = sign(&key, b"m", &ring).unwrap();
    let order: Vec<_> = pairs.iter().map(|p| p.public_key).collect();
    assert_eq!(
        order,
        vec![
            ks[2].to_public_key(),
            ks[0].to_public_key(),
            ks[1].to_public_key()
        ]
    );
}

#[test]
fn test_empty_key_list_is_trivially_satisfied() {
    let key = Key::KeyList(Vec::new());
    assert!(verify(&key, b"m", &SignatureMap::new(), &Ed25519Verifier));
    assert!(sign(&key, b"m", &KeyRing::new()).unwrap().is_empty());
}

#[test]
fn test_deep_nesting_does_not_recurse() {
    let k = Ed25519PrivateKey::generate();
    let mut key = leaf(&k);
    for _ in 0..1_000 {
        key = Key::KeyList(vec![key]);
    }
    let sigs = map_of(sign(&key, b"deep", &k).unwrap());
    assert!(verify(&key, b"deep", &sigs, &Ed25519Verifier));
}

#[test]
fn test_out_of_range_threshold_is_never_satisfied() {
    let ks = keys(2);
    let message = b"frozen body";
    let empty = Key::Threshold {
        threshold: 0,
        keys: vec![],
    };
    assert!(!verify(&empty, message, &SignatureMap::new(), &Ed25519Verifier));

    let ring = KeyRing::new().with(ks[0].clone()).with(ks[1].clone());
    let zero_of_two = Key::Threshold {
        threshold: 0,
        keys: ks.iter().map(leaf).collect(),
    };
    let sigs = map_of(sign(&zero_of_two, message, &ring).unwrap());
    assert!(!verify(&zero_of_two, message, &sigs, &Ed25519Verifier));

    let three_of_two = Key::Threshold {
        threshold: 3,
        keys: ks.iter().map(leaf).collect(),
    };
    assert!(!verify(&three_of_two, message, &sigs, &Ed25519Verifier));

    // Nested inside a list, the bad threshold fails the whole key.
    let nested = Key::KeyList(vec![leaf(&ks[0]), empty]);
    assert!(!verify(&nested, message, &sigs, &Ed25519Verifier));
}
