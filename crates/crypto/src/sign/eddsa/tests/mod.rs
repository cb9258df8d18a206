// Path: crates/crypto/src/sign/eddsa/tests/mod.rs
use super::*;

#[test]
fn test_sign_and_verify() {
    let key = Ed25519PrivateKey::generate();
    let message = b"Test message";

    let signature = SigningKey::sign(&key, message).unwrap();
    assert!(key.public_key().verify(message, &signature).is_ok());
    assert!(key.public_key().verify(b"tampered", &signature).is_err());

    let other = Ed25519PrivateKey::generate();
    assert!(other.public_key().verify(message, &signature).is_err());
}

#[test]
fn test_serialization_roundtrip() {
    let key = Ed25519PrivateKey::generate();

    let public_bytes = key.public_key().to_bytes();
    let private_bytes = key.to_bytes();
    assert_eq!(public_bytes.len(), 32);
    assert_eq!(private_bytes.len(), 32); // Just the seed

    let public_key = Ed25519PublicKey::from_bytes(&public_bytes).unwrap();
    let loaded = Ed25519PrivateKey::from_bytes(&private_bytes).unwrap();
    assert_eq!(public_key, loaded.public_key());

    // Signatures are deterministic.
    let message = b"Test message for persistence";
    let original = SigningKey::sign(&key, message).unwrap();
    let reloaded = SigningKey::sign(&loaded, message).unwrap();
    assert_eq!(original.to_bytes(), reloaded.to_bytes());
    assert_eq!(Ed25519Signature::from_bytes(&original.to_bytes()).unwrap(), original);
}

#[test]
fn test_provider_signature_matches_signing_key() {
    let key = Ed25519PrivateKey::generate();
    let message = b"body bytes";
    let via_provider = SigningProvider::sign(&key, &key.to_public_key(), message)
        .unwrap()
        .unwrap();
    assert_eq!(via_provider, SigningKey::sign(&key, message).unwrap().to_bytes());
}

#[test]
fn test_parse_raw_and_der_hex() {
    let key = Ed25519PrivateKey::generate();
    let raw_hex = hex::encode(key.to_bytes());
    let der_hex = key.to_der_hex();
    assert!(der_hex.starts_with("302e020100300506032b657004220420"));

    let from_raw: Ed25519PrivateKey = raw_hex.parse().unwrap();
    let from_der: Ed25519PrivateKey = der_hex.parse().unwrap();
    let from_0x: Ed25519PrivateKey = format!("0x{}", raw_hex).parse().unwrap();
    assert_eq!(from_raw.public_key(), key.public_key());
    assert_eq!(from_der.public_key(), key.public_key());
    assert_eq!(from_0x.public_key(), key.public_key());

    let public = key.public_key();
    assert!(public.to_der_hex().starts_with("302a300506032b6570032100"));
    let parsed: Ed25519PublicKey = public.to_der_hex().parse().unwrap();
    assert_eq!(parsed, public);
    let parsed: Ed25519PublicKey = public.to_string().parse().unwrap();
    assert_eq!(parsed, public);
}

#[test]
fn test_parse_rejects_bad_material() {
    assert!("zz".parse::<Ed25519PrivateKey>().is_err());
    assert!("abcd".parse::<Ed25519PrivateKey>().is_err());
    assert!(Ed25519Signature::from_bytes(&[0u8; 10]).is_err());
}

#[test]
fn test_private_key_debug_hides_seed() {
    let key = Ed25519PrivateKey::generate();
    let seed_hex = hex::encode(key.to_bytes());
    assert!(!format!("{:?}", key).contains(&seed_hex));
}

#[test]
fn test_signing_provider_only_signs_for_own_key() {
    let key = Ed25519PrivateKey::generate();
    let other = Ed25519PrivateKey::generate();
    let message = b"body bytes";

    let sig = SigningProvider::sign(&key, &key.to_public_key(), message)
        .unwrap()
        .unwrap();
    assert!(Ed25519Verifier.verify(&key.to_public_key(), message, &sig));
    assert!(!Ed25519Verifier.verify(&other.to_public_key(), message, &sig));

    assert_eq!(
        SigningProvider::sign(&key, &other.to_public_key(), message).unwrap(),
        None
    );
}

#[test]
fn test_key_ring() {
    let a = Ed25519PrivateKey::generate();
    let b = Ed25519PrivateKey::generate();
    let stranger = Ed25519PrivateKey::generate();

    let ring = KeyRing::new().with(a.clone()).with(b.clone()).with(a.clone());
    assert_eq!(ring.len(), 2);
    assert_eq!(ring.public_keys(), vec![a.to_public_key(), b.to_public_key()]);

    assert!(ring.sign(&b.to_public_key(), b"m").unwrap().is_some());
    assert!(ring.sign(&stranger.to_public_key(), b"m").unwrap().is_none());
}
