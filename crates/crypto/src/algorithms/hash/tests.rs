//! Tests for hash function implementations

use super::{transaction_hash, HashFunction, Sha256Hash, Sha384Hash};

#[test]
fn test_hash_functions() {
    let message = b"test message";

    let sha256 = Sha256Hash;
    let sha384 = Sha384Hash;

    assert_eq!(sha256.hash(message).len(), sha256.digest_size());
    assert_eq!(sha384.hash(message).len(), sha384.digest_size());
    assert_eq!(sha384.digest_size(), 48);

    // Deterministic
    assert_eq!(sha384.hash(message), sha384.hash(message));
    assert_ne!(sha384.hash(message), sha384.hash(b"other message"));
}

#[test]
fn test_sha384_known_vector() {
    // FIPS 180-2 "abc" test vector.
    let expected = "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed\
                    8086072ba1e7cc2358baeca134c825a7";
    assert_eq!(hex::encode(transaction_hash(b"abc")), expected);
}
