// Path: crates/tx/src/system/validation.rs

//! Signature validation for submitted transactions.
//!
//! The client never decides whether signatures are sufficient before
//! submitting; these helpers let callers and tests check a wire transaction
//! the way the receiving node does.

use crate::transaction::NodeEnvelope;
use hgsdk_api::crypto::SignatureVerifier;
use hgsdk_crypto::sign::key_tree;
use hgsdk_types::app::{AccountId, Key, TransactionId};
use hgsdk_types::error::{CodecError, CryptoError, Error};
use hgsdk_types::proto;

/// What a signature check needs from one wire transaction: who it targets,
/// its id, and the envelope holding the signed bytes and signatures.
#[derive(Debug, Clone)]
pub struct SignatureComponents {
    pub node: AccountId,
    pub transaction_id: TransactionId,
    pub envelope: NodeEnvelope,
}

/// Decodes a wire transaction down to its signature components.
pub fn get_signature_components(tx: &proto::Transaction) -> Result<SignatureComponents, Error> {
    let (envelope, body) = NodeEnvelope::from_wire(tx)?;
    let transaction_id = body
        .transaction_id
        .ok_or(CodecError::MissingField("transaction_id"))?
        .try_into()?;
    Ok(SignatureComponents {
        node: envelope.node(),
        transaction_id,
        envelope,
    })
}

/// Pure cryptographic verification: every attached signature must be valid
/// over the body bytes. Says nothing about which keys are required.
pub fn verify_stateless_signatures(
    tx: &proto::Transaction,
    verifier: &dyn SignatureVerifier,
) -> Result<SignatureComponents, Error> {
    let components = get_signature_components(tx)?;
    let envelope = &components.envelope;
    if let Some(bad) = envelope
        .signatures()
        .iter()
        .find(|pair| !verifier.verify(&pair.public_key, envelope.body_bytes(), &pair.signature))
    {
        return Err(CryptoError::InvalidSignature(format!(
            "signature by {} does not match the body of {}",
            bad.public_key, components.transaction_id
        ))
        .into());
    }
    Ok(components)
}

/// Verifies the signatures and that together they satisfy `key`.
pub fn verify_authorization(
    tx: &proto::Transaction,
    key: &Key,
    verifier: &dyn SignatureVerifier,
) -> Result<TransactionId, Error> {
    let components = verify_stateless_signatures(tx, verifier)?;
    let envelope = &components.envelope;
    if !key_tree::verify(key, envelope.body_bytes(), envelope.signatures(), verifier) {
        return Err(CryptoError::InvalidSignature(format!(
            "{} signature(s) do not satisfy the required key for {}",
            envelope.signatures().len(),
            components.transaction_id
        ))
        .into());
    }
    Ok(components.transaction_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::TransferTransaction;
    use hgsdk_crypto::{Ed25519PrivateKey, Ed25519Verifier, KeyRing};
    use hgsdk_types::app::{SignaturePair, Timestamp};

    fn signed_transfer(ring: &KeyRing) -> TransferTransaction {
        let mut tx = TransferTransaction::new();
        tx.add_hbar_transfer(AccountId::from_num(1001), -5)
            .unwrap()
            .add_hbar_transfer(AccountId::from_num(1002), 5)
            .unwrap()
            .set_node_account_ids([AccountId::from_num(3)])
            .unwrap()
            .set_transaction_id(TransactionId::new(
                AccountId::from_num(1001),
                Timestamp::new(1_700_000_000, 0),
            ))
            .unwrap()
            .freeze()
            .unwrap()
            .sign(ring)
            .unwrap();
        tx
    }

    #[test]
    fn test_components_round_trip_from_wire() {
        let key = Ed25519PrivateKey::generate();
        let tx = signed_transfer(&KeyRing::new().with(key));
        let wire = tx.envelopes()[0].to_wire();

        let components = get_signature_components(&wire).unwrap();
        assert_eq!(components.node, AccountId::from_num(3));
        assert_eq!(Some(components.transaction_id), tx.transaction_id());
        assert_eq!(&components.envelope, &tx.envelopes()[0]);
    }

    #[test]
    fn test_authorization_requires_satisfied_key() {
        let a = Ed25519PrivateKey::generate();
        let b = Ed25519PrivateKey::generate();
        let tx = signed_transfer(&KeyRing::new().with(a.clone()));
        let wire = tx.envelopes()[0].to_wire();

        let only_a = Key::Single(a.to_public_key());
        assert!(verify_authorization(&wire, &only_a, &Ed25519Verifier).is_ok());

        let both = Key::KeyList(vec![Key::Single(a.to_public_key()), Key::Single(b.to_public_key())]);
        assert!(matches!(
            verify_authorization(&wire, &both, &Ed25519Verifier),
            Err(Error::Crypto(CryptoError::InvalidSignature(_)))
        ));
    }

    #[test]
    fn test_forged_signature_is_refused() {
        let a = Ed25519PrivateKey::generate();
        let tx = signed_transfer(&KeyRing::new().with(a.clone()));
        let mut wire = tx.envelopes()[0].to_wire();

        let mut signed: proto::SignedTransaction =
            hgsdk_types::codec::from_bytes_canonical(&wire.signed_transaction_bytes).unwrap();
        let mut map = hgsdk_types::app::SignatureMap::new();
        map.insert(SignaturePair {
            public_key: a.to_public_key(),
            signature: vec![0u8; 64],
        });
        signed.sig_map = Some((&map).into());
        wire.signed_transaction_bytes = hgsdk_types::codec::to_bytes_canonical(&signed);

        assert!(matches!(
            verify_stateless_signatures(&wire, &Ed25519Verifier),
            Err(Error::Crypto(CryptoError::InvalidSignature(_)))
        ));
    }
}
