//! Ed25519 signing and verification over order digests.
//!
//! Verification is always against a **claimed** signer: the caller names the
//! maker and the check answers yes or no. Malformed keys and signatures are
//! a `false`, never a panic or an error, so the binder has no failure modes
//! an attacker can steer.

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};

use interbook_types::{AccountId, OrderSignature};

use crate::digest::OrderDigest;

/// Sign a digest with the maker's key.
#[must_use]
pub fn sign_digest(key: &SigningKey, digest: &OrderDigest) -> OrderSignature {
    key.sign(digest.as_bytes()).into()
}

/// Check that `signature` binds `digest` to `claimed_signer`.
///
/// Returns `false` when the claimed key bytes are not a valid curve point,
/// when the signature is malformed, or when it simply does not verify.
#[must_use]
pub fn verify_digest(
    digest: &OrderDigest,
    signature: &OrderSignature,
    claimed_signer: AccountId,
) -> bool {
    let Ok(key) = VerifyingKey::from_bytes(claimed_signer.as_bytes()) else {
        return false;
    };
    key.verify(digest.as_bytes(), &signature.to_signature())
        .is_ok()
}

/// The ledger identity belonging to a signing key.
#[must_use]
pub fn signer_account(key: &SigningKey) -> AccountId {
    AccountId::from_verifying_key(&key.verifying_key())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::SigningContext;
    use interbook_types::Order;
    use rand::rngs::OsRng;

    fn signed_order() -> (SigningKey, AccountId, OrderDigest, OrderSignature) {
        let key = SigningKey::generate(&mut OsRng);
        let maker = signer_account(&key);
        let ctx = SigningContext::new(1, AccountId([0xB1; 32]));
        let digest = ctx.order_digest(&Order::dummy(maker));
        let sig = sign_digest(&key, &digest);
        (key, maker, digest, sig)
    }

    #[test]
    fn sign_then_verify() {
        let (_, maker, digest, sig) = signed_order();
        assert!(verify_digest(&digest, &sig, maker));
    }

    #[test]
    fn wrong_signer_rejected() {
        let (_, _, digest, sig) = signed_order();
        let other = SigningKey::generate(&mut OsRng);
        assert!(!verify_digest(&digest, &sig, signer_account(&other)));
    }

    #[test]
    fn tampered_digest_rejected() {
        let (_, maker, digest, sig) = signed_order();
        let mut bytes = *digest.as_bytes();
        bytes[0] ^= 0x01;
        assert!(!verify_digest(&OrderDigest(bytes), &sig, maker));
    }

    #[test]
    fn corrupted_signature_rejected() {
        let (_, maker, digest, sig) = signed_order();
        let mut bytes = *sig.as_bytes();
        bytes[10] ^= 0xFF;
        assert!(!verify_digest(
            &digest,
            &OrderSignature::from_bytes(bytes),
            maker
        ));
    }

    #[test]
    fn zeroed_signature_rejected() {
        let (_, maker, digest, _) = signed_order();
        let sig = OrderSignature::from_bytes([0u8; 64]);
        assert!(!verify_digest(&digest, &sig, maker));
    }

    #[test]
    fn invalid_pubkey_bytes_are_false_not_panic() {
        let (_, _, digest, sig) = signed_order();
        // Not a valid curve point.
        let bogus = AccountId([0xFF; 32]);
        assert!(!verify_digest(&digest, &sig, bogus));
    }

    #[test]
    fn signature_survives_wire_roundtrip() {
        let (_, maker, digest, sig) = signed_order();
        let json = serde_json::to_string(&sig).unwrap();
        let back: OrderSignature = serde_json::from_str(&json).unwrap();
        assert!(verify_digest(&digest, &back, maker));
    }
}
