//! BIP-340 Schnorr signatures over 32-byte digests.
//!
//! Signing is deterministic (no auxiliary randomness), matching the
//! signatures produced by the reference JavaScript nostr tooling so
//! that identical events yield identical signatures across stacks.

use nostrkit_types::{NostrkitError, Result};
use secp256k1::schnorr;
use secp256k1::{Keypair, Message, Secp256k1};

use crate::keys::{PublicKey, SecretKey};

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// BIP-340 Schnorr signature (64 bytes).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Signature([u8; 64]);

impl Signature {
    /// Fixed byte length of a Schnorr signature.
    pub const LEN: usize = 64;

    /// Creates a [`Signature`] from raw bytes.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Parses a [`Signature`] from a 128-character hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| NostrkitError::CryptoError {
            reason: format!("invalid hex for signature: {e}"),
        })?;
        if bytes.len() != 64 {
            return Err(NostrkitError::CryptoError {
                reason: format!("expected 64-byte signature, got {}", bytes.len()),
            });
        }
        let mut arr = [0u8; 64];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Returns the underlying 64-byte array.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Returns the lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

// ---------------------------------------------------------------------------
// Sign / Verify
// ---------------------------------------------------------------------------

/// Signs a pre-hashed 32-byte digest with BIP-340 Schnorr.
///
/// The digest is signed as-is (no further hashing). Deterministic:
/// the same key and digest always yield the same signature.
pub fn sign_digest(secret: &SecretKey, digest: &[u8; 32]) -> Signature {
    let secp = Secp256k1::new();
    let keypair = Keypair::from_secret_key(&secp, secret.inner());
    let message = Message::from_digest(*digest);
    let sig = secp.sign_schnorr_no_aux_rand(&message, &keypair);

    let mut bytes = [0u8; 64];
    bytes.copy_from_slice(sig.as_ref());
    Signature(bytes)
}

/// Verifies a BIP-340 Schnorr signature over a 32-byte digest.
///
/// Returns `Ok(())` if the signature is valid, or
/// [`NostrkitError::CryptoError`] if verification fails.
pub fn verify_digest(public: &PublicKey, digest: &[u8; 32], signature: &Signature) -> Result<()> {
    let secp = Secp256k1::verification_only();
    let message = Message::from_digest(*digest);
    let sig = schnorr::Signature::from_slice(&signature.0).map_err(|e| {
        NostrkitError::CryptoError {
            reason: format!("invalid signature encoding: {e}"),
        }
    })?;

    secp.verify_schnorr(&sig, &message, &public.to_x_only())
        .map_err(|e| NostrkitError::CryptoError {
            reason: format!("signature verification failed: {e}"),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify_roundtrip() {
        let sk = SecretKey::from_bytes(&[0x42; 32]).expect("valid");
        let digest = [0xAB; 32];

        let sig = sign_digest(&sk, &digest);
        assert!(verify_digest(&sk.public_key(), &digest, &sig).is_ok());
    }

    #[test]
    fn signing_is_deterministic() {
        let sk = SecretKey::from_bytes(&[0x42; 32]).expect("valid");
        let digest = [0xAB; 32];
        assert_eq!(
            sign_digest(&sk, &digest).as_bytes(),
            sign_digest(&sk, &digest).as_bytes()
        );
    }

    #[test]
    fn wrong_digest_fails_verification() {
        let sk = SecretKey::from_bytes(&[0x42; 32]).expect("valid");
        let sig = sign_digest(&sk, &[0xAB; 32]);
        assert!(verify_digest(&sk.public_key(), &[0xAC; 32], &sig).is_err());
    }

    #[test]
    fn wrong_key_fails_verification() {
        let sk = SecretKey::from_bytes(&[0x42; 32]).expect("valid");
        let other = SecretKey::from_bytes(&[0x43; 32]).expect("valid");
        let digest = [0xAB; 32];
        let sig = sign_digest(&sk, &digest);
        assert!(verify_digest(&other.public_key(), &digest, &sig).is_err());
    }

    #[test]
    fn signature_hex_roundtrip() {
        let sk = SecretKey::from_bytes(&[0x42; 32]).expect("valid");
        let sig = sign_digest(&sk, &[0x01; 32]);
        let parsed = Signature::from_hex(&sig.to_hex()).expect("parse");
        assert_eq!(sig, parsed);
    }

    #[test]
    fn malformed_signature_hex_rejected() {
        assert!(Signature::from_hex("zz").is_err());
        assert!(Signature::from_hex("abcd").is_err());
    }
}
