//! secp256k1 secret keys and x-only (BIP-340) public keys.
//!
//! Secret keys are accepted as raw hex with an optional `0x` prefix.
//! Public keys are the 32-byte x-only coordinate used by Schnorr
//! signatures and the NIP-04 encryption scheme.

use nostrkit_types::{NostrkitError, Result};
use rand::rngs::OsRng;
use secp256k1::{Keypair, Secp256k1, XOnlyPublicKey};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// x-only secp256k1 public key (32 bytes).
///
/// Stores only the X coordinate of the curve point, per BIP-340. The
/// bytes are validated on construction: they must be the X coordinate
/// of a point on the curve.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct PublicKey([u8; 32]);

impl PublicKey {
    /// Fixed byte length of an x-only public key.
    pub const LEN: usize = 32;

    /// Creates a [`PublicKey`] from a raw 32-byte X coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`NostrkitError::InvalidKey`] if the bytes are not the
    /// X coordinate of a valid curve point.
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self> {
        XOnlyPublicKey::from_slice(&bytes).map_err(|e| NostrkitError::InvalidKey {
            reason: format!("invalid x-only public key: {e}"),
        })?;
        Ok(Self(bytes))
    }

    /// Parses a [`PublicKey`] from a 64-character hex string
    /// (optionally `0x`-prefixed).
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = decode_key_hex(s, "public key")?;
        Self::from_bytes(bytes)
    }

    /// Returns the underlying 32-byte X coordinate.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns the lowercase hex encoding without a prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Returns the validated `secp256k1` representation.
    pub(crate) fn to_x_only(self) -> XOnlyPublicKey {
        // Cannot fail: bytes were validated on construction.
        XOnlyPublicKey::from_slice(&self.0)
            .unwrap_or_else(|_| unreachable!("PublicKey bytes validated on construction"))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for PublicKey {
    type Err = NostrkitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

// ---------------------------------------------------------------------------
// SecretKey
// ---------------------------------------------------------------------------

/// secp256k1 secret key (32-byte scalar).
///
/// Wraps a validated `secp256k1` scalar. Owned transiently by the
/// caller; this crate never persists key material.
pub struct SecretKey(secp256k1::SecretKey);

impl SecretKey {
    /// Fixed byte length of a secret key.
    pub const LEN: usize = 32;

    /// Generates a new random secret key from OS-level entropy.
    pub fn generate() -> Self {
        Self(secp256k1::SecretKey::new(&mut OsRng))
    }

    /// Creates a [`SecretKey`] from raw 32-byte scalar material.
    ///
    /// # Errors
    ///
    /// Returns [`NostrkitError::InvalidKey`] if the scalar is zero or
    /// not below the curve order.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self> {
        let sk = secp256k1::SecretKey::from_slice(bytes).map_err(|e| {
            NostrkitError::InvalidKey {
                reason: format!("invalid secret scalar: {e}"),
            }
        })?;
        Ok(Self(sk))
    }

    /// Parses a [`SecretKey`] from a 64-character hex string.
    ///
    /// A leading `0x` prefix is stripped before decoding.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = decode_key_hex(s, "secret key")?;
        Self::from_bytes(&bytes)
    }

    /// Returns the raw 32-byte scalar.
    ///
    /// # Security
    ///
    /// The returned bytes are sensitive key material. Callers **must**
    /// zeroize or discard the copy as soon as it is no longer needed.
    pub fn secret_bytes(&self) -> [u8; 32] {
        self.0.secret_bytes()
    }

    /// Returns the lowercase hex encoding of the scalar.
    ///
    /// # Security
    ///
    /// The returned string contains the private key.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.secret_bytes())
    }

    /// Derives the x-only (BIP-340) public key for this scalar.
    ///
    /// Deterministic and pure: repeated calls return identical results.
    pub fn public_key(&self) -> PublicKey {
        let secp = Secp256k1::new();
        let keypair = Keypair::from_secret_key(&secp, &self.0);
        let (xonly, _parity) = XOnlyPublicKey::from_keypair(&keypair);
        PublicKey(xonly.serialize())
    }

    /// Returns the inner `secp256k1` secret key for use by sibling
    /// modules in this crate.
    pub(crate) fn inner(&self) -> &secp256k1::SecretKey {
        &self.0
    }
}

// SecretKey intentionally does not implement Clone or Debug to prevent
// accidental leakage of the scalar in logs or copies.

// ---------------------------------------------------------------------------
// Hex parsing
// ---------------------------------------------------------------------------

/// Decodes a 32-byte key from hex, stripping an optional `0x` prefix.
fn decode_key_hex(s: &str, what: &str) -> Result<[u8; 32]> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);

    let bytes = hex::decode(stripped).map_err(|e| NostrkitError::InvalidKey {
        reason: format!("invalid hex for {what}: {e}"),
    })?;

    if bytes.len() != 32 {
        return Err(NostrkitError::InvalidKey {
            reason: format!("expected 32 bytes for {what}, got {}", bytes.len()),
        });
    }

    let mut arr = [0u8; 32];
    arr.copy_from_slice(&bytes);
    Ok(arr)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_key_derivation_is_deterministic() {
        let sk = SecretKey::from_bytes(&[0x42; 32]).expect("valid scalar");
        let pk1 = sk.public_key();
        let pk2 = sk.public_key();
        assert_eq!(pk1, pk2);
    }

    #[test]
    fn hex_prefix_is_stripped() {
        let plain = SecretKey::from_hex(&"11".repeat(32)).expect("valid");
        let prefixed =
            SecretKey::from_hex(&format!("0x{}", "11".repeat(32))).expect("valid");
        assert_eq!(plain.public_key(), prefixed.public_key());
    }

    #[test]
    fn zero_scalar_rejected() {
        assert!(SecretKey::from_bytes(&[0u8; 32]).is_err());
    }

    #[test]
    fn scalar_above_curve_order_rejected() {
        // 0xFF...FF exceeds the secp256k1 group order.
        assert!(SecretKey::from_bytes(&[0xFF; 32]).is_err());
    }

    #[test]
    fn malformed_hex_rejected() {
        assert!(SecretKey::from_hex("not-hex").is_err());
        assert!(SecretKey::from_hex("abcd").is_err()); // too short
    }

    #[test]
    fn public_key_hex_roundtrip() {
        let pk = SecretKey::generate().public_key();
        let parsed = PublicKey::from_hex(&pk.to_hex()).expect("valid");
        assert_eq!(pk, parsed);
    }

    #[test]
    fn public_key_rejects_wrong_length() {
        assert!(PublicKey::from_hex("abcd").is_err());
    }

    #[test]
    fn generated_keys_are_distinct() {
        let a = SecretKey::generate();
        let b = SecretKey::generate();
        assert_ne!(a.public_key(), b.public_key());
    }

    #[test]
    fn display_matches_to_hex() {
        let pk = SecretKey::generate().public_key();
        assert_eq!(pk.to_string(), pk.to_hex());
        assert_eq!(pk.to_hex().len(), 64);
    }
}
