//! Bech32 codecs for `nsec` and `npub` entities (NIP-19).
//!
//! Encodes 32-byte keys as checksummed Bech32 strings with a
//! human-readable prefix: `nsec` for secret keys, `npub` for x-only
//! public keys. Decoding validates the Bech32 checksum, the prefix,
//! and the payload length; a prefix mismatch is rejected, never
//! reinterpreted.

use bech32::{self, FromBase32, ToBase32, Variant};
use nostrkit_types::{NostrkitError, Result};

use crate::keys::{PublicKey, SecretKey};

/// Human-readable prefix for Bech32-encoded secret keys.
pub const NSEC_HRP: &str = "nsec";

/// Human-readable prefix for Bech32-encoded public keys.
pub const NPUB_HRP: &str = "npub";

// ---------------------------------------------------------------------------
// Encode
// ---------------------------------------------------------------------------

/// Encodes a secret key as an `nsec...` Bech32 string.
///
/// # Security
///
/// The returned string contains the private key.
pub fn encode_nsec(secret: &SecretKey) -> Result<String> {
    encode32(NSEC_HRP, &secret.secret_bytes())
}

/// Encodes an x-only public key as an `npub...` Bech32 string.
pub fn encode_npub(public: &PublicKey) -> Result<String> {
    encode32(NPUB_HRP, public.as_bytes())
}

fn encode32(hrp: &str, bytes: &[u8; 32]) -> Result<String> {
    bech32::encode(hrp, bytes.to_base32(), Variant::Bech32).map_err(|e| {
        NostrkitError::CryptoError {
            reason: format!("bech32 encoding failed: {e}"),
        }
    })
}

// ---------------------------------------------------------------------------
// Decode
// ---------------------------------------------------------------------------

/// Decodes an `nsec...` string back into a [`SecretKey`].
///
/// # Errors
///
/// Returns [`NostrkitError::InvalidKey`] if the Bech32 encoding is
/// invalid, the prefix is not `nsec`, the payload is not 32 bytes, or
/// the scalar is outside the curve order.
pub fn decode_nsec(s: &str) -> Result<SecretKey> {
    let bytes = decode32(NSEC_HRP, s)?;
    SecretKey::from_bytes(&bytes)
}

/// Decodes an `npub...` string back into a [`PublicKey`].
///
/// # Errors
///
/// Returns [`NostrkitError::InvalidKey`] if the Bech32 encoding is
/// invalid, the prefix is not `npub`, the payload is not 32 bytes, or
/// the bytes are not a valid X coordinate.
pub fn decode_npub(s: &str) -> Result<PublicKey> {
    let bytes = decode32(NPUB_HRP, s)?;
    PublicKey::from_bytes(bytes)
}

fn decode32(expected_hrp: &str, s: &str) -> Result<[u8; 32]> {
    let (hrp, data_base32, _variant) =
        bech32::decode(s).map_err(|e| NostrkitError::InvalidKey {
            reason: format!("bech32 decoding failed: {e}"),
        })?;

    if hrp != expected_hrp {
        return Err(NostrkitError::InvalidKey {
            reason: format!("expected HRP '{expected_hrp}', got '{hrp}'"),
        });
    }

    let bytes = Vec::<u8>::from_base32(&data_base32).map_err(|e| {
        NostrkitError::InvalidKey {
            reason: format!("bech32 base32 conversion failed: {e}"),
        }
    })?;

    if bytes.len() != 32 {
        return Err(NostrkitError::InvalidKey {
            reason: format!("expected 32-byte payload, got {}", bytes.len()),
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
    fn nsec_roundtrip() {
        let sk = SecretKey::from_bytes(&[0x42; 32]).expect("valid");
        let encoded = encode_nsec(&sk).expect("encode");
        assert!(encoded.starts_with("nsec1"));

        let decoded = decode_nsec(&encoded).expect("decode");
        assert_eq!(decoded.secret_bytes(), sk.secret_bytes());
    }

    #[test]
    fn npub_roundtrip() {
        let pk = SecretKey::from_bytes(&[0x42; 32]).expect("valid").public_key();
        let encoded = encode_npub(&pk).expect("encode");
        assert!(encoded.starts_with("npub1"));

        let decoded = decode_npub(&encoded).expect("decode");
        assert_eq!(decoded, pk);
    }

    #[test]
    fn hrp_mismatch_rejected() {
        let sk = SecretKey::from_bytes(&[0x42; 32]).expect("valid");
        let nsec = encode_nsec(&sk).expect("encode");
        let npub = encode_npub(&sk.public_key()).expect("encode");

        // An nsec string is not an npub and vice versa.
        assert!(decode_npub(&nsec).is_err());
        assert!(decode_nsec(&npub).is_err());
    }

    #[test]
    fn corrupted_checksum_rejected() {
        let sk = SecretKey::from_bytes(&[0x42; 32]).expect("valid");
        let mut encoded = encode_nsec(&sk).expect("encode");
        // Flip the final checksum character.
        let last = encoded.pop().expect("non-empty");
        encoded.push(if last == 'q' { 'p' } else { 'q' });
        assert!(decode_nsec(&encoded).is_err());
    }

    #[test]
    fn garbage_rejected() {
        assert!(decode_nsec("nsec1").is_err());
        assert!(decode_nsec("not bech32 at all").is_err());
        assert!(decode_npub("").is_err());
    }
}
