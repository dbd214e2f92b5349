//! NIP-04 encrypted direct messages (ECDH + AES-256-CBC).
//!
//! Wire format: `base64(ciphertext) + "?iv=" + base64(iv)` with a fresh
//! random 16-byte IV per encryption and PKCS#7 padding. The format must
//! be reproduced byte-for-byte for interoperability with existing peers.
//!
//! There is **no authentication tag** — a padding failure on decrypt is
//! all the tamper detection the historical scheme provides. This module
//! reproduces that behavior rather than upgrading to an AEAD.
//!
//! The cipher backend is injected through [`CipherProvider`] instead of
//! being reached through a process-global, so tests and embedders can
//! substitute their own primitive. [`AesCbcProvider`] is the default,
//! backed by the `aes` + `cbc` crates and OS entropy.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use nostrkit_types::{NostrkitError, Result};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::ecdh::shared_secret;
use crate::keys::{PublicKey, SecretKey};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Literal separator between the ciphertext and IV components of an
/// envelope.
const IV_SEPARATOR: &str = "?iv=";

/// Fixed IV length for AES-CBC (one cipher block).
pub const IV_LEN: usize = 16;

// ---------------------------------------------------------------------------
// CipherProvider
// ---------------------------------------------------------------------------

/// Symmetric cipher capability consumed by the NIP-04 envelope functions.
///
/// Implementations must provide AES-256-CBC with PKCS#7 padding to stay
/// wire-compatible; the trait exists so the primitive and its entropy
/// source are injected explicitly rather than patched into a global.
pub trait CipherProvider {
    /// Returns 16 bytes of cryptographically secure randomness.
    fn random_iv(&self) -> [u8; IV_LEN];

    /// Encrypts `plaintext` with AES-256-CBC / PKCS#7.
    fn encrypt(&self, key: &[u8; 32], iv: &[u8; IV_LEN], plaintext: &[u8]) -> Result<Vec<u8>>;

    /// Decrypts `ciphertext` with AES-256-CBC / PKCS#7.
    ///
    /// A wrong key and a tampered ciphertext are indistinguishable:
    /// both surface as a padding failure.
    fn decrypt(&self, key: &[u8; 32], iv: &[u8; IV_LEN], ciphertext: &[u8]) -> Result<Vec<u8>>;
}

/// Default [`CipherProvider`]: `aes`/`cbc` crates plus OS entropy.
#[derive(Clone, Copy, Debug, Default)]
pub struct AesCbcProvider;

impl CipherProvider for AesCbcProvider {
    fn random_iv(&self) -> [u8; IV_LEN] {
        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut iv);
        iv
    }

    fn encrypt(&self, key: &[u8; 32], iv: &[u8; IV_LEN], plaintext: &[u8]) -> Result<Vec<u8>> {
        let cipher = Aes256CbcEnc::new_from_slices(key, iv).map_err(|e| {
            NostrkitError::CryptoError {
                reason: format!("AES-CBC init failed: {e}"),
            }
        })?;
        Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
    }

    fn decrypt(&self, key: &[u8; 32], iv: &[u8; IV_LEN], ciphertext: &[u8]) -> Result<Vec<u8>> {
        let cipher = Aes256CbcDec::new_from_slices(key, iv).map_err(|e| {
            NostrkitError::CryptoError {
                reason: format!("AES-CBC init failed: {e}"),
            }
        })?;
        cipher
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|e| NostrkitError::CryptoError {
                reason: format!("AES-CBC decryption failed: {e}"),
            })
    }
}

// ---------------------------------------------------------------------------
// Encrypt
// ---------------------------------------------------------------------------

/// Encrypts `plaintext` for `remote` using the NIP-04 scheme and the
/// default cipher backend.
pub fn encrypt(local: &SecretKey, remote: &PublicKey, plaintext: &str) -> Result<String> {
    encrypt_with(&AesCbcProvider, local, remote, plaintext)
}

/// Encrypts `plaintext` for `remote` using an explicit cipher backend.
///
/// # Process
///
/// 1. Derive the shared secret and normalize it to the 32-byte AES key.
/// 2. Draw a fresh random 16-byte IV from the provider.
/// 3. AES-256-CBC encrypt the UTF-8 plaintext with PKCS#7 padding.
/// 4. Return `base64(ciphertext) + "?iv=" + base64(iv)`.
pub fn encrypt_with<P: CipherProvider>(
    provider: &P,
    local: &SecretKey,
    remote: &PublicKey,
    plaintext: &str,
) -> Result<String> {
    let secret = shared_secret(local, remote)?;
    let key = secret.normalized_key();

    let iv = provider.random_iv();
    let ciphertext = provider.encrypt(&key, &iv, plaintext.as_bytes())?;

    Ok(format!(
        "{}{}{}",
        BASE64.encode(ciphertext),
        IV_SEPARATOR,
        BASE64.encode(iv)
    ))
}

// ---------------------------------------------------------------------------
// Decrypt
// ---------------------------------------------------------------------------

/// Decrypts a NIP-04 envelope from `remote` using the default cipher
/// backend.
pub fn decrypt(local: &SecretKey, remote: &PublicKey, envelope: &str) -> Result<String> {
    decrypt_with(&AesCbcProvider, local, remote, envelope)
}

/// Decrypts a NIP-04 envelope from `remote` using an explicit cipher
/// backend.
///
/// # Errors
///
/// - [`NostrkitError::InvalidEnvelope`] if the `?iv=` separator is
///   missing, either component fails base64 decoding, or the IV is not
///   16 bytes.
/// - [`NostrkitError::CryptoError`] if padding verification fails
///   (wrong key or tampered ciphertext — indistinguishable).
pub fn decrypt_with<P: CipherProvider>(
    provider: &P,
    local: &SecretKey,
    remote: &PublicKey,
    envelope: &str,
) -> Result<String> {
    let (ct_b64, iv_b64) =
        envelope
            .split_once(IV_SEPARATOR)
            .ok_or_else(|| NostrkitError::InvalidEnvelope {
                reason: format!("missing '{IV_SEPARATOR}' separator"),
            })?;

    let ciphertext = BASE64
        .decode(ct_b64)
        .map_err(|e| NostrkitError::InvalidEnvelope {
            reason: format!("invalid base64 ciphertext: {e}"),
        })?;

    let iv_bytes = BASE64
        .decode(iv_b64)
        .map_err(|e| NostrkitError::InvalidEnvelope {
            reason: format!("invalid base64 iv: {e}"),
        })?;

    if iv_bytes.len() != IV_LEN {
        return Err(NostrkitError::InvalidEnvelope {
            reason: format!("expected {IV_LEN}-byte iv, got {}", iv_bytes.len()),
        });
    }
    let mut iv = [0u8; IV_LEN];
    iv.copy_from_slice(&iv_bytes);

    let secret = shared_secret(local, remote)?;
    let key = secret.normalized_key();

    let plaintext = provider.decrypt(&key, &iv, &ciphertext)?;

    String::from_utf8(plaintext).map_err(|e| NostrkitError::CryptoError {
        reason: format!("decrypted payload is not UTF-8: {e}"),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn keypair(byte: u8) -> (SecretKey, PublicKey) {
        let sk = SecretKey::from_bytes(&[byte; 32]).expect("valid scalar");
        let pk = sk.public_key();
        (sk, pk)
    }

    #[test]
    fn roundtrip_between_two_parties() {
        let (sk1, pk1) = keypair(0x11);
        let (sk2, pk2) = keypair(0x22);

        let envelope = encrypt(&sk1, &pk2, "hello").expect("encrypt");
        let plaintext = decrypt(&sk2, &pk1, &envelope).expect("decrypt");
        assert_eq!(plaintext, "hello");
    }

    #[test]
    fn ciphertext_is_nondeterministic_but_decrypts_identically() {
        let (sk1, pk1) = keypair(0x11);
        let (sk2, pk2) = keypair(0x22);

        let e1 = encrypt(&sk1, &pk2, "same message").expect("encrypt");
        let e2 = encrypt(&sk1, &pk2, "same message").expect("encrypt");
        assert_ne!(e1, e2); // random IV

        assert_eq!(decrypt(&sk2, &pk1, &e1).expect("decrypt"), "same message");
        assert_eq!(decrypt(&sk2, &pk1, &e2).expect("decrypt"), "same message");
    }

    #[test]
    fn envelope_shape_is_base64_iv_base64() {
        let (sk1, _) = keypair(0x11);
        let (_, pk2) = keypair(0x22);

        let envelope = encrypt(&sk1, &pk2, "shape check").expect("encrypt");
        let (ct, iv) = envelope.split_once("?iv=").expect("separator present");

        assert!(!ct.is_empty());
        assert!(!iv.is_empty());
        let b64 = |c: char| c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '=';
        assert!(ct.chars().all(b64));
        assert!(iv.chars().all(b64));
        assert_eq!(BASE64.decode(iv).expect("iv decodes").len(), IV_LEN);
    }

    #[test]
    fn empty_plaintext_roundtrip() {
        let (sk1, pk1) = keypair(0x11);
        let (sk2, pk2) = keypair(0x22);

        let envelope = encrypt(&sk1, &pk2, "").expect("encrypt");
        assert_eq!(decrypt(&sk2, &pk1, &envelope).expect("decrypt"), "");
    }

    #[test]
    fn unicode_plaintext_roundtrip() {
        let (sk1, pk1) = keypair(0x11);
        let (sk2, pk2) = keypair(0x22);

        let msg = "héllo wörld — ∑ 日本語 🦀";
        let envelope = encrypt(&sk1, &pk2, msg).expect("encrypt");
        assert_eq!(decrypt(&sk2, &pk1, &envelope).expect("decrypt"), msg);
    }

    #[test]
    fn missing_separator_rejected() {
        let (sk1, pk1) = keypair(0x11);
        let err = decrypt(&sk1, &pk1, "bm8gc2VwYXJhdG9y").expect_err("must fail");
        assert!(matches!(err, NostrkitError::InvalidEnvelope { .. }));
    }

    #[test]
    fn invalid_base64_rejected() {
        let (sk1, pk1) = keypair(0x11);
        let err = decrypt(&sk1, &pk1, "@@@?iv=@@@").expect_err("must fail");
        assert!(matches!(err, NostrkitError::InvalidEnvelope { .. }));
    }

    #[test]
    fn wrong_iv_length_rejected() {
        let (sk1, pk1) = keypair(0x11);
        let envelope = format!("{}?iv={}", BASE64.encode(b"0123456789abcdef"), BASE64.encode(b"short"));
        let err = decrypt(&sk1, &pk1, &envelope).expect_err("must fail");
        assert!(matches!(err, NostrkitError::InvalidEnvelope { .. }));
    }

    #[test]
    fn wrong_key_fails_decrypt() {
        let (sk1, pk1) = keypair(0x11);
        let (_, pk2) = keypair(0x22);
        let (sk3, _) = keypair(0x33);

        let envelope = encrypt(&sk1, &pk2, "for peer two only").expect("encrypt");
        assert!(decrypt(&sk3, &pk1, &envelope).is_err());
    }

    #[test]
    fn deterministic_with_injected_iv() {
        // A fixed-IV provider exercises the capability-injection seam.
        struct FixedIv;
        impl CipherProvider for FixedIv {
            fn random_iv(&self) -> [u8; IV_LEN] {
                [0xA5; IV_LEN]
            }
            fn encrypt(
                &self,
                key: &[u8; 32],
                iv: &[u8; IV_LEN],
                plaintext: &[u8],
            ) -> Result<Vec<u8>> {
                AesCbcProvider.encrypt(key, iv, plaintext)
            }
            fn decrypt(
                &self,
                key: &[u8; 32],
                iv: &[u8; IV_LEN],
                ciphertext: &[u8],
            ) -> Result<Vec<u8>> {
                AesCbcProvider.decrypt(key, iv, ciphertext)
            }
        }

        let (sk1, _) = keypair(0x11);
        let (_, pk2) = keypair(0x22);

        let e1 = encrypt_with(&FixedIv, &sk1, &pk2, "fixed").expect("encrypt");
        let e2 = encrypt_with(&FixedIv, &sk1, &pk2, "fixed").expect("encrypt");
        assert_eq!(e1, e2);
    }
}
