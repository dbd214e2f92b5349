//! BIP-32 hierarchical deterministic key derivation for secp256k1.
//!
//! Derives wallet secret keys from a BIP-39 seed along the NIP-06 path:
//!
//! ```text
//! m/44'/1237'/<account>'/0/0
//! ```
//!
//! Both hardened (`'`) and non-hardened indices are supported, as the
//! NIP-06 path mixes them. Hardened children commit to the parent
//! private key, non-hardened children to the parent public key, per
//! BIP-32 §CKDpriv.
//!
//! Reference: <https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki>

use hmac::{Hmac, Mac};
use nostrkit_types::{NostrkitError, Result};
use secp256k1::{Scalar, Secp256k1};
use sha2::Sha512;
use zeroize::Zeroize;

use crate::keys::SecretKey;
use crate::mnemonic::Seed;

/// HMAC-SHA512 type alias used throughout BIP-32.
type HmacSha512 = Hmac<Sha512>;

/// The hardened index offset (0x80000000) per BIP-32.
const HARDENED_OFFSET: u32 = 0x8000_0000;

/// HMAC key for master key generation per BIP-32 §Master key generation.
const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// SLIP-0044 coin type registered for Nostr keys (NIP-06).
pub const NOSTR_COIN_TYPE: u32 = 1237;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Returns the NIP-06 derivation path for the given account index.
///
/// `m/44'/1237'/<account>'/0/0`
pub fn nip06_path(account: u32) -> String {
    format!("m/44'/{NOSTR_COIN_TYPE}'/{account}'/0/0")
}

/// Derives a secp256k1 secret key from a BIP-39 seed along a BIP-32 path.
///
/// # Parameters
///
/// - `seed` — 64-byte BIP-39 seed (from [`crate::mnemonic::mnemonic_to_seed`]).
/// - `path` — BIP-32 path starting with `m` or `m/`; hardened indices
///   marked with `'` or `h` (e.g. `m/44'/1237'/0'/0/0`).
///
/// # Process (BIP-32)
///
/// 1. Master key: `I = HMAC-SHA512(key="Bitcoin seed", data=seed)`;
///    left 32 bytes → master key, right 32 bytes → chain code.
/// 2. Per child index `i`:
///    - hardened: `I = HMAC-SHA512(cc, 0x00 || key || ser32(i))`
///    - normal:   `I = HMAC-SHA512(cc, serP(pubkey) || ser32(i))`
///    then `child_key = (parse256(I_L) + key) mod n`.
///
/// # Errors
///
/// - [`NostrkitError::InvalidKey`] if the path is malformed.
/// - [`NostrkitError::CryptoError`] if a derived scalar is invalid
///   (probability ≈ 2⁻¹²⁷; BIP-32 mandates rejection, not retry).
pub fn derive_secret_key(seed: &Seed, path: &str) -> Result<SecretKey> {
    let indices = parse_derivation_path(path)?;

    let (mut key, mut chain_code) = master_key_from_seed(seed.as_bytes())?;

    for &index in &indices {
        let (child_key, child_chain) = derive_child(&key, &chain_code, index)?;
        chain_code.zeroize();
        key = child_key;
        chain_code = child_chain;
    }

    chain_code.zeroize();
    Ok(key)
}

// ---------------------------------------------------------------------------
// Internal: master key
// ---------------------------------------------------------------------------

/// Generates the master secret key and chain code from a raw seed.
fn master_key_from_seed(seed: &[u8]) -> Result<(SecretKey, [u8; 32])> {
    let i = hmac_sha512(MASTER_HMAC_KEY, seed)?;

    let mut il = [0u8; 32];
    let mut chain_code = [0u8; 32];
    il.copy_from_slice(&i[..32]);
    chain_code.copy_from_slice(&i[32..]);

    let key = SecretKey::from_bytes(&il).map_err(|_| NostrkitError::CryptoError {
        reason: "master key outside curve order".into(),
    })?;
    il.zeroize();

    Ok((key, chain_code))
}

// ---------------------------------------------------------------------------
// Internal: child derivation
// ---------------------------------------------------------------------------

/// Derives one child key per BIP-32 §CKDpriv.
fn derive_child(
    parent: &SecretKey,
    parent_chain_code: &[u8; 32],
    index: u32,
) -> Result<(SecretKey, [u8; 32])> {
    let mut data = Vec::with_capacity(37);
    if index >= HARDENED_OFFSET {
        // 0x00 || ser256(k_par)
        data.push(0x00);
        data.extend_from_slice(&parent.secret_bytes());
    } else {
        // serP(K_par): 33-byte compressed public point
        let secp = Secp256k1::new();
        let pubkey = secp256k1::PublicKey::from_secret_key(&secp, parent.inner());
        data.extend_from_slice(&pubkey.serialize());
    }
    data.extend_from_slice(&index.to_be_bytes());

    let i = hmac_sha512(parent_chain_code, &data)?;
    data.zeroize();

    let mut il = [0u8; 32];
    let mut chain_code = [0u8; 32];
    il.copy_from_slice(&i[..32]);
    chain_code.copy_from_slice(&i[32..]);

    // child_key = (I_L + k_par) mod n. Rejected if I_L >= n or the sum
    // is zero, per BIP-32.
    let tweak = Scalar::from_be_bytes(il).map_err(|_| NostrkitError::CryptoError {
        reason: format!("derived tweak outside curve order at index {index}"),
    })?;
    il.zeroize();

    let child = parent
        .inner()
        .add_tweak(&tweak)
        .map_err(|e| NostrkitError::CryptoError {
            reason: format!("child key derivation failed at index {index}: {e}"),
        })?;

    Ok((SecretKey::from_bytes(&child.secret_bytes())?, chain_code))
}

// ---------------------------------------------------------------------------
// Internal: path parsing
// ---------------------------------------------------------------------------

/// Parses a BIP-32 path into raw child indices (hardened bit applied).
fn parse_derivation_path(path: &str) -> Result<Vec<u32>> {
    let mut parts = path.split('/');

    match parts.next() {
        Some("m") | Some("M") => {}
        _ => {
            return Err(NostrkitError::InvalidKey {
                reason: format!("derivation path must start with 'm/': {path}"),
            })
        }
    }

    let mut indices = Vec::new();
    for part in parts {
        if part.is_empty() {
            return Err(NostrkitError::InvalidKey {
                reason: format!("empty segment in derivation path: {path}"),
            });
        }

        let (digits, hardened) = match part.strip_suffix('\'').or_else(|| part.strip_suffix('h')) {
            Some(d) => (d, true),
            None => (part, false),
        };

        let index: u32 = digits.parse().map_err(|_| NostrkitError::InvalidKey {
            reason: format!("invalid path segment '{part}' in {path}"),
        })?;

        if index >= HARDENED_OFFSET {
            return Err(NostrkitError::InvalidKey {
                reason: format!("index {index} out of range in {path}"),
            });
        }

        indices.push(if hardened { index | HARDENED_OFFSET } else { index });
    }

    Ok(indices)
}

// ---------------------------------------------------------------------------
// Internal: HMAC
// ---------------------------------------------------------------------------

fn hmac_sha512(key: &[u8], data: &[u8]) -> Result<[u8; 64]> {
    let mut mac = HmacSha512::new_from_slice(key).map_err(|e| NostrkitError::CryptoError {
        reason: format!("HMAC-SHA512 init failed: {e}"),
    })?;
    mac.update(data);

    let mut out = [0u8; 64];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mnemonic::{mnemonic_to_seed, parse_mnemonic};

    fn vector_seed() -> Seed {
        let m = parse_mnemonic(
            "leader monkey parrot ring guide accident before fence cannon height naive bean",
        )
        .expect("valid vector phrase");
        mnemonic_to_seed(&m, "")
    }

    /// NIP-06 test vector #1.
    #[test]
    fn nip06_vector_account_zero() {
        let seed = vector_seed();
        let sk = derive_secret_key(&seed, &nip06_path(0)).expect("derive");
        assert_eq!(
            sk.to_hex(),
            "7f7ff03d123792d6ac594bfa67bf6d0c0ab55b6b1fdb6249303fe861f1ccba9a"
        );
    }

    #[test]
    fn derivation_is_deterministic() {
        let seed = vector_seed();
        let a = derive_secret_key(&seed, &nip06_path(0)).expect("derive");
        let b = derive_secret_key(&seed, &nip06_path(0)).expect("derive");
        assert_eq!(a.secret_bytes(), b.secret_bytes());
    }

    #[test]
    fn different_accounts_different_keys() {
        let seed = vector_seed();
        let a = derive_secret_key(&seed, &nip06_path(0)).expect("derive");
        let b = derive_secret_key(&seed, &nip06_path(1)).expect("derive");
        assert_ne!(a.secret_bytes(), b.secret_bytes());
    }

    #[test]
    fn nip06_path_format() {
        assert_eq!(nip06_path(0), "m/44'/1237'/0'/0/0");
        assert_eq!(nip06_path(7), "m/44'/1237'/7'/0/0");
    }

    #[test]
    fn hardened_marker_h_accepted() {
        let seed = vector_seed();
        let tick = derive_secret_key(&seed, "m/44'/1237'/0'/0/0").expect("derive");
        let aitch = derive_secret_key(&seed, "m/44h/1237h/0h/0/0").expect("derive");
        assert_eq!(tick.secret_bytes(), aitch.secret_bytes());
    }

    #[test]
    fn malformed_paths_rejected() {
        let seed = vector_seed();
        assert!(derive_secret_key(&seed, "44'/1237'/0'/0/0").is_err());
        assert!(derive_secret_key(&seed, "m//0").is_err());
        assert!(derive_secret_key(&seed, "m/abc").is_err());
        assert!(derive_secret_key(&seed, "m/4294967295").is_err()); // >= 2^31
    }

    #[test]
    fn master_only_path_is_valid() {
        let seed = vector_seed();
        let sk = derive_secret_key(&seed, "m").expect("derive master");
        assert_eq!(sk.secret_bytes().len(), 32);
    }
}
