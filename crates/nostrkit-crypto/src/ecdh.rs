//! NIP-04 shared-secret derivation over secp256k1.
//!
//! The remote x-only public key is lifted to a full curve point with a
//! **forced even-parity** (`02`) prefix before scalar multiplication.
//! This does not recover the true parity of the remote point; it is the
//! convention fixed by NIP-04, and both directions of a conversation
//! agree on the X coordinate regardless of the real parities (negating
//! a point flips only Y). Do not "fix" this — peers depend on it.

use nostrkit_types::{NostrkitError, Result};
use secp256k1::{Parity, Scalar, Secp256k1};
use zeroize::Zeroize;

use crate::keys::{PublicKey, SecretKey};

// ---------------------------------------------------------------------------
// SharedSecret
// ---------------------------------------------------------------------------

/// ECDH output: the 33-byte compressed shared point.
///
/// Byte 0 is the parity prefix (`02`/`03`); bytes `1..33` are the X
/// coordinate. Only the X coordinate is symmetric between the two
/// parties, so [`normalized_key`](Self::normalized_key) is what feeds
/// the cipher. Ephemeral: recomputed per operation, never cached.
/// Zeroized on drop.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct SharedSecret([u8; 33]);

impl SharedSecret {
    /// Returns the full 33-byte compressed point.
    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }

    /// Returns the 32-byte X coordinate (bytes `1..33`), discarding the
    /// leading parity byte. This is the AES key for NIP-04.
    pub fn normalized_key(&self) -> [u8; 32] {
        let mut key = [0u8; 32];
        key.copy_from_slice(&self.0[1..33]);
        key
    }
}

// SharedSecret does not implement Clone/Debug to prevent leakage.

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Computes the NIP-04 shared secret between a local secret key and a
/// remote x-only public key.
///
/// # Process
///
/// 1. Lift the remote X coordinate to a compressed point with forced
///    even parity (`02` prefix).
/// 2. Multiply the point by the local scalar.
/// 3. Serialize the result as a 33-byte compressed point.
///
/// Commutative in the NIP-04 sense: `shared(a, B.x)` and
/// `shared(b, A.x)` agree on the X coordinate for keypairs
/// `(a, A)`, `(b, B)`.
///
/// # Errors
///
/// Returns [`NostrkitError::CryptoError`] if the multiplication
/// degenerates (it cannot for valid keys, but the library reports it).
pub fn shared_secret(local: &SecretKey, remote: &PublicKey) -> Result<SharedSecret> {
    let secp = Secp256k1::new();

    // Forced even parity per the NIP-04 convention.
    let point =
        secp256k1::PublicKey::from_x_only_public_key(remote.to_x_only(), Parity::Even);

    let scalar = Scalar::from_be_bytes(local.secret_bytes()).map_err(|e| {
        NostrkitError::CryptoError {
            reason: format!("secret scalar out of range: {e}"),
        }
    })?;

    let shared = point
        .mul_tweak(&secp, &scalar)
        .map_err(|e| NostrkitError::CryptoError {
            reason: format!("ECDH point multiplication failed: {e}"),
        })?;

    Ok(SharedSecret(shared.serialize()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
