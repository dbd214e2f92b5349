//! Event signing and verification.
//!
//! [`sign_event`] performs the one-way unsigned → id-assigned → signed
//! transition in a single call:
//!
//! 1. If `pubkey` is absent, derive it from the secret key and set it.
//! 2. If `id` is absent, compute the canonical hash and set it.
//! 3. Always (re)compute `sig` over `id`, even if one was present.
//!
//! Any failure during canonicalization, hashing, or signing aborts the
//! whole operation; there is no partial-failure recovery.

use nostrkit_crypto::keys::{PublicKey, SecretKey};
use nostrkit_crypto::schnorr::{sign_digest, verify_digest, Signature};
use nostrkit_types::{NostrkitError, Result};

use crate::canonical::{event_id, event_id_hex};
use crate::event::Event;

// ---------------------------------------------------------------------------
// Sign
// ---------------------------------------------------------------------------

/// Signs an event in place with the given secret key.
///
/// Fields already populated by the caller are preserved: an existing
/// `pubkey` or `id` is left untouched (the caller owns those claims),
/// while `sig` is always recomputed over the final `id`.
pub fn sign_event(event: &mut Event, secret: &SecretKey) -> Result<()> {
    if event.pubkey.is_none() {
        event.pubkey = Some(secret.public_key().to_hex());
    }

    if event.id.is_none() {
        event.id = Some(event_id_hex(event)?);
    }

    let id = decode_id(event)?;
    let signature = sign_digest(secret, &id);
    event.sig = Some(signature.to_hex());

    Ok(())
}

// ---------------------------------------------------------------------------
// Verify
// ---------------------------------------------------------------------------

/// Verifies a signed event: recomputes the id from the canonical form
/// and checks the Schnorr signature against the embedded pubkey.
///
/// # Errors
///
/// - [`NostrkitError::InvalidEvent`] if `pubkey`, `id`, or `sig` is
///   absent, or if the embedded id does not match the canonical hash.
/// - [`NostrkitError::CryptoError`] if the signature is invalid.
pub fn verify_event(event: &Event) -> Result<()> {
    let pubkey_hex = event
        .pubkey
        .as_deref()
        .ok_or_else(|| NostrkitError::InvalidEvent {
            reason: "event has no pubkey".into(),
        })?;
    let sig_hex = event
        .sig
        .as_deref()
        .ok_or_else(|| NostrkitError::InvalidEvent {
            reason: "event has no signature".into(),
        })?;

    let embedded_id = decode_id(event)?;
    let computed_id = event_id(event)?;
    if embedded_id != computed_id {
        return Err(NostrkitError::InvalidEvent {
            reason: "event id does not match canonical hash".into(),
        });
    }

    let public = PublicKey::from_hex(pubkey_hex)?;
    let signature = Signature::from_hex(sig_hex)?;
    verify_digest(&public, &computed_id, &signature)
}

// ---------------------------------------------------------------------------
// Internal
// ---------------------------------------------------------------------------

/// Decodes the embedded `id` field into its 32 raw bytes.
fn decode_id(event: &Event) -> Result<[u8; 32]> {
    let id_hex = event
        .id
        .as_deref()
        .ok_or_else(|| NostrkitError::InvalidEvent {
            reason: "event has no id".into(),
        })?;

    let bytes = hex::decode(id_hex).map_err(|e| NostrkitError::InvalidEvent {
        reason: format!("invalid hex event id: {e}"),
    })?;
    if bytes.len() != 32 {
        return Err(NostrkitError::InvalidEvent {
            reason: format!("expected 32-byte event id, got {}", bytes.len()),
        });
    }

    let mut id = [0u8; 32];
    id.copy_from_slice(&bytes);
    Ok(id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
