//! Canonical event serialization and id computation (NIP-01).
//!
//! An event id is the SHA-256 digest of the canonical JSON array
//!
//! ```text
//! [0, <pubkey>, <created_at>, <kind>, <tags>, <content>]
//! ```
//!
//! serialized without whitespace. Signatures are computed over the raw
//! 32-byte digest, so every implementation must produce byte-identical
//! canonical output for interoperable ids.

use nostrkit_crypto::hash::sha256;
use nostrkit_types::{NostrkitError, Result};
use serde_json::json;

use crate::event::Event;

// ---------------------------------------------------------------------------
// Canonical form
// ---------------------------------------------------------------------------

/// Serializes an event into its canonical JSON array form.
///
/// # Errors
///
/// Returns [`NostrkitError::InvalidEvent`] if `pubkey` is absent —
/// the canonical form is undefined without an author key.
pub fn canonical_json(event: &Event) -> Result<String> {
    let pubkey = event
        .pubkey
        .as_deref()
        .ok_or_else(|| NostrkitError::InvalidEvent {
            reason: "cannot canonicalize event without pubkey".into(),
        })?;

    let value = json!([
        0,
        pubkey,
        event.created_at,
        event.kind,
        event.tags,
        event.content,
    ]);

    serde_json::to_string(&value).map_err(|e| NostrkitError::InvalidEvent {
        reason: format!("canonical serialization failed: {e}"),
    })
}

// ---------------------------------------------------------------------------
// Event id
// ---------------------------------------------------------------------------

/// Computes the 32-byte event id: SHA-256 of the canonical JSON.
pub fn event_id(event: &Event) -> Result<[u8; 32]> {
    let canonical = canonical_json(event)?;
    Ok(sha256(canonical.as_bytes()))
}

/// Computes the event id as a 64-character lowercase hex string.
pub fn event_id_hex(event: &Event) -> Result<String> {
    Ok(hex::encode(event_id(event)?))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
