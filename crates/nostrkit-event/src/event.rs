//! The NIP-01 event record.
//!
//! An [`Event`] starts life with its payload fields populated by the
//! caller (`kind`, `created_at`, `tags`, `content`) and acquires
//! `pubkey`, `id`, and `sig` through [`crate::signing::sign_event`].
//! Fields are hex strings on the wire, matching the relay protocol.

use serde::{Deserialize, Serialize};

/// Kind for a plain text note.
pub const KIND_TEXT_NOTE: u32 = 1;

/// Kind for a NIP-04 encrypted direct message.
pub const KIND_ENCRYPTED_DM: u32 = 4;

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A Nostr event, possibly not yet signed.
///
/// Lifecycle is one-way: unsigned (`id`/`sig` absent) → id assigned →
/// signed. The signer fills `pubkey` and `id` only if absent and always
/// recomputes `sig`; it never clears a populated field.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Event {
    /// Event id: lowercase hex SHA-256 of the canonical serialization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Author public key: 64-char lowercase hex, x-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pubkey: Option<String>,

    /// Unix timestamp in seconds, supplied by the caller.
    pub created_at: u64,

    /// Event kind (see the `KIND_*` constants for common values).
    pub kind: u32,

    /// Arbitrary string-list tags.
    pub tags: Vec<Vec<String>>,

    /// Event content. For kind-4 events this is a NIP-04 envelope.
    pub content: String,

    /// BIP-340 Schnorr signature over the id: 128-char lowercase hex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sig: Option<String>,
}

impl Event {
    /// Creates an unsigned event with the given payload fields.
    pub fn new(kind: u32, created_at: u64, tags: Vec<Vec<String>>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            pubkey: None,
            created_at,
            kind,
            tags,
            content: content.into(),
            sig: None,
        }
    }

    /// Returns `true` once `pubkey`, `id`, and `sig` are all populated.
    pub fn is_signed(&self) -> bool {
        self.pubkey.is_some() && self.id.is_some() && self.sig.is_some()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
