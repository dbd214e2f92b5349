//! Signing requests and responses.
//!
//! [`SignRequest`] is an explicit tagged union over the operations the
//! wallet supports; dispatch is an exhaustive `match`, not a runtime
//! type check. [`CryptTextParams`] is the untyped wire form used by
//! RPC callers — converting it narrows the free-form `type` string
//! into the sum type, and anything unrecognized maps to the fixed
//! [`NostrkitError::NotImplemented`] error.

use nostrkit_crypto::keys::PublicKey;
use nostrkit_event::Event;
use nostrkit_types::{NostrkitError, Result};
use serde::{Deserialize, Serialize};

/// Wire tag for the NIP-04 encrypt operation.
pub const TYPE_NIP04_ENCRYPT: &str = "NIP04_Encrypt";

/// Wire tag for the NIP-04 decrypt operation.
pub const TYPE_NIP04_DECRYPT: &str = "NIP04_Decrypt";

// ---------------------------------------------------------------------------
// SignRequest
// ---------------------------------------------------------------------------

/// A single wallet operation.
#[derive(Clone, Debug)]
pub enum SignRequest {
    /// Encrypt `plaintext` for `peer` with NIP-04.
    Nip04Encrypt {
        /// The counterparty's x-only public key.
        peer: PublicKey,
        /// Message to encrypt.
        plaintext: String,
    },
    /// Decrypt a NIP-04 `envelope` from `peer`.
    Nip04Decrypt {
        /// The counterparty's x-only public key.
        peer: PublicKey,
        /// Envelope in `base64(ct)?iv=base64(iv)` form.
        envelope: String,
    },
    /// Sign a NIP-01 event (filling `pubkey` and `id` if absent).
    SignEvent(Event),
}

// ---------------------------------------------------------------------------
// SignResponse
// ---------------------------------------------------------------------------

/// Result of a dispatched [`SignRequest`], variant-matched to it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SignResponse {
    /// Envelope produced by [`SignRequest::Nip04Encrypt`].
    Envelope(String),
    /// Plaintext recovered by [`SignRequest::Nip04Decrypt`].
    Plaintext(String),
    /// Fully signed event from [`SignRequest::SignEvent`].
    Event(Event),
}

// ---------------------------------------------------------------------------
// CryptTextParams (wire form)
// ---------------------------------------------------------------------------

/// Wire-level encrypt/decrypt request as received from RPC callers.
///
/// The `type` field is free-form on the wire; only the two `TYPE_*`
/// tags are recognized.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CryptTextParams {
    /// Operation tag (`NIP04_Encrypt` or `NIP04_Decrypt`).
    #[serde(rename = "type")]
    pub operation: String,
    /// Counterparty public key, hex-encoded.
    pub pubkey: String,
    /// Plaintext (encrypt) or envelope (decrypt).
    pub text: String,
}

impl CryptTextParams {
    /// Narrows the wire form into a typed [`SignRequest`].
    ///
    /// # Errors
    ///
    /// - [`NostrkitError::InvalidKey`] if `pubkey` is malformed.
    /// - [`NostrkitError::NotImplemented`] for an unrecognized `type`.
    pub fn into_request(self) -> Result<SignRequest> {
        let peer = PublicKey::from_hex(&self.pubkey)?;

        match self.operation.as_str() {
            TYPE_NIP04_ENCRYPT => Ok(SignRequest::Nip04Encrypt {
                peer,
                plaintext: self.text,
            }),
            TYPE_NIP04_DECRYPT => Ok(SignRequest::Nip04Decrypt {
                peer,
                envelope: self.text,
            }),
            _ => Err(NostrkitError::NotImplemented),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
