//! Core shared types for the nostrkit SDK.
//!
//! This crate defines the workspace-wide error type and `Result` alias.
//! Every other crate in the workspace reports failures through
//! [`NostrkitError`] — no crate defines its own error enum.

use thiserror::Error;

/// Convenience alias used across the nostrkit workspace.
pub type Result<T> = std::result::Result<T, NostrkitError>;

// ---------------------------------------------------------------------------
// NostrkitError
// ---------------------------------------------------------------------------

/// Unified error type for all nostrkit operations.
///
/// Errors never substitute defaults: malformed key material, envelopes,
/// or events always surface immediately to the caller.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum NostrkitError {
    /// Key material is malformed: bad hex, wrong bech32 human-readable
    /// part, wrong length, or a scalar outside the secp256k1 curve order.
    #[error("invalid key: {reason}")]
    InvalidKey {
        /// Human-readable description of why the key is invalid.
        reason: String,
    },

    /// An encrypted envelope is malformed: missing `?iv=` separator or
    /// invalid base64 in either component.
    #[error("invalid envelope: {reason}")]
    InvalidEnvelope {
        /// Human-readable description of the envelope defect.
        reason: String,
    },

    /// A cryptographic operation failed (ECDH, cipher, signing,
    /// verification, key derivation).
    ///
    /// For AES-CBC decryption this covers both "wrong key" and
    /// "tampered ciphertext" — the scheme carries no authentication tag,
    /// so the two are indistinguishable.
    #[error("crypto error: {reason}")]
    CryptoError {
        /// Human-readable description of the cryptographic failure.
        reason: String,
    },

    /// An event is malformed or fails id/signature verification.
    #[error("invalid event: {reason}")]
    InvalidEvent {
        /// Human-readable description of the event defect.
        reason: String,
    },

    /// The requested wallet operation is not supported.
    #[error("not implemented")]
    NotImplemented,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_includes_reason() {
        let err = NostrkitError::InvalidKey {
            reason: "bad hex".into(),
        };
        assert_eq!(err.to_string(), "invalid key: bad hex");
    }

    #[test]
    fn not_implemented_has_fixed_message() {
        assert_eq!(NostrkitError::NotImplemented.to_string(), "not implemented");
    }
}
