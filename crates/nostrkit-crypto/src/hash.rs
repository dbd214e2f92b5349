//! SHA-256 hashing.
//!
//! Event ids and other digests in the workspace all use SHA-256; this
//! is the only place the hash function is named.

use sha2::{Digest, Sha256};

/// Computes the SHA-256 hash of arbitrary data.
///
/// Returns a fixed 32-byte digest. Deterministic: identical inputs
/// always produce identical outputs.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&result);
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
