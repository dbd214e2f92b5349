//! BIP-39 mnemonic handling and seed derivation.
//!
//! Thin wrapper over the `bip39` crate: 24-word (256-bit entropy)
//! mnemonic generation, phrase validation, and PBKDF2-HMAC-SHA512 seed
//! derivation. The resulting [`Seed`] feeds BIP-32 derivation in
//! [`crate::hd_derive`].

use bip39::Mnemonic;
use nostrkit_types::{NostrkitError, Result};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Word count for generated mnemonics (256 bits of entropy).
const WORD_COUNT: usize = 24;

// ---------------------------------------------------------------------------
// Seed
// ---------------------------------------------------------------------------

/// A 64-byte seed derived from a BIP-39 mnemonic via PBKDF2-HMAC-SHA512.
///
/// Input to BIP-32 key derivation. Automatically zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; 64]);

impl Seed {
    /// Fixed byte length of a BIP-39 seed.
    pub const LEN: usize = 64;

    /// Creates a [`Seed`] from a raw 64-byte array.
    ///
    /// Use this for test vectors or stored material; normal operation
    /// goes through [`mnemonic_to_seed`].
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Returns the raw 64-byte seed.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

// Seed does not implement Clone/Debug to prevent leakage.

// ---------------------------------------------------------------------------
// Generation / validation
// ---------------------------------------------------------------------------

/// Generates a new random 24-word BIP-39 mnemonic from OS entropy.
pub fn generate_mnemonic() -> Result<Mnemonic> {
    Mnemonic::generate(WORD_COUNT).map_err(|e| NostrkitError::CryptoError {
        reason: format!("mnemonic generation failed: {e}"),
    })
}

/// Parses and validates a BIP-39 mnemonic phrase.
///
/// Checks the word list membership and the embedded entropy checksum.
///
/// # Errors
///
/// Returns [`NostrkitError::InvalidKey`] if the phrase is not a valid
/// BIP-39 mnemonic.
pub fn parse_mnemonic(phrase: &str) -> Result<Mnemonic> {
    Mnemonic::parse(phrase).map_err(|e| NostrkitError::InvalidKey {
        reason: format!("invalid BIP39 mnemonic: {e}"),
    })
}

// ---------------------------------------------------------------------------
// Seed derivation
// ---------------------------------------------------------------------------

/// Derives the 64-byte BIP-39 seed from a mnemonic and passphrase.
///
/// PBKDF2-HMAC-SHA512, 2048 rounds, salt = `"mnemonic" + passphrase`
/// (performed by the `bip39` crate). Use `""` for no passphrase.
pub fn mnemonic_to_seed(mnemonic: &Mnemonic, passphrase: &str) -> Seed {
    Seed(mnemonic.to_seed(passphrase))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_mnemonic_has_24_words() {
        let m = generate_mnemonic().expect("generate");
        assert_eq!(m.word_count(), 24);
    }

    #[test]
    fn generated_mnemonic_reparses() {
        let m = generate_mnemonic().expect("generate");
        let reparsed = parse_mnemonic(&m.to_string()).expect("reparse");
        assert_eq!(m, reparsed);
    }

    #[test]
    fn invalid_phrase_rejected() {
        assert!(parse_mnemonic("definitely not a mnemonic").is_err());
        assert!(parse_mnemonic("").is_err());
    }

    #[test]
    fn checksum_violation_rejected() {
        // 12 repeated valid words fail the BIP39 checksum.
        let phrase = ["abandon"; 12].join(" ");
        assert!(parse_mnemonic(&phrase).is_err());
    }

    #[test]
    fn seed_is_deterministic() {
        let m = parse_mnemonic(
            "leader monkey parrot ring guide accident before fence cannon height naive bean",
        )
        .expect("valid vector phrase");

        let s1 = mnemonic_to_seed(&m, "");
        let s2 = mnemonic_to_seed(&m, "");
        assert_eq!(s1.as_bytes(), s2.as_bytes());
    }

    #[test]
    fn passphrase_changes_seed() {
        let m = parse_mnemonic(
            "leader monkey parrot ring guide accident before fence cannon height naive bean",
        )
        .expect("valid vector phrase");

        let plain = mnemonic_to_seed(&m, "");
        let salted = mnemonic_to_seed(&m, "passphrase");
        assert_ne!(plain.as_bytes(), salted.as_bytes());
    }
}
