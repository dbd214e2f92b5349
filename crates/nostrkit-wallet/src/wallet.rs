//! Wallet construction and signing dispatch.
//!
//! A [`Wallet`] wraps one secp256k1 secret key. It can be built from
//! raw hex, an `nsec` string, or a BIP-39 mnemonic (NIP-06 derivation),
//! and services [`SignRequest`]s. Dispatch is exhaustive over the
//! request sum type; every call is stateless and independent.

use nostrkit_crypto::hd_derive::{derive_secret_key, nip06_path};
use nostrkit_crypto::keys::{PublicKey, SecretKey};
use nostrkit_crypto::mnemonic::{mnemonic_to_seed, parse_mnemonic};
use nostrkit_crypto::nip04;
use nostrkit_crypto::nip19;
use nostrkit_event::signing::sign_event;
use nostrkit_types::Result;
use tracing::debug;

use crate::request::{SignRequest, SignResponse};

// ---------------------------------------------------------------------------
// Wallet
// ---------------------------------------------------------------------------

/// A single-identity signing wallet.
pub struct Wallet {
    /// The identity's secret key.
    secret: SecretKey,
    /// Cached x-only public key (cheap, derived once).
    public: PublicKey,
}

impl Wallet {
    // -- Construction -----------------------------------------------------

    /// Creates a wallet from a fresh random key.
    pub fn generate() -> Self {
        Self::from_secret_key(SecretKey::generate())
    }

    /// Creates a wallet from an existing secret key.
    pub fn from_secret_key(secret: SecretKey) -> Self {
        let public = secret.public_key();
        Self { secret, public }
    }

    /// Creates a wallet from a hex-encoded secret key
    /// (optionally `0x`-prefixed).
    pub fn from_hex(s: &str) -> Result<Self> {
        Ok(Self::from_secret_key(SecretKey::from_hex(s)?))
    }

    /// Creates a wallet from an `nsec...` string.
    pub fn from_nsec(s: &str) -> Result<Self> {
        Ok(Self::from_secret_key(nip19::decode_nsec(s)?))
    }

    /// Creates a wallet from a BIP-39 mnemonic phrase via the NIP-06
    /// derivation path `m/44'/1237'/<account>'/0/0`.
    pub fn from_mnemonic(phrase: &str, passphrase: &str, account: u32) -> Result<Self> {
        let mnemonic = parse_mnemonic(phrase)?;
        let seed = mnemonic_to_seed(&mnemonic, passphrase);
        let secret = derive_secret_key(&seed, &nip06_path(account))?;
        Ok(Self::from_secret_key(secret))
    }

    // -- Accessors --------------------------------------------------------

    /// Returns the wallet's x-only public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Returns the public key as an `npub...` string.
    pub fn npub(&self) -> Result<String> {
        nip19::encode_npub(&self.public)
    }

    /// Returns the secret key as an `nsec...` string.
    ///
    /// # Security
    ///
    /// The returned string contains the private key.
    pub fn nsec(&self) -> Result<String> {
        nip19::encode_nsec(&self.secret)
    }

    // -- Dispatch ---------------------------------------------------------

    /// Services one signing request.
    ///
    /// Exhaustive over [`SignRequest`]; failures propagate unchanged
    /// from the underlying operation.
    pub fn sign_request(&self, request: SignRequest) -> Result<SignResponse> {
        match request {
            SignRequest::Nip04Encrypt { peer, plaintext } => {
                debug!(peer = %peer, "nip04 encrypt");
                let envelope = nip04::encrypt(&self.secret, &peer, &plaintext)?;
                Ok(SignResponse::Envelope(envelope))
            }
            SignRequest::Nip04Decrypt { peer, envelope } => {
                debug!(peer = %peer, "nip04 decrypt");
                let plaintext = nip04::decrypt(&self.secret, &peer, &envelope)?;
                Ok(SignResponse::Plaintext(plaintext))
            }
            SignRequest::SignEvent(mut event) => {
                debug!(kind = event.kind, "sign event");
                sign_event(&mut event, &self.secret)?;
                Ok(SignResponse::Event(event))
            }
        }
    }
}

// Wallet intentionally does not implement Clone or Debug to prevent
// accidental leakage of the secret key in logs or copies.

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
