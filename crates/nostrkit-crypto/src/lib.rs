//! Cryptographic primitives for the nostrkit SDK.
//!
//! This crate is the **sole** location for all cryptographic operations.
//! No other crate in the workspace may perform raw crypto directly.
//!
//! # Modules
//!
//! - [`keys`] — secp256k1 secret keys and x-only (BIP-340) public keys
//! - [`schnorr`] — BIP-340 Schnorr signatures over 32-byte digests
//! - [`ecdh`] — NIP-04 shared-secret derivation over secp256k1
//! - [`nip04`] — AES-256-CBC envelope encryption for direct messages
//! - [`nip19`] — `nsec` / `npub` Bech32 codecs
//! - [`hash`] — SHA-256 hashing
//! - [`mnemonic`] — BIP-39 mnemonic handling and seed derivation
//! - [`hd_derive`] — BIP-32 derivation for the NIP-06 key path

pub mod ecdh;
pub mod hash;
pub mod hd_derive;
pub mod keys;
pub mod mnemonic;
pub mod nip04;
pub mod nip19;
pub mod schnorr;
