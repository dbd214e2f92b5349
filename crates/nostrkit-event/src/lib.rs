//! Signed-event envelope for the nostrkit SDK.
//!
//! Defines the NIP-01 event record, its canonical JSON serialization
//! and SHA-256 id computation, and the BIP-340 Schnorr signing and
//! verification pipeline.
//!
//! # Modules
//!
//! - [`event`] — the `Event` struct and well-known kind constants
//! - [`canonical`] — canonical serialization and event-id computation
//! - [`signing`] — event signing and verification

pub mod canonical;
pub mod event;
pub mod signing;

pub use event::Event;
