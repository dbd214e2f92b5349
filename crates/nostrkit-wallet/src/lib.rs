//! Wallet façade for the nostrkit SDK.
//!
//! A [`Wallet`](wallet::Wallet) holds one secp256k1 identity and
//! dispatches signing requests: NIP-04 encryption and decryption of
//! direct messages, and NIP-01 event signing. Each call is independent
//! and stateless — the wallet keeps no state beyond the key itself.
//!
//! # Modules
//!
//! - [`request`] — the [`SignRequest`](request::SignRequest) sum type
//!   and its wire-level form
//! - [`wallet`] — wallet construction and dispatch

pub mod request;
pub mod wallet;

pub use request::{CryptTextParams, SignRequest, SignResponse};
pub use wallet::Wallet;
