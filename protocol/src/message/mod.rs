//! # Message Signing
//!
//! Signing arbitrary messages with a wallet identity and verifying them
//! from the address alone.
//!
//! - **envelope**: the `SigV1` text form of a signature.
//! - **signing**: producing signatures; fails only when the key is missing.
//! - **verification**: checking signatures; the boolean form never fails.
//! - **service**: [`SignatureService`], the stateless front door.
//!
//! A signature is valid for exactly one (message, address) pair. Changing a
//! single bit of the message, the address or the signature makes
//! verification return `false`.

pub mod envelope;
pub mod service;
pub mod signing;
pub mod verification;

pub use envelope::{MessageSignature, SignatureFormatError};
pub use service::SignatureService;
pub use signing::{sign_message, SignError};
pub use verification::{check_signature, verify_message, VerificationError};
