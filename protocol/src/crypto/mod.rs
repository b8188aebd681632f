//! # Cryptographic Primitives
//!
//! Everything sigil signs or hashes goes through here:
//!
//! - **Ed25519** for signatures, via `ed25519-dalek` with strict verification.
//! - **BLAKE3** in `derive_key` mode for message digests and seed derivation.
//!
//! These are thin, typed wrappers over audited crates. Nothing in this
//! module implements curve arithmetic itself.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::message_digest;
pub use keys::{KeyError, Keypair, PublicKey, Signature};
pub use signatures::{sign, verify};
