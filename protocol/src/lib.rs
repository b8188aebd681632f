// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Sigil Protocol Core Library
//!
//! Wallet message signing: a wallet holder signs an arbitrary message with
//! the key behind one of their addresses, and anyone holding the address
//! and the signature can check it without ever seeing a private key.
//!
//! ```text
//! wallet ──get_identity──> Identity ──sign──> "SigV1..."
//!                                                 │
//! verifier: (message, "sigil1...", "SigV1...") ──verify──> bool
//! ```
//!
//! ## Modules
//!
//! - **config**: protocol constants, networks and provider settings.
//! - **crypto**: Ed25519 keys and signatures, BLAKE3 digests.
//! - **identity**: addresses, identities, seed wallets and key providers.
//! - **message**: the signature envelope and [`SignatureService`].
//!
//! ## Guarantees
//!
//! 1. A signature verifies for exactly the message and address it was
//!    produced for. One flipped bit anywhere and the answer is `false`.
//! 2. `verify` is total. Garbage in, `false` out; it never errors or panics.
//! 3. `sign` fails only when the identity has no key, and says so.
//! 4. Private keys and seed words are never logged and never printed by
//!    `Debug`.

pub mod config;
pub mod crypto;
pub mod identity;
pub mod message;

pub use config::Network;
pub use identity::{Address, Identity, IdentitySelector, KeyProvider, SeedWallet};
pub use message::{sign_message, verify_message, MessageSignature, SignError, SignatureService};
