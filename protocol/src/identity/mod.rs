//! # Identity Module
//!
//! Who is signing, and where their key comes from. The layers are:
//!
//! 1. **Address**: Bech32 encoding of an Ed25519 public key under a network
//!    prefix (`sigil1...`). This is what users see and share, and all a
//!    verifier ever needs.
//! 2. **Identity**: an address plus, when available, its signing key.
//!    Watch-only identities carry the address alone.
//! 3. **Seed**: seed phrase parsing and the pluggable derivation from phrase
//!    and account index to key bytes.
//! 4. **Providers**: where identities come from. [`SeedWallet`] and
//!    [`InMemoryKeyStore`] implement the synchronous [`KeyProvider`];
//!    daemons and hardware implement [`AsyncKeyProvider`] and are usually
//!    wrapped in a [`ResilientProvider`].
//!
//! Key material never leaves an [`Identity`] except as a borrow inside
//! [`Identity::with_signing_key`], and every type holding secrets prints
//! redacted `Debug` output.

pub mod account;
pub mod address;
pub mod provider;
pub mod remote;
pub mod seed;
pub mod wallet;

pub use account::Identity;
pub use address::{Address, AddressError};
pub use provider::{IdentitySelector, InMemoryKeyStore, KeyProvider, ProviderError};
pub use remote::{AsyncKeyProvider, LocalProvider, ResilientProvider};
pub use seed::{Blake3SeedDeriver, SeedDeriver, SeedError, SeedPhrase};
pub use wallet::SeedWallet;
