//! Signing identities: an address plus, when the holder has it, the key.
//!
//! A wallet restored from a seed yields full identities. A view-only wallet,
//! or anything that only knows an address, yields watch-only identities that
//! can be used for verification bookkeeping but never for signing.

use std::fmt;

use super::address::Address;
use crate::config::Network;
use crate::crypto::keys::Keypair;

/// An address paired with its signing key, if available.
#[derive(Clone)]
pub struct Identity {
    address: Address,
    keypair: Option<Keypair>,
}

impl Identity {
    /// A full identity on `network` backed by `keypair`.
    pub fn from_keypair(network: Network, keypair: Keypair) -> Self {
        Self {
            address: Address::new(network, keypair.public_key()),
            keypair: Some(keypair),
        }
    }

    /// An identity that knows its address but holds no key material.
    pub fn watch_only(address: Address) -> Self {
        Self {
            address,
            keypair: None,
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn network(&self) -> Network {
        self.address.network()
    }

    /// Whether [`with_signing_key`](Self::with_signing_key) will run.
    pub fn can_sign(&self) -> bool {
        self.keypair.is_some()
    }

    /// Run `f` with a borrow of the signing key.
    ///
    /// Returns `None` for watch-only identities. The borrow cannot escape
    /// the closure, so no caller holds key material past the operation.
    pub fn with_signing_key<R>(&self, f: impl FnOnce(&Keypair) -> R) -> Option<R> {
        self.keypair.as_ref().map(f)
    }

    /// Drop the key, keeping the address.
    pub fn into_watch_only(self) -> Self {
        Self::watch_only(self.address)
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("address", &self.address)
            .field("can_sign", &self.can_sign())
            .finish()
    }
}

impl PartialEq for Identity {
    /// Identities are equal when their addresses are; key presence is not
    /// part of identity.
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for Identity {}
